//! Admission evaluation for resolved links.
//!
//! A pure function of the snapshot, the supplied password, and the request
//! time. Nothing here touches storage or mutates state, which is what lets
//! the gate sit on the hot path between a cache read and the response.

use chrono::{DateTime, Utc};

use crate::domain::entities::{ClickOutcome, ResolvedSnapshot};
use crate::utils::password::verify_password;

/// Outcome of evaluating one request against a resolved link.
///
/// Denials are expected, non-exceptional outcomes. The two password denials
/// are distinct because callers render different UX for "enter the password"
/// versus "that password is wrong".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The request may be redirected to the destination URL.
    Admit(String),
    DenyInactive,
    DenyExpired,
    DenyPasswordRequired,
    DenyPasswordWrong,
}

impl Decision {
    /// The analytics outcome this decision records.
    pub fn outcome(&self) -> ClickOutcome {
        match self {
            Self::Admit(_) => ClickOutcome::Admitted,
            Self::DenyInactive => ClickOutcome::DeniedInactive,
            Self::DenyExpired => ClickOutcome::DeniedExpired,
            Self::DenyPasswordRequired | Self::DenyPasswordWrong => ClickOutcome::DeniedPassword,
        }
    }
}

/// Evaluates admissibility in fixed order: active flag, then expiration
/// against the request time, then the password gate.
///
/// Expiration deliberately compares against `at` rather than anything cached:
/// a snapshot written seconds before expiry must still deny once the moment
/// passes, TTL or not.
pub fn evaluate(
    snapshot: &ResolvedSnapshot,
    supplied_password: Option<&str>,
    at: DateTime<Utc>,
) -> Decision {
    if !snapshot.is_active {
        return Decision::DenyInactive;
    }

    if snapshot.is_expired_at(at) {
        return Decision::DenyExpired;
    }

    if let Some(hash) = &snapshot.password_hash {
        match supplied_password {
            None => return Decision::DenyPasswordRequired,
            Some(candidate) if !verify_password(hash, candidate) => {
                return Decision::DenyPasswordWrong;
            }
            Some(_) => {}
        }
    }

    Decision::Admit(snapshot.long_url.clone())
}
