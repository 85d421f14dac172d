//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// How a resolved redirect attempt ended.
///
/// Denied attempts are meaningful analytics signal and are recorded with the
/// same machinery as admitted ones. Unknown codes are never recorded: there
/// is no link to attribute them to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickOutcome {
    Admitted,
    DeniedInactive,
    DeniedExpired,
    DeniedPassword,
}

impl ClickOutcome {
    /// Stable string form used for persistence and metrics labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admitted => "admitted",
            Self::DeniedInactive => "denied_inactive",
            Self::DeniedExpired => "denied_expired",
            Self::DeniedPassword => "denied_password",
        }
    }
}

/// Request metadata forwarded by the serving layer.
///
/// All fields are optional to handle missing headers gracefully. `country` is
/// derived by the caller (GeoIP lives outside this engine).
#[derive(Debug, Clone, Default)]
pub struct ClientMetadata {
    pub ip: Option<IpAddr>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub country: Option<String>,
}

/// An in-memory representation of a click for async processing.
///
/// Created by the redirect service after the gate decision, sent to a bounded
/// channel (non-blocking), and persisted in batches by the click recorder
/// worker. The redirect path never reads these back.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub country: Option<String>,
    pub outcome: ClickOutcome,
}

impl ClickEvent {
    /// Builds a click event from request metadata.
    ///
    /// When `anonymize_ip` is set, the client address is truncated (IPv4 to
    /// /24, IPv6 to /48) before it is stored anywhere.
    pub fn new(
        link_id: i64,
        clicked_at: DateTime<Utc>,
        meta: &ClientMetadata,
        outcome: ClickOutcome,
        anonymize_ip: bool,
    ) -> Self {
        let ip = meta.ip.map(|addr| {
            if anonymize_ip {
                truncate_ip(addr).to_string()
            } else {
                addr.to_string()
            }
        });

        Self {
            link_id,
            clicked_at,
            ip,
            user_agent: meta.user_agent.clone(),
            referer: meta.referer.clone(),
            country: meta.country.clone(),
            outcome,
        }
    }
}

/// Truncates an address for privacy: IPv4 keeps the /24, IPv6 the /48.
pub fn truncate_ip(addr: IpAddr) -> IpAddr {
    match addr {
        IpAddr::V4(v4) => {
            let [a, b, c, _] = v4.octets();
            IpAddr::V4(Ipv4Addr::new(a, b, c, 0))
        }
        IpAddr::V6(v6) => {
            let [s0, s1, s2, ..] = v6.segments();
            IpAddr::V6(Ipv6Addr::new(s0, s1, s2, 0, 0, 0, 0, 0))
        }
    }
}
