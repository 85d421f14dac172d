//! Redirect resolution: cache, authoritative fallback, gating, recording.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use metrics::counter;
use tracing::debug;

use super::access_gate::{self, Decision};
use super::link_registry::LinkRegistry;
use crate::application::click_recorder::ClickRecorder;
use crate::config::EngineConfig;
use crate::domain::entities::{ClickEvent, ClientMetadata, ResolvedSnapshot};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::SnapshotCache;

/// Why a resolved link refused the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    Inactive,
    Expired,
    PasswordRequired,
    PasswordWrong,
}

/// Result of resolving a short code for one request.
///
/// All three variants are successful resolutions from the engine's point of
/// view; `Err` is reserved for infrastructure failures where no answer could
/// be produced at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// Redirect the client to the destination.
    Redirect { long_url: String },
    /// No live link exists under this code.
    NotFound,
    /// The link exists but refused this request.
    Denied { reason: DenialReason },
}

impl From<Decision> for RedirectOutcome {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Admit(long_url) => Self::Redirect { long_url },
            Decision::DenyInactive => Self::Denied {
                reason: DenialReason::Inactive,
            },
            Decision::DenyExpired => Self::Denied {
                reason: DenialReason::Expired,
            },
            Decision::DenyPasswordRequired => Self::Denied {
                reason: DenialReason::PasswordRequired,
            },
            Decision::DenyPasswordWrong => Self::Denied {
                reason: DenialReason::PasswordWrong,
            },
        }
    }
}

/// The redirect hot path.
///
/// Serves from the snapshot cache when it can, falls back to the registry on
/// a miss, gates every hit, and records a click event for every resolved
/// link whether admitted or denied. The cache is purely an accelerator:
/// swapping in [`crate::infrastructure::cache::NullCache`] yields identical
/// outcomes for every request.
pub struct RedirectService<R: LinkRepository> {
    registry: Arc<LinkRegistry<R>>,
    cache: Arc<dyn SnapshotCache>,
    recorder: ClickRecorder,
    anonymize_ips: bool,
}

impl<R: LinkRepository> RedirectService<R> {
    pub fn new(
        registry: Arc<LinkRegistry<R>>,
        cache: Arc<dyn SnapshotCache>,
        recorder: ClickRecorder,
        config: &EngineConfig,
    ) -> Self {
        Self {
            registry,
            cache,
            recorder,
            anonymize_ips: config.anonymize_ips,
        }
    }

    /// Resolves a code and decides the response for one request.
    ///
    /// `at` is the request time every time-based check is evaluated against.
    /// Unknown codes produce [`RedirectOutcome::NotFound`] and record no
    /// click; random probing must not pollute analytics.
    ///
    /// # Errors
    ///
    /// Only infrastructure failures from the authoritative lookup. Denials
    /// are `Ok` outcomes, and click recording can never fail a redirect.
    pub async fn resolve_and_redirect(
        &self,
        domain_id: Option<i64>,
        code: &str,
        at: DateTime<Utc>,
        meta: &ClientMetadata,
        supplied_password: Option<&str>,
    ) -> Result<RedirectOutcome, AppError> {
        let snapshot = match self.lookup(domain_id, code).await? {
            Some(snapshot) => snapshot,
            None => return Ok(RedirectOutcome::NotFound),
        };

        let decision = access_gate::evaluate(&snapshot, supplied_password, at);

        self.recorder.enqueue(ClickEvent::new(
            snapshot.link_id,
            at,
            meta,
            decision.outcome(),
            self.anonymize_ips,
        ));

        Ok(decision.into())
    }

    /// Cache-first snapshot lookup; a miss consults the registry and, on a
    /// hit there, populates the cache for subsequent requests.
    async fn lookup(
        &self,
        domain_id: Option<i64>,
        code: &str,
    ) -> Result<Option<Arc<ResolvedSnapshot>>, AppError> {
        if let Some(snapshot) = self.cache.get(domain_id, code) {
            counter!("linkgate_cache_hits_total").increment(1);
            debug!(code, "snapshot served from cache");
            return Ok(Some(snapshot));
        }
        counter!("linkgate_cache_misses_total").increment(1);

        match self.registry.get_by_code(domain_id, code).await? {
            Some(link) => {
                let snapshot = Arc::new(ResolvedSnapshot::of(&link));
                self.cache.put(domain_id, snapshot.clone());
                Ok(Some(snapshot))
            }
            None => Ok(None),
        }
    }
}
