//! No-op cache implementation for testing or disabled caching.

use std::sync::Arc;

use tracing::debug;

use super::service::SnapshotCache;
use crate::domain::entities::ResolvedSnapshot;

/// A cache implementation that does nothing.
///
/// Every lookup misses, so every resolution falls through to the registry.
/// The engine must produce identical outcomes with this cache substituted
/// for the real one; the cache-transparency integration tests rely on it.
///
/// # Use Cases
///
/// - Deployments where staleness is unacceptable and load is low
/// - Testing scenarios where caching should be bypassed
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotCache for NullCache {
    fn get(&self, _domain_id: Option<i64>, _code: &str) -> Option<Arc<ResolvedSnapshot>> {
        None
    }

    fn put(&self, _domain_id: Option<i64>, _snapshot: Arc<ResolvedSnapshot>) {}

    fn invalidate(&self, _domain_id: Option<i64>, _code: &str) {}
}
