//! Resolution cache trait.

use std::sync::Arc;

use crate::domain::entities::ResolvedSnapshot;

/// Cache of resolved link snapshots keyed by `(domain_id, code)`.
///
/// The cache is a pure performance optimization: every outcome the engine
/// produces must be identical with [`crate::infrastructure::cache::NullCache`]
/// substituted for the real implementation. Implementations must be
/// thread-safe, and every method must be non-suspending and bounded-time —
/// the redirect path calls them between two awaits and may not block on I/O
/// or long critical sections.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - sharded in-memory LRU with TTL
/// - [`crate::infrastructure::cache::NullCache`] - no-op, every lookup misses
pub trait SnapshotCache: Send + Sync {
    /// Returns the cached snapshot, or `None` on miss.
    ///
    /// An entry past its TTL is treated as absent even if still resident;
    /// staleness is bounded even for mutations that bypassed
    /// [`Self::invalidate`].
    fn get(&self, domain_id: Option<i64>, code: &str) -> Option<Arc<ResolvedSnapshot>>;

    /// Stores a snapshot, replacing any previous entry for the key atomically.
    fn put(&self, domain_id: Option<i64>, snapshot: Arc<ResolvedSnapshot>);

    /// Drops the entry for the key, if resident.
    fn invalidate(&self, domain_id: Option<i64>, code: &str);
}
