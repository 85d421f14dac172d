//! Snapshot caching for the redirect hot path.

pub mod memory_cache;
pub mod null_cache;
pub mod service;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use service::SnapshotCache;
