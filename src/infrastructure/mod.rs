//! Infrastructure layer for storage and caching.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and snapshot caching.
//!
//! # Modules
//!
//! - [`cache`] - Snapshot cache (sharded in-memory LRU and no-op implementations)
//! - [`persistence`] - PostgreSQL and in-memory repository implementations

pub mod cache;
pub mod persistence;
