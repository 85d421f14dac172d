//! Repository implementations.
//!
//! - [`PgLinkRepository`] / [`PgClickRepository`] - PostgreSQL, the durable
//!   backends for production deployments
//! - [`InMemoryLinkRepository`] / [`InMemoryClickRepository`] - embedded
//!   backends used by the integration tests and single-process setups

pub mod memory;
pub mod pg_click_repository;
pub mod pg_link_repository;

pub use memory::{InMemoryClickRepository, InMemoryLinkRepository};
pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
