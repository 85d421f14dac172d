//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by concrete backends in `crate::infrastructure::persistence`.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Conditional insert, lookup, update, delete of links
//! - [`ClickRepository`] - Batched click persistence for the recorder worker
//!
//! # Testing
//!
//! Mock implementations are auto-generated via `mockall` under `cfg(test)`;
//! integration tests use the in-memory backends instead.

pub mod click_repository;
pub mod link_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
