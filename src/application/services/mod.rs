//! Application services orchestrating the domain layer.
//!
//! # Services
//!
//! - [`CodeAllocator`] - Collision-safe short-code allocation via conditional inserts
//! - [`access_gate`] - Pure admission evaluation (active flag, expiry, password)
//! - [`LinkRegistry`] - Authoritative link lifecycle with cache invalidation
//! - [`RedirectService`] - The cache-first redirect hot path

pub mod access_gate;
pub mod code_allocator;
pub mod link_registry;
pub mod redirect_service;

pub use access_gate::{Decision, evaluate};
pub use code_allocator::CodeAllocator;
pub use link_registry::LinkRegistry;
pub use redirect_service::{DenialReason, RedirectOutcome, RedirectService};
