//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on infrastructure or any serving layer.
//! Business logic lives in [`crate::application`]; the traits here define the
//! contracts it runs against.

pub mod entities;
pub mod repositories;
