//! Utility functions shared across the engine.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`password`] - Salted hashing for link access passwords
//! - [`url_normalizer`] - Destination URL validation and normalization

pub mod code_generator;
pub mod password;
pub mod url_normalizer;
