//! Error taxonomy for the allocation and resolution engine.
//!
//! Denied redirects (inactive, expired, bad password) are *not* errors: they
//! are ordinary [`crate::application::services::Decision`] values. Errors here
//! cover invalid input, code-space contention, and storage trouble. Analytics
//! failures never appear at this level at all; the click recorder reports them
//! to observability only.

use serde_json::{Value, json};
use thiserror::Error;

/// Engine-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed validation at the engine boundary (bad URL, bad custom
    /// code, expiry in the past).
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// An explicitly requested short code is already taken within its domain
    /// scope. Never retried: the caller asked for this exact code.
    #[error("short code '{code}' is already taken in this domain scope")]
    CodeConflict {
        code: String,
        domain_id: Option<i64>,
    },

    /// Random code generation kept colliding until the retry budget ran out.
    ///
    /// This is an operational signal that the code space for the domain is
    /// saturating and the configured code length should grow, not a
    /// per-request bug.
    #[error("could not allocate a unique short code after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },

    /// The referenced link does not exist (management operations only;
    /// resolution reports unknown codes as a value, not an error).
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The backing store is temporarily unreachable, after the built-in
    /// single retry.
    #[error("storage temporarily unavailable: {message}")]
    Unavailable { message: String },

    /// Unexpected failure in the engine or its storage collaborator.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// True for errors worth one short-backoff retry inside the registry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Maps low-level sqlx errors onto the engine taxonomy.
///
/// Unique-key violations are surfaced as [`AppError::CodeConflict`] so the
/// allocator can distinguish a lost insert race from real storage trouble.
/// Connection-level failures become [`AppError::Unavailable`] and are eligible
/// for the registry's transient retry.
pub fn map_sqlx_error(e: sqlx::Error, code: &str, domain_id: Option<i64>) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::CodeConflict {
                code: code.to_string(),
                domain_id,
            };
        }
    }

    match e {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            AppError::unavailable(e.to_string())
        }
        other => AppError::internal("Database error", json!({ "source": other.to_string() })),
    }
}
