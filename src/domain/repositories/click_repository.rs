//! Repository trait for durable click storage.

use crate::domain::entities::ClickEvent;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for batched click persistence.
///
/// Called only by the click recorder's flush worker, never on the redirect
/// path. A failed batch is retried by the worker with backoff and eventually
/// discarded; implementations just report the failure honestly.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryClickRepository`] - embedded / tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Durably writes a batch of click events, returning how many were stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] on transient storage failure,
    /// [`AppError::Internal`] otherwise. Ordering within the batch carries no
    /// meaning.
    async fn insert_batch(&self, clicks: &[ClickEvent]) -> Result<u64, AppError>;
}
