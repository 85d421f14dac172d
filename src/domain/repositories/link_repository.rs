//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkDraft, LinkPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// The `(domain_id, code)` pair is the single serializing point of the whole
/// engine: [`Self::insert`] must be a conditional, single-writer-wins insert
/// so that two concurrent creations can never both claim the same code.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - embedded / tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a fully resolved link row, keyed on `(domain_id, code)`.
    ///
    /// The insert *is* the code reservation: there is no window in which a
    /// code exists reserved but unwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeConflict`] if the code is already taken in the
    /// domain scope, [`AppError::Unavailable`] on transient storage failure.
    async fn insert(&self, draft: LinkDraft) -> Result<Link, AppError>;

    /// Finds a live link by its short code and domain scope.
    ///
    /// Soft-deleted links are excluded; an unknown code is `Ok(None)`, never
    /// an error.
    async fn find_by_code(
        &self,
        domain_id: Option<i64>,
        code: &str,
    ) -> Result<Option<Link>, AppError>;

    /// Partially updates a link. Soft-deleted links are reachable here so a
    /// patch with `restore` can bring them back.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `code` + `domain_id`.
    async fn update(
        &self,
        domain_id: Option<i64>,
        code: &str,
        patch: LinkPatch,
    ) -> Result<Link, AppError>;

    /// Soft-deletes a link by setting `deleted_at`, preserving click history.
    ///
    /// Returns `Ok(true)` if the link was found and deleted, `Ok(false)` if
    /// not found or already deleted.
    async fn soft_delete(&self, domain_id: Option<i64>, code: &str) -> Result<bool, AppError>;

    /// Removes the link row entirely.
    ///
    /// Returns `Ok(true)` if a row was removed.
    async fn hard_delete(&self, domain_id: Option<i64>, code: &str) -> Result<bool, AppError>;
}
