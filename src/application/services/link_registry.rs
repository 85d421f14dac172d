//! Authoritative link management: create, look up, update, delete.

use std::sync::Arc;

use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::warn;

use super::code_allocator::CodeAllocator;
use crate::config::EngineConfig;
use crate::domain::entities::{Link, LinkDraft, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::SnapshotCache;
use crate::utils::password::hash_password;
use crate::utils::url_normalizer::normalize_url;

/// Delay before the single transient-lookup retry.
const TRANSIENT_RETRY_DELAY_MS: u64 = 50;

/// Authoritative mapping of `(domain_id, code)` to link records.
///
/// Composes the allocator with the repository so that code reservation and
/// link persistence are one atomic unit, and keeps the resolution cache
/// honest: every mutation invalidates the affected snapshot before the call
/// returns, bounding staleness to the in-flight requests that already hold
/// the old `Arc`.
pub struct LinkRegistry<R: LinkRepository> {
    repo: Arc<R>,
    cache: Arc<dyn SnapshotCache>,
    allocator: CodeAllocator,
}

impl<R: LinkRepository> LinkRegistry<R> {
    pub fn new(repo: Arc<R>, cache: Arc<dyn SnapshotCache>, config: &EngineConfig) -> Self {
        Self {
            repo,
            cache,
            allocator: CodeAllocator::new(config.code_length, config.code_max_attempts),
        }
    }

    /// Creates a link, allocating its short code.
    ///
    /// Validates and normalizes the destination, checks the expiry is in the
    /// future, hashes the password, then hands a draft to the allocator for
    /// the conditional insert.
    ///
    /// # Errors
    ///
    /// [`AppError::Validation`] for a bad URL, bad custom code, or past
    /// expiry; [`AppError::CodeConflict`] / [`AppError::AllocationExhausted`]
    /// from allocation.
    pub async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let long_url = normalize_url(&new_link.long_url)
            .map_err(|e| AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() })))?;

        if let Some(expires_at) = new_link.expires_at {
            if expires_at <= chrono::Utc::now() {
                return Err(AppError::bad_request(
                    "Expiry must be in the future",
                    json!({ "expires_at": expires_at }),
                ));
            }
        }

        let draft = LinkDraft {
            space_id: new_link.space_id,
            domain_id: new_link.domain_id,
            code: String::new(),
            long_url,
            title: new_link.title,
            description: new_link.description,
            tags: new_link.tags,
            password_hash: new_link.password.as_deref().map(hash_password),
            is_active: new_link.is_active,
            expires_at: new_link.expires_at,
            pixel_ids: new_link.pixel_ids,
        };

        self.allocator
            .allocate(self.repo.as_ref(), draft, new_link.custom_code)
            .await
    }

    /// Looks up a live link, the authoritative fallback for cache misses.
    ///
    /// An unknown or soft-deleted code is `Ok(None)`. A transient storage
    /// error is retried once after a short pause before surfacing.
    pub async fn get_by_code(
        &self,
        domain_id: Option<i64>,
        code: &str,
    ) -> Result<Option<Link>, AppError> {
        let strategy = FixedInterval::from_millis(TRANSIENT_RETRY_DELAY_MS).take(1);

        RetryIf::spawn(
            strategy,
            || self.repo.find_by_code(domain_id, code),
            |e: &AppError| {
                let transient = e.is_transient();
                if transient {
                    warn!(code, "transient storage error during lookup, retrying once");
                }
                transient
            },
        )
        .await
    }

    /// Partially updates a link and invalidates its cached snapshot.
    ///
    /// `patch.password` is taken as the plain secret and hashed here;
    /// `patch.long_url` is normalized like at creation.
    pub async fn update(
        &self,
        domain_id: Option<i64>,
        code: &str,
        mut patch: LinkPatch,
    ) -> Result<Link, AppError> {
        if let Some(url) = &patch.long_url {
            patch.long_url = Some(normalize_url(url).map_err(|e| {
                AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
            })?);
        }
        if let Some(Some(plain)) = &patch.password {
            patch.password = Some(Some(hash_password(plain)));
        }

        let link = self.repo.update(domain_id, code, patch).await?;
        self.cache.invalidate(domain_id, code);
        Ok(link)
    }

    /// Flips the active flag; inactive links deny resolution immediately.
    pub async fn set_active(
        &self,
        domain_id: Option<i64>,
        code: &str,
        active: bool,
    ) -> Result<Link, AppError> {
        let patch = LinkPatch {
            is_active: Some(active),
            ..LinkPatch::default()
        };
        self.update(domain_id, code, patch).await
    }

    /// Soft-deletes a link, keeping its click history attributable.
    pub async fn soft_delete(&self, domain_id: Option<i64>, code: &str) -> Result<bool, AppError> {
        let deleted = self.repo.soft_delete(domain_id, code).await?;
        self.cache.invalidate(domain_id, code);
        Ok(deleted)
    }

    /// Removes a link entirely.
    pub async fn hard_delete(&self, domain_id: Option<i64>, code: &str) -> Result<bool, AppError> {
        let removed = self.repo.hard_delete(domain_id, code).await?;
        self.cache.invalidate(domain_id, code);
        Ok(removed)
    }
}
