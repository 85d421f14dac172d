//! In-memory repository implementations.
//!
//! Back the engine for embedded use and integration tests. Uniqueness of
//! `(domain_id, code)` is enforced the same way the PostgreSQL backend does
//! it: a single conditional insert under one serializing guard, so concurrent
//! creations race safely here too.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::domain::entities::{ClickEvent, Link, LinkDraft, LinkPatch};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

type Key = (Option<i64>, String);

/// Mutex-guarded map of links keyed by `(domain_id, code)`.
///
/// The guard is held only for bounded in-memory work, never across an await.
pub struct InMemoryLinkRepository {
    links: Mutex<HashMap<Key, Link>>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Inserts a link row directly, bypassing allocation and boundary
    /// validation. Intended for seeding test fixtures (expired links, rows
    /// created by an external administrative path).
    pub fn seed(&self, link: Link) {
        let key = (link.domain_id, link.code.clone());
        self.links.lock().expect("link map poisoned").insert(key, link);
    }
}

impl Default for InMemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, draft: LinkDraft) -> Result<Link, AppError> {
        let key = (draft.domain_id, draft.code.clone());
        let mut links = self.links.lock().expect("link map poisoned");

        if links.contains_key(&key) {
            return Err(AppError::CodeConflict {
                code: draft.code,
                domain_id: draft.domain_id,
            });
        }

        let link = Link {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            space_id: draft.space_id,
            domain_id: draft.domain_id,
            code: draft.code,
            long_url: draft.long_url,
            title: draft.title,
            description: draft.description,
            tags: draft.tags,
            password_hash: draft.password_hash,
            is_active: draft.is_active,
            expires_at: draft.expires_at,
            created_at: Utc::now(),
            deleted_at: None,
            pixel_ids: draft.pixel_ids,
        };
        links.insert(key, link.clone());

        Ok(link)
    }

    async fn find_by_code(
        &self,
        domain_id: Option<i64>,
        code: &str,
    ) -> Result<Option<Link>, AppError> {
        let links = self.links.lock().expect("link map poisoned");
        let key = (domain_id, code.to_string());

        Ok(links.get(&key).filter(|link| !link.is_deleted()).cloned())
    }

    async fn update(
        &self,
        domain_id: Option<i64>,
        code: &str,
        patch: LinkPatch,
    ) -> Result<Link, AppError> {
        let mut links = self.links.lock().expect("link map poisoned");
        let key = (domain_id, code.to_string());

        let link = links.get_mut(&key).ok_or_else(|| {
            AppError::not_found(
                "Short link not found",
                json!({ "code": code, "domain_id": domain_id }),
            )
        })?;

        patch.apply_to(link);
        Ok(link.clone())
    }

    async fn soft_delete(&self, domain_id: Option<i64>, code: &str) -> Result<bool, AppError> {
        let mut links = self.links.lock().expect("link map poisoned");
        let key = (domain_id, code.to_string());

        match links.get_mut(&key) {
            Some(link) if !link.is_deleted() => {
                link.deleted_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn hard_delete(&self, domain_id: Option<i64>, code: &str) -> Result<bool, AppError> {
        let mut links = self.links.lock().expect("link map poisoned");
        Ok(links.remove(&(domain_id, code.to_string())).is_some())
    }
}

/// Click sink that appends to a vector, with optional injected failures for
/// exercising the flush worker's retry path.
pub struct InMemoryClickRepository {
    clicks: Mutex<Vec<ClickEvent>>,
    fail_remaining: AtomicU32,
}

impl InMemoryClickRepository {
    pub fn new() -> Self {
        Self {
            clicks: Mutex::new(Vec::new()),
            fail_remaining: AtomicU32::new(0),
        }
    }

    /// Makes the next `n` `insert_batch` calls fail with a transient error.
    pub fn fail_next(&self, n: u32) {
        self.fail_remaining.store(n, Ordering::SeqCst);
    }

    /// Snapshot of everything recorded so far.
    pub fn recorded(&self) -> Vec<ClickEvent> {
        self.clicks.lock().expect("click log poisoned").clone()
    }

    pub fn recorded_count(&self) -> usize {
        self.clicks.lock().expect("click log poisoned").len()
    }
}

impl Default for InMemoryClickRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClickRepository for InMemoryClickRepository {
    async fn insert_batch(&self, clicks: &[ClickEvent]) -> Result<u64, AppError> {
        if self
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(AppError::unavailable("injected click store failure"));
        }

        let mut log = self.clicks.lock().expect("click log poisoned");
        log.extend_from_slice(clicks);
        Ok(clicks.len() as u64)
    }
}
