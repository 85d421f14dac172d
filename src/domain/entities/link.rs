//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL link with metadata.
///
/// Represents the mapping between a short code and a destination URL within a
/// specific domain scope (`domain_id: None` is the default domain). A link
/// with `is_active == false`, a past `expires_at`, or a set `deleted_at` never
/// resolves to a redirect, regardless of any cached state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    /// Owning space (workspace/team namespace).
    pub space_id: i64,
    /// Domain scope for code uniqueness; `None` means the default domain.
    pub domain_id: Option<i64>,
    pub code: String,
    pub long_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// Salted hash of the access password; see [`crate::utils::password`].
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    /// Tracking pixel ids fired by the serving frontend on admission.
    pub pixel_ids: Vec<i64>,
}

impl Link {
    /// Returns true if the link has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns true if the link has passed its expiry at the given instant.
    ///
    /// Expiration is always evaluated against the caller-supplied request
    /// time, never against when the link was loaded or cached.
    pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| at >= e)
    }
}

/// Input data for creating a new link.
///
/// `custom_code: None` requests a generated code; `password` is the plain
/// secret and is hashed by the registry before it reaches any repository.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub space_id: i64,
    pub domain_id: Option<i64>,
    pub long_url: String,
    pub custom_code: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub password: Option<String>,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub pixel_ids: Vec<i64>,
}

impl NewLink {
    /// Creates a minimal link request: active, no expiry, generated code.
    pub fn new(space_id: i64, domain_id: Option<i64>, long_url: String) -> Self {
        Self {
            space_id,
            domain_id,
            long_url,
            custom_code: None,
            title: None,
            description: None,
            tags: Vec::new(),
            password: None,
            is_active: true,
            expires_at: None,
            pixel_ids: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.custom_code = Some(code.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

/// Fully resolved row ready for a conditional insert: the code is chosen and
/// the password is already hashed. Built by the allocator, consumed by
/// [`crate::domain::repositories::LinkRepository::insert`].
#[derive(Debug, Clone)]
pub struct LinkDraft {
    pub space_id: i64,
    pub domain_id: Option<i64>,
    pub code: String,
    pub long_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub pixel_ids: Vec<i64>,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged. Double-`Option` fields distinguish
/// "leave as is" (`None`) from "clear" (`Some(None)`) and "set"
/// (`Some(Some(v))`). `password` carries an already-hashed value by the time
/// it reaches a repository.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub long_url: Option<String>,
    pub title: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub password: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
    pub pixel_ids: Option<Vec<i64>>,
    /// When `true`, clears `deleted_at` to restore a soft-deleted link.
    pub restore: bool,
}

impl LinkPatch {
    /// Applies the patch to a link in place.
    ///
    /// Shared by every repository backend so patch semantics cannot drift
    /// between them.
    pub fn apply_to(&self, link: &mut Link) {
        if let Some(url) = &self.long_url {
            link.long_url = url.clone();
        }
        if let Some(title) = &self.title {
            link.title = title.clone();
        }
        if let Some(description) = &self.description {
            link.description = description.clone();
        }
        if let Some(tags) = &self.tags {
            link.tags = tags.clone();
        }
        if let Some(password_hash) = &self.password {
            link.password_hash = password_hash.clone();
        }
        if let Some(active) = self.is_active {
            link.is_active = active;
        }
        if let Some(expires_at) = self.expires_at {
            link.expires_at = expires_at;
        }
        if let Some(pixel_ids) = &self.pixel_ids {
            link.pixel_ids = pixel_ids.clone();
        }
        if self.restore {
            link.deleted_at = None;
        }
    }
}
