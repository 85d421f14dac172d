//! Immutable link projection cached on the redirect hot path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::link::Link;

/// Cache-friendly projection of a [`Link`] holding exactly the fields the
/// access gate needs.
///
/// Owned by the resolution cache as `Arc<ResolvedSnapshot>`; never mutated in
/// place. Any change to the underlying link produces a new snapshot that
/// replaces the old one atomically (or invalidates it outright).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedSnapshot {
    pub link_id: i64,
    pub code: String,
    pub long_url: String,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub password_hash: Option<String>,
}

impl ResolvedSnapshot {
    /// Projects a full link record down to its resolution-relevant fields.
    pub fn of(link: &Link) -> Self {
        Self {
            link_id: link.id,
            code: link.code.clone(),
            long_url: link.long_url.clone(),
            is_active: link.is_active,
            expires_at: link.expires_at,
            password_hash: link.password_hash.clone(),
        }
    }

    /// Returns true if admission requires a password.
    pub fn requires_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Returns true if the link is expired at the given instant.
    pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| at >= e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_link() -> Link {
        Link {
            id: 42,
            space_id: 1,
            domain_id: Some(2),
            code: "xyz789".to_string(),
            long_url: "https://example.com/page".to_string(),
            title: Some("ignored by the snapshot".to_string()),
            description: None,
            tags: vec!["a".to_string()],
            password_hash: Some("salt$digest".to_string()),
            is_active: true,
            expires_at: Some(Utc::now() + Duration::hours(1)),
            created_at: Utc::now(),
            deleted_at: None,
            pixel_ids: vec![9],
        }
    }

    #[test]
    fn test_projection_keeps_gate_fields() {
        let link = sample_link();
        let snapshot = ResolvedSnapshot::of(&link);

        assert_eq!(snapshot.link_id, 42);
        assert_eq!(snapshot.code, "xyz789");
        assert_eq!(snapshot.long_url, "https://example.com/page");
        assert!(snapshot.is_active);
        assert!(snapshot.requires_password());
        assert_eq!(snapshot.expires_at, link.expires_at);
    }

    #[test]
    fn test_requires_password_false_without_hash() {
        let mut link = sample_link();
        link.password_hash = None;
        assert!(!ResolvedSnapshot::of(&link).requires_password());
    }

    #[test]
    fn test_expiry_against_request_time() {
        let mut link = sample_link();
        let expiry = Utc::now();
        link.expires_at = Some(expiry);
        let snapshot = ResolvedSnapshot::of(&link);

        assert!(!snapshot.is_expired_at(expiry - Duration::seconds(1)));
        assert!(snapshot.is_expired_at(expiry + Duration::seconds(1)));
    }
}
