mod common;

use chrono::{Duration, Utc};
use linkgate::prelude::*;

use common::{memory_cached_engine, resolve, seed_expired_link, seed_inactive_link, seed_link};

#[tokio::test]
async fn test_create_then_resolve() {
    let engine = memory_cached_engine();
    let link = engine
        .registry
        .create(NewLink::new(1, None, "https://example.com/target".to_string()))
        .await
        .unwrap();

    let outcome = resolve(&engine, &link.code, None).await;
    assert_eq!(
        outcome,
        RedirectOutcome::Redirect {
            long_url: "https://example.com/target".to_string()
        }
    );
}

#[tokio::test]
async fn test_unknown_code_not_found() {
    let engine = memory_cached_engine();
    assert_eq!(resolve(&engine, "missing", None).await, RedirectOutcome::NotFound);
}

#[tokio::test]
async fn test_inactive_link_denied() {
    let engine = memory_cached_engine();
    seed_inactive_link(&engine, "paused");

    assert_eq!(
        resolve(&engine, "paused", None).await,
        RedirectOutcome::Denied {
            reason: DenialReason::Inactive
        }
    );
}

#[tokio::test]
async fn test_expired_link_denied() {
    let engine = memory_cached_engine();
    seed_expired_link(&engine, "stale", Utc::now() - Duration::hours(1));

    assert_eq!(
        resolve(&engine, "stale", None).await,
        RedirectOutcome::Denied {
            reason: DenialReason::Expired
        }
    );
}

#[tokio::test]
async fn test_password_protected_flow() {
    let engine = memory_cached_engine();
    let link = engine
        .registry
        .create(
            NewLink::new(1, None, "https://example.com/secret".to_string())
                .with_password("hunter2"),
        )
        .await
        .unwrap();

    assert_eq!(
        resolve(&engine, &link.code, None).await,
        RedirectOutcome::Denied {
            reason: DenialReason::PasswordRequired
        }
    );
    assert_eq!(
        resolve(&engine, &link.code, Some("wrong")).await,
        RedirectOutcome::Denied {
            reason: DenialReason::PasswordWrong
        }
    );
    assert!(matches!(
        resolve(&engine, &link.code, Some("hunter2")).await,
        RedirectOutcome::Redirect { .. }
    ));
}

#[tokio::test]
async fn test_expiry_beats_cache_freshness() {
    let engine = memory_cached_engine();
    let expiry = Utc::now() + Duration::milliseconds(100);
    seed_expired_link(&engine, "closing", expiry);

    // Warm the cache while the link is still admissible.
    let before = engine
        .redirects
        .resolve_and_redirect(
            None,
            "closing",
            Utc::now(),
            &ClientMetadata::default(),
            None,
        )
        .await
        .unwrap();
    assert!(matches!(before, RedirectOutcome::Redirect { .. }));

    // Well inside the cache TTL, but past the link's own expiry.
    let after = engine
        .redirects
        .resolve_and_redirect(
            None,
            "closing",
            expiry + Duration::seconds(1),
            &ClientMetadata::default(),
            None,
        )
        .await
        .unwrap();
    assert_eq!(
        after,
        RedirectOutcome::Denied {
            reason: DenialReason::Expired
        }
    );
}

#[tokio::test]
async fn test_update_visible_despite_warm_cache() {
    let engine = memory_cached_engine();
    let link = engine
        .registry
        .create(NewLink::new(1, None, "https://example.com/v1".to_string()))
        .await
        .unwrap();

    assert!(matches!(
        resolve(&engine, &link.code, None).await,
        RedirectOutcome::Redirect { .. }
    ));

    engine
        .registry
        .update(
            None,
            &link.code,
            LinkPatch {
                long_url: Some("https://example.com/v2".to_string()),
                ..LinkPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(
        resolve(&engine, &link.code, None).await,
        RedirectOutcome::Redirect {
            long_url: "https://example.com/v2".to_string()
        }
    );
}

#[tokio::test]
async fn test_deactivation_takes_effect_immediately() {
    let engine = memory_cached_engine();
    let link = engine
        .registry
        .create(NewLink::new(1, None, "https://example.com".to_string()))
        .await
        .unwrap();

    assert!(matches!(
        resolve(&engine, &link.code, None).await,
        RedirectOutcome::Redirect { .. }
    ));

    engine.registry.set_active(None, &link.code, false).await.unwrap();
    assert_eq!(
        resolve(&engine, &link.code, None).await,
        RedirectOutcome::Denied {
            reason: DenialReason::Inactive
        }
    );

    engine.registry.set_active(None, &link.code, true).await.unwrap();
    assert!(matches!(
        resolve(&engine, &link.code, None).await,
        RedirectOutcome::Redirect { .. }
    ));
}

#[tokio::test]
async fn test_soft_deleted_link_resolves_not_found() {
    let engine = memory_cached_engine();
    let link = engine
        .registry
        .create(NewLink::new(1, None, "https://example.com".to_string()))
        .await
        .unwrap();

    // Warm the cache, then delete.
    assert!(matches!(
        resolve(&engine, &link.code, None).await,
        RedirectOutcome::Redirect { .. }
    ));
    assert!(engine.registry.soft_delete(None, &link.code).await.unwrap());

    assert_eq!(resolve(&engine, &link.code, None).await, RedirectOutcome::NotFound);
}

#[tokio::test]
async fn test_restored_link_resolves_again() {
    let engine = memory_cached_engine();
    let link = engine
        .registry
        .create(NewLink::new(1, None, "https://example.com".to_string()))
        .await
        .unwrap();

    engine.registry.soft_delete(None, &link.code).await.unwrap();
    assert_eq!(resolve(&engine, &link.code, None).await, RedirectOutcome::NotFound);

    engine
        .registry
        .update(
            None,
            &link.code,
            LinkPatch {
                restore: true,
                ..LinkPatch::default()
            },
        )
        .await
        .unwrap();

    assert!(matches!(
        resolve(&engine, &link.code, None).await,
        RedirectOutcome::Redirect { .. }
    ));
}

#[tokio::test]
async fn test_domain_scoping_isolates_codes() {
    let engine = memory_cached_engine();
    engine
        .registry
        .create(
            NewLink::new(1, Some(1), "https://one.example.com".to_string()).with_code("promo"),
        )
        .await
        .unwrap();

    let scoped = engine
        .redirects
        .resolve_and_redirect(Some(1), "promo", Utc::now(), &ClientMetadata::default(), None)
        .await
        .unwrap();
    assert!(matches!(scoped, RedirectOutcome::Redirect { .. }));

    // Same code under the default domain does not exist.
    assert_eq!(resolve(&engine, "promo", None).await, RedirectOutcome::NotFound);

    let _ = seed_link(&engine, "promo", "https://default.example.com");
    assert_eq!(
        resolve(&engine, "promo", None).await,
        RedirectOutcome::Redirect {
            long_url: "https://default.example.com".to_string()
        }
    );
}
