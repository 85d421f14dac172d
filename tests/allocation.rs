mod common;

use linkgate::AppError;
use linkgate::prelude::*;

use common::{memory_cached_engine, seed_link};

#[tokio::test]
async fn test_created_links_get_distinct_codes() {
    let engine = memory_cached_engine();
    let mut codes = std::collections::HashSet::new();

    for i in 0..50 {
        let link = engine
            .registry
            .create(NewLink::new(1, None, format!("https://example.com/{i}")))
            .await
            .unwrap();
        assert!(codes.insert(link.code.clone()), "duplicate code {}", link.code);
        assert_eq!(link.code.len(), 6);
    }
}

#[tokio::test]
async fn test_concurrent_creations_never_collide() {
    let engine = memory_cached_engine();
    let mut handles = Vec::new();

    for i in 0..32 {
        let registry = engine.registry.clone();
        handles.push(tokio::spawn(async move {
            registry
                .create(NewLink::new(1, None, format!("https://example.com/c/{i}")))
                .await
                .unwrap()
        }));
    }

    let mut codes = std::collections::HashSet::new();
    for handle in handles {
        let link = handle.await.unwrap();
        assert!(codes.insert(link.code), "two creations shared a code");
    }
}

#[tokio::test]
async fn test_custom_code_honored() {
    let engine = memory_cached_engine();
    let link = engine
        .registry
        .create(NewLink::new(1, None, "https://example.com".to_string()).with_code("Launch26"))
        .await
        .unwrap();

    assert_eq!(link.code, "Launch26");
}

#[tokio::test]
async fn test_custom_code_conflict_leaves_existing_untouched() {
    let engine = memory_cached_engine();
    let original = seed_link(&engine, "taken", "https://example.com/original");

    let err = engine
        .registry
        .create(
            NewLink::new(1, None, "https://example.com/usurper".to_string()).with_code("taken"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CodeConflict { ref code, .. } if code == "taken"));

    let survivor = engine
        .registry
        .get_by_code(None, "taken")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(survivor.id, original.id);
    assert_eq!(survivor.long_url, "https://example.com/original");
}

#[tokio::test]
async fn test_reserved_custom_code_rejected() {
    let engine = memory_cached_engine();
    let err = engine
        .registry
        .create(NewLink::new(1, None, "https://example.com".to_string()).with_code("admin"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation { .. }));
}

#[tokio::test]
async fn test_same_code_allowed_across_domains() {
    let engine = memory_cached_engine();

    for domain_id in [Some(1), Some(2), None] {
        let new_link =
            NewLink::new(1, domain_id, "https://example.com".to_string()).with_code("promo");
        engine.registry.create(new_link).await.unwrap();
    }
}
