#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use linkgate::config::EngineConfig;
use linkgate::prelude::*;

/// Fully wired engine over in-memory backends.
pub struct Engine {
    pub links: Arc<InMemoryLinkRepository>,
    pub clicks: Arc<InMemoryClickRepository>,
    pub cache: Arc<dyn SnapshotCache>,
    pub registry: Arc<LinkRegistry<InMemoryLinkRepository>>,
    pub redirects: RedirectService<InMemoryLinkRepository>,
}

pub fn test_config() -> EngineConfig {
    EngineConfig {
        click_flush_batch: 4,
        click_flush_interval_ms: 10,
        click_flush_backoff_ms: 5,
        ..EngineConfig::default()
    }
}

pub fn engine_with_cache(cache: Arc<dyn SnapshotCache>, config: &EngineConfig) -> Engine {
    let links = Arc::new(InMemoryLinkRepository::new());
    let clicks = Arc::new(InMemoryClickRepository::new());
    let registry = Arc::new(LinkRegistry::new(links.clone(), cache.clone(), config));
    let (recorder, _worker) = ClickRecorder::spawn(clicks.clone(), config);
    let redirects = RedirectService::new(registry.clone(), cache.clone(), recorder, config);

    Engine {
        links,
        clicks,
        cache,
        registry,
        redirects,
    }
}

pub fn memory_cached_engine() -> Engine {
    let config = test_config();
    engine_with_cache(
        Arc::new(MemoryCache::new(
            config.cache_capacity,
            Duration::from_secs(config.cache_ttl_seconds),
        )),
        &config,
    )
}

pub fn uncached_engine() -> Engine {
    engine_with_cache(Arc::new(NullCache::new()), &test_config())
}

static NEXT_SEED_ID: std::sync::atomic::AtomicI64 = std::sync::atomic::AtomicI64::new(1000);

/// Seeds a live link row directly, bypassing creation-time validation so
/// fixtures can carry states `create` refuses (an already-past expiry, a
/// pre-hashed password).
pub fn seed_link(engine: &Engine, code: &str, url: &str) -> Link {
    let link = Link {
        id: NEXT_SEED_ID.fetch_add(1, std::sync::atomic::Ordering::Relaxed),
        space_id: 1,
        domain_id: None,
        code: code.to_string(),
        long_url: url.to_string(),
        title: None,
        description: None,
        tags: vec![],
        password_hash: None,
        is_active: true,
        expires_at: None,
        created_at: Utc::now(),
        deleted_at: None,
        pixel_ids: vec![],
    };
    engine.links.seed(link.clone());
    link
}

pub fn seed_expired_link(engine: &Engine, code: &str, expired_at: DateTime<Utc>) -> Link {
    let mut link = seed_link(engine, code, "https://example.com/expired");
    link.expires_at = Some(expired_at);
    engine.links.seed(link.clone());
    link
}

pub fn seed_inactive_link(engine: &Engine, code: &str) -> Link {
    let mut link = seed_link(engine, code, "https://example.com/inactive");
    link.is_active = false;
    engine.links.seed(link.clone());
    link
}

/// Resolves a code with default metadata at the current time.
pub async fn resolve(engine: &Engine, code: &str, password: Option<&str>) -> RedirectOutcome {
    engine
        .redirects
        .resolve_and_redirect(None, code, Utc::now(), &ClientMetadata::default(), password)
        .await
        .expect("resolution failed")
}

/// Waits for the click worker to persist at least `n` events.
pub async fn wait_for_clicks(engine: &Engine, n: usize) {
    for _ in 0..200 {
        if engine.clicks.recorded_count() >= n {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!(
        "expected {n} recorded clicks, got {}",
        engine.clicks.recorded_count()
    );
}
