//! # linkgate
//!
//! Short-code allocation and redirect-resolution engine for a URL shortening
//! service.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core business entities and repository traits
//! - **Application Layer** ([`application`]) - Allocation, gating, and redirect orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Database and cache implementations
//!
//! The HTTP surface, authentication, and dashboard are external collaborators:
//! they call into this engine through [`application::services::RedirectService`]
//! and [`application::services::LinkRegistry`] and own all wire formats beyond
//! [`application::services::RedirectOutcome`].
//!
//! ## Features
//!
//! - Collision-safe short-code allocation with bounded retry
//! - Per-domain code namespaces with custom-code support
//! - In-memory LRU+TTL snapshot cache on the redirect hot path
//! - Access gating: active flag, expiration, password protection
//! - Asynchronous, batched click recording that never blocks a redirect
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use chrono::Utc;
//! use linkgate::config::EngineConfig;
//! use linkgate::prelude::*;
//!
//! # async fn run() -> Result<(), linkgate::AppError> {
//! let config = EngineConfig::default();
//!
//! let links = Arc::new(InMemoryLinkRepository::new());
//! let clicks = Arc::new(InMemoryClickRepository::new());
//! let cache: Arc<dyn SnapshotCache> = Arc::new(MemoryCache::new(
//!     config.cache_capacity,
//!     std::time::Duration::from_secs(config.cache_ttl_seconds),
//! ));
//!
//! let registry = Arc::new(LinkRegistry::new(links, cache.clone(), &config));
//! let (recorder, _worker) = ClickRecorder::spawn(clicks, &config);
//! let redirects = RedirectService::new(registry.clone(), cache, recorder, &config);
//!
//! let link = registry
//!     .create(NewLink::new(1, None, "https://example.com/docs".into()))
//!     .await?;
//!
//! let outcome = redirects
//!     .resolve_and_redirect(None, &link.code, Utc::now(), &ClientMetadata::default(), None)
//!     .await?;
//! assert!(matches!(outcome, RedirectOutcome::Redirect { .. }));
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Engine knobs are loaded from environment variables via
//! [`config::EngineConfig::from_env`]. See [`config`] for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod telemetry;
pub mod utils;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::click_recorder::ClickRecorder;
    pub use crate::application::services::{
        CodeAllocator, Decision, DenialReason, LinkRegistry, RedirectOutcome, RedirectService,
    };
    pub use crate::domain::entities::{
        ClickEvent, ClickOutcome, ClientMetadata, Link, LinkPatch, NewLink, ResolvedSnapshot,
    };
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::{MemoryCache, NullCache, SnapshotCache};
    pub use crate::infrastructure::persistence::{InMemoryClickRepository, InMemoryLinkRepository};
}
