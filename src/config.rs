//! Engine configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any component
//! is constructed. All values have working defaults; the engine runs with an
//! empty environment.
//!
//! ## Variables
//!
//! - `CODE_LENGTH` - Generated short-code length (default: 6)
//! - `CODE_MAX_ATTEMPTS` - Collision retries before giving up (default: 8)
//! - `CACHE_CAPACITY` - Max resident snapshots across all shards (default: 10000)
//! - `CACHE_TTL_SECONDS` - Snapshot freshness bound (default: 45)
//! - `CACHE_SHARDS` - Lock shards for the in-memory cache (default: 16)
//! - `CLICK_QUEUE_CAPACITY` - Click event buffer size (default: 10000, min: 100)
//! - `CLICK_FLUSH_BATCH` - Events per durable write (default: 100)
//! - `CLICK_FLUSH_INTERVAL_MS` - Max time an event sits buffered (default: 500)
//! - `CLICK_FLUSH_MAX_ATTEMPTS` - Write attempts per batch before it is
//!   discarded (default: 3)
//! - `CLICK_FLUSH_BACKOFF_MS` - Base backoff between flush attempts (default: 100)
//! - `ANONYMIZE_IPS` - Truncate client IPs before recording (default: false)
//! - `DATABASE_URL` - PostgreSQL connection string; only needed when the
//!   Postgres repositories are used

use anyhow::{Result, bail};
use std::env;
use std::str::FromStr;

/// Tunable knobs for the allocation, cache, and click-recording pipeline.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Length of generated short codes. Custom codes may be longer, up to
    /// [`crate::utils::code_generator::MAX_CODE_LENGTH`].
    pub code_length: usize,
    /// How many fresh random candidates to try before reporting the code
    /// space as exhausted.
    pub code_max_attempts: u32,
    /// Total snapshot capacity of the resolution cache.
    pub cache_capacity: usize,
    /// TTL after which a resident snapshot is treated as absent.
    pub cache_ttl_seconds: u64,
    /// Number of independently locked cache shards.
    pub cache_shards: usize,
    /// Bound of the click event queue; events beyond it are dropped.
    pub click_queue_capacity: usize,
    /// Flush a batch as soon as it reaches this size.
    pub click_flush_batch: usize,
    /// Flush whatever is buffered at least this often.
    pub click_flush_interval_ms: u64,
    /// Total write attempts per batch (first try included).
    pub click_flush_max_attempts: usize,
    /// Base of the exponential backoff between flush attempts.
    pub click_flush_backoff_ms: u64,
    /// When true, client IPs are truncated (IPv4 /24, IPv6 /48) before a
    /// click event is enqueued.
    pub anonymize_ips: bool,
    /// PostgreSQL connection string for the durable repositories.
    pub database_url: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            code_max_attempts: 8,
            cache_capacity: 10_000,
            cache_ttl_seconds: 45,
            cache_shards: 16,
            click_queue_capacity: 10_000,
            click_flush_batch: 100,
            click_flush_interval_ms: 500,
            click_flush_max_attempts: 3,
            click_flush_backoff_ms: 100,
            anonymize_ips: false,
            database_url: None,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration fails [`Self::validate`].
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let config = Self {
            code_length: env_or("CODE_LENGTH", defaults.code_length),
            code_max_attempts: env_or("CODE_MAX_ATTEMPTS", defaults.code_max_attempts),
            cache_capacity: env_or("CACHE_CAPACITY", defaults.cache_capacity),
            cache_ttl_seconds: env_or("CACHE_TTL_SECONDS", defaults.cache_ttl_seconds),
            cache_shards: env_or("CACHE_SHARDS", defaults.cache_shards),
            click_queue_capacity: env_or("CLICK_QUEUE_CAPACITY", defaults.click_queue_capacity),
            click_flush_batch: env_or("CLICK_FLUSH_BATCH", defaults.click_flush_batch),
            click_flush_interval_ms: env_or(
                "CLICK_FLUSH_INTERVAL_MS",
                defaults.click_flush_interval_ms,
            ),
            click_flush_max_attempts: env_or(
                "CLICK_FLUSH_MAX_ATTEMPTS",
                defaults.click_flush_max_attempts,
            ),
            click_flush_backoff_ms: env_or(
                "CLICK_FLUSH_BACKOFF_MS",
                defaults.click_flush_backoff_ms,
            ),
            anonymize_ips: env::var("ANONYMIZE_IPS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(defaults.anonymize_ips),
            database_url: env::var("DATABASE_URL").ok(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Sanity-checks the configuration before the engine starts.
    pub fn validate(&self) -> Result<()> {
        if self.code_length == 0 || self.code_length > crate::utils::code_generator::MAX_CODE_LENGTH
        {
            bail!(
                "CODE_LENGTH must be between 1 and {}",
                crate::utils::code_generator::MAX_CODE_LENGTH
            );
        }
        if self.code_max_attempts == 0 {
            bail!("CODE_MAX_ATTEMPTS must be at least 1");
        }
        if self.cache_capacity == 0 {
            bail!("CACHE_CAPACITY must be at least 1");
        }
        if self.cache_shards == 0 {
            bail!("CACHE_SHARDS must be at least 1");
        }
        if self.click_queue_capacity < 100 {
            bail!("CLICK_QUEUE_CAPACITY must be at least 100");
        }
        if self.click_flush_batch == 0 {
            bail!("CLICK_FLUSH_BATCH must be at least 1");
        }
        if self.click_flush_max_attempts == 0 {
            bail!("CLICK_FLUSH_MAX_ATTEMPTS must be at least 1");
        }
        Ok(())
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
