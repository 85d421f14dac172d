//! Tracing setup for embedding binaries.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber with `RUST_LOG` filtering and an
/// `info` default. Call once at startup; embedding services that bring their
/// own subscriber should simply skip this.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().expect("static directive")))
        .init();
}
