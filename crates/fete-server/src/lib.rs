//! Startup plumbing shared by the `fete` and `fete-check` binaries.

pub mod config;

pub use config::ServerConfig;

/// Load `.env` and install the fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies.
pub fn init(default_filter: &str) {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}
