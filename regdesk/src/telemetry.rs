//! Telemetry initialization (tracing + fmt subscriber).
//!
//! Sets up `tracing-subscriber` with an environment-driven filter and console
//! output. The filter defaults to `info` and can be overridden with the
//! standard `RUST_LOG` variable, e.g.:
//!
//! ```bash
//! RUST_LOG=regdesk=debug,tower_http=debug regdesk -f config.yaml
//! ```

use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process.
///
/// Safe to call once at startup; returns an error if a global subscriber is
/// already installed.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    info!("Telemetry initialized");

    Ok(())
}
