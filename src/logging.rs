//! Logging setup

use crate::Result;
use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber. `RUST_LOG` wins over `default_level` when set.
pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Error initializing logging: {e}"))?;

    Ok(())
}
