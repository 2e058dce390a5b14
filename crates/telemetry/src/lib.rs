//! Tracing subscriber bootstrap.
//!
//! `RUST_LOG` wins over the configured `LOG_LEVEL` so that operators can
//! narrow a single target without touching the deployment config.

use anyhow::Context;
use gateway_kernel::settings::{LogFormat, Settings};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Build the filter used by [`init`].
pub fn env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid LOG_LEVEL directive '{level}'")),
    }
}

/// Install the global subscriber. Calling it twice is an error.
pub fn init(settings: &Settings) -> anyhow::Result<()> {
    let filter = env_filter(&settings.log_level)?;
    let registry = tracing_subscriber::registry().with(filter);

    match settings.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
    }
    .context("failed to install tracing subscriber")?;

    tracing::debug!(
        target: "gateway-telemetry",
        environment = settings.environment.as_str(),
        level = %settings.log_level,
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}
