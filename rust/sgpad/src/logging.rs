//! `tracing` setup. Stdout carries the IPC protocol, so every log line goes to
//! stderr.

use crate::config::{ConfigError, DaemonConfig, LogFormat};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(cfg: &DaemonConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&cfg.log_filter)
        .map_err(|e| ConfigError::BadLogFilter(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(filter);
    match cfg.log_format {
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_target(false),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
    }
    Ok(())
}
