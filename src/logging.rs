use anyhow::{anyhow, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `config.log`. The returned guard flushes
/// the file writer on drop and must be held until shutdown.
pub fn init(config: &Config) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log))
        .unwrap_or_else(|e| {
            eprintln!(
                "WARN: log filter '{}' is invalid ({}); falling back to 'info'",
                config.log, e
            );
            EnvFilter::new("info")
        });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "msgboard.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);

            builder
                .with_ansi(false)
                .with_writer(writer)
                .try_init()
                .map_err(|e| anyhow!("failed to install log subscriber: {e}"))?;

            Ok(Some(guard))
        }
        None => {
            builder
                .try_init()
                .map_err(|e| anyhow!("failed to install log subscriber: {e}"))?;

            Ok(None)
        }
    }
}
