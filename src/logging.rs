//! File logging
//!
//! The terminal belongs to the UI, so every tracing event goes to a daily
//! rolling file instead. `RUST_LOG` overrides the default filter.

use std::env;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_DIR_VAR: &str = "DATA_CONSOLE_LOG_DIR";
const LOG_FILE_PREFIX: &str = "data-console.log";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_dir: PathBuf,
    /// Used when `RUST_LOG` is unset or unparsable
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(env::var_os(LOG_DIR_VAR).map(PathBuf::from)),
            default_filter: "info,data_console=debug".to_string(),
        }
    }
}

fn default_log_dir(override_dir: Option<PathBuf>) -> PathBuf {
    override_dir.unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("data-console")
            .join("logs")
    })
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// or buffered lines are lost.
pub fn init(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    fs::create_dir_all(&config.log_dir)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_names(true)
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init()?;

    tracing::info!(log_dir = %config.log_dir.display(), "logging initialized");
    Ok(guard)
}
