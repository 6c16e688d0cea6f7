//! Tracing setup.
//!
//! `RUST_LOG` wins over the configured filter. Output goes to stderr, or to
//! `<directory>/marquee.YYYY-MM-DD` with daily rotation when a directory is
//! configured.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use marquee_core::config::LoggingConfig;

use crate::RuntimeError;

const LOG_FILE_PREFIX: &str = "marquee";

/// Install the global subscriber. Keep the returned guard alive for as long
/// as file logging should flush.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>, RuntimeError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let Some(dir) = &config.directory else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| RuntimeError::Logging(e.to_string()))?;
        return Ok(None);
    };

    std::fs::create_dir_all(dir).map_err(|e| RuntimeError::Logging(e.to_string()))?;
    let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .map_err(|e| RuntimeError::Logging(e.to_string()))?;

    tracing::info!(dir = %dir.display(), "file logging initialized");
    Ok(Some(guard))
}
