//! Subscriber setup for the CLI.

use std::path::Path;

use anyhow::Result;
use jobsentry_core::config::{DEFAULT_LOG_FILTER, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "jobsentry.log";

/// Installs the global subscriber: stderr always, plus a daily-rolling file
/// under `log_dir` when enabled.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the program.
pub fn init(config: &LoggingConfig, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(&config.filter);
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    match log_dir.filter(|_| config.file) {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()?;
            Ok(None)
        }
    }
}

/// Parses `directive`, falling back to the default level when invalid.
fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|err| {
        eprintln!("Invalid log filter '{directive}' ({err}), using '{DEFAULT_LOG_FILTER}'");
        EnvFilter::new(DEFAULT_LOG_FILTER)
    })
}
