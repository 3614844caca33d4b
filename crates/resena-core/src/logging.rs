//! Tracing subscriber setup.
//!
//! The terminal UI owns stdout/stderr while it runs, so it logs to a file
//! under `$RESENA_HOME/logs`. Plain CLI commands log to stderr on request.

use std::fs;

use anyhow::{Context, Result, anyhow};
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, paths};

/// Environment variable holding a tracing filter (e.g. `resena_core=debug`).
pub const LOG_ENV: &str = "RESENA_LOG";

/// Log file name inside [`paths::logs_dir`].
pub const LOG_FILE: &str = "resena.log";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
}

/// Installs the global subscriber.
///
/// Returns the file writer's guard, which must be held until exit so
/// buffered lines are flushed. Returns `Ok(None)` when file logging is
/// disabled in config (nothing is installed in that case).
///
/// # Errors
/// Fails if the log directory cannot be created or a subscriber is
/// already installed.
pub fn init(config: &LogConfig, target: LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = env_filter(config);
    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|err| anyhow!("Failed to install tracing subscriber: {err}"))?;
            Ok(None)
        }
        LogTarget::File if !config.file => Ok(None),
        LogTarget::File => {
            let dir = paths::logs_dir();
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|err| anyhow!("Failed to install tracing subscriber: {err}"))?;
            Ok(Some(guard))
        }
    }
}

/// `RESENA_LOG` wins over the configured level; an unparseable value falls
/// through to the next source, ending at `info`.
fn env_filter(config: &LogConfig) -> EnvFilter {
    let from_env = std::env::var(LOG_ENV).ok();
    build_filter(from_env.as_deref(), &config.level)
}

fn build_filter(from_env: Option<&str>, level: &str) -> EnvFilter {
    from_env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
