//! Logging setup.
//!
//! Interactive runs keep the terminal clean: tracing output goes to stderr at
//! the configured level, or to rotating files under `~/.podium/logs/` when
//! `--debug` or a log file is configured. The returned guard must stay alive
//! for the lifetime of the process so buffered file output is flushed.

use crate::config::{LoggingConfig, podium_home};
use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
pub fn init(config: &LoggingConfig, debug: bool) -> Result<Option<WorkerGuard>> {
    let directive = if debug {
        "podium=debug".to_string()
    } else {
        format!("podium={}", config.level)
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    if debug || config.file.is_some() {
        let appender = match &config.file {
            Some(path) => {
                let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
                let name = path
                    .file_name()
                    .context("Log file path has no file name")?;
                std::fs::create_dir_all(dir.unwrap_or(Path::new(".")))?;
                tracing_appender::rolling::never(dir.unwrap_or(Path::new(".")), name)
            }
            None => {
                let dir = podium_home().join("logs");
                std::fs::create_dir_all(&dir)?;
                tracing_appender::rolling::daily(dir, "podium.log")
            }
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Ok(Some(guard))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        Ok(None)
    }
}
