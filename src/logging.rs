//! Logging configuration using tracing
//!
//! The terminal belongs to the UI, so logs go to a daily rolling file under
//! `~/.portfolio-tui/logs/`. The level is controlled by `PORTFOLIO_LOG`:
//!
//! ```bash
//! PORTFOLIO_LOG=debug portfolio-tui
//! ```

use crate::config::Config;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem
pub fn init() -> Result<PathBuf> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "portfolio-tui.log");

    let env_filter = EnvFilter::try_from_env("PORTFOLIO_LOG")
        .unwrap_or_else(|_| EnvFilter::new("portfolio_tui=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("portfolio-tui {} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Log directory: {}", log_dir.display());

    Ok(log_dir)
}

fn log_directory() -> PathBuf {
    Config::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logs")
}
