//! Logging setup for the `log` facade used throughout the crate.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use once_cell::sync::OnceCell;

use crate::config::LoggingConfig;

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Build a dispatch that writes timestamped lines to `log_file` at `level`.
pub fn build_dispatch(level: log::LevelFilter, log_file: &Path) -> Result<fern::Dispatch> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = fern::log_file(log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    Ok(fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(file))
}

/// Install the global logger described by `config`.
///
/// Does nothing when logging is disabled or a logger is already installed.
/// Returns whether this call installed it.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    if !config.enabled || INSTALLED.get().is_some() {
        return Ok(false);
    }

    let dispatch = build_dispatch(config.level_filter()?, &config.log_file_path()?)?;
    dispatch.apply().context("A global logger is already installed")?;
    let _ = INSTALLED.set(());
    Ok(true)
}
