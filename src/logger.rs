//! Logging setup
//!
//! Builds the fern dispatch from the logging configuration: timestamped
//! records go to stderr, or to the configured file.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};

/// Install the global logger according to the configuration.
///
/// A no-op when logging is disabled.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info);

    let dispatch = match &config.file {
        Some(path) => dispatch.chain(
            fern::log_file(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?,
        ),
        None => dispatch.chain(std::io::stderr()),
    };

    dispatch.apply().context("Failed to install logger")?;
    Ok(())
}
