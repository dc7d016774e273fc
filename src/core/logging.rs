//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console, plus a file when LOG_FILE_PATH is set)
//! - A startup summary of the configuration with secrets masked

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::core::config;

/// Initialize the logger
///
/// # Arguments
/// * `log_file_path` - Optional path to a log file written alongside the console
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to create the log file or install the logger
pub fn init_logger(log_file_path: Option<&str>) -> Result<()> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file_path {
        let log_file = File::create(path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;
        loggers.push(WriteLogger::new(LevelFilter::Info, Config::default(), log_file));
    }

    CombinedLogger::init(loggers).map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at startup
///
/// Never prints secrets in full: the bot token and API key are masked.
pub fn log_startup_configuration() {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("Configuration Check");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if config::BOT_TOKEN.is_empty() {
        log::error!("❌ TELEGRAM_BOT_TOKEN: not set");
    } else {
        log::info!("✅ TELEGRAM_BOT_TOKEN: {}", config::mask_secret(&config::BOT_TOKEN));
    }

    match *config::admin::ADMIN_USER_ID {
        Some(admin) => log::info!("✅ ADMIN_USER_ID: {}", admin.0),
        None => log::warn!("⚠️  ADMIN_USER_ID: not set, every message will be ignored"),
    }

    match config::lulustream::LULU_KEY.as_deref() {
        Some(key) => log::info!("✅ LULU_KEY: {}", config::mask_secret(key)),
        None => log::warn!("⚠️  LULU_KEY: not set, uploads will fail"),
    }

    log::info!("   LULU_API_BASE: {}", *config::lulustream::API_BASE);
    log::info!("   LULU_WATCH_BASE: {}", *config::lulustream::WATCH_BASE);
    log::info!("   YTDL_BIN: {}", *config::YTDL_BIN);

    if let Some(url) = config::bot_api::get_url() {
        log::info!("   BOT_API_URL: {}", url);
    }
    if let Some(ref base_url) = *config::webhook::BASE_URL {
        log::info!("   BASE_URL: {}", base_url);
    }
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::NamedTempFile;

    #[test]
    fn test_init_logger_with_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        // A logger may already be installed by another test in this binary
        let result = init_logger(Some(path));
        assert!(result.is_ok() || result.unwrap_err().to_string().contains("initialize logger"));
    }

    #[test]
    fn test_init_logger_rejects_unwritable_path() {
        let result = init_logger(Some("/nonexistent-dir/lulurelay.log"));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to create log file"), "got: {}", err);
    }
}
