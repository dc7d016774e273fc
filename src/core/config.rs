use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Reads an environment variable, treating blank values as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Bot token
/// Read from TELEGRAM_BOT_TOKEN, falling back to BOT_TOKEN or TELOXIDE_TOKEN
/// Empty when none is set (fatal at startup)
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    non_empty_var("TELEGRAM_BOT_TOKEN")
        .or_else(|| non_empty_var("BOT_TOKEN"))
        .or_else(|| non_empty_var("TELOXIDE_TOKEN"))
        .unwrap_or_default()
});

/// Cached yt-dlp binary path
/// Read once at startup from YTDL_BIN environment variable or defaults to "yt-dlp"
pub static YTDL_BIN: Lazy<String> = Lazy::new(|| non_empty_var("YTDL_BIN").unwrap_or_else(|| "yt-dlp".to_string()));

/// Optional log file path
/// Read from LOG_FILE_PATH environment variable
/// When unset, logs go to the console only (serverless friendly)
pub static LOG_FILE_PATH: Lazy<Option<String>> = Lazy::new(|| non_empty_var("LOG_FILE_PATH"));

/// Admin configuration
pub mod admin {
    use once_cell::sync::Lazy;
    use teloxide::types::UserId;

    /// Parses the administrator id. Anything that is not a positive integer is rejected.
    pub fn parse_admin_id(raw: &str) -> Option<UserId> {
        raw.trim().parse::<u64>().ok().filter(|id| *id > 0).map(UserId)
    }

    /// The single Telegram user allowed to talk to the bot
    /// Read from ADMIN_USER_ID environment variable
    /// None when unset or invalid: every message is then silently ignored
    pub static ADMIN_USER_ID: Lazy<Option<UserId>> = Lazy::new(|| {
        let raw = super::non_empty_var("ADMIN_USER_ID")?;
        let parsed = parse_admin_id(&raw);
        if parsed.is_none() {
            log::warn!("ADMIN_USER_ID is not a valid user id, all messages will be ignored");
        }
        parsed
    });
}

/// LuluStream API configuration
pub mod lulustream {
    use super::Duration;
    use once_cell::sync::Lazy;

    /// API key
    /// Read from LULU_KEY environment variable
    pub static LULU_KEY: Lazy<Option<String>> = Lazy::new(|| super::non_empty_var("LULU_KEY"));

    /// API base URL, without trailing slash
    /// Read from LULU_API_BASE environment variable
    pub static API_BASE: Lazy<String> = Lazy::new(|| {
        super::non_empty_var("LULU_API_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    });

    /// Base for public watch links, without trailing slash
    /// Read from LULU_WATCH_BASE environment variable
    pub static WATCH_BASE: Lazy<String> = Lazy::new(|| {
        super::non_empty_var("LULU_WATCH_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_WATCH_BASE.to_string())
    });

    pub const DEFAULT_API_BASE: &str = "https://lulustream.com/api";
    pub const DEFAULT_WATCH_BASE: &str = "https://lulustream.com";

    /// Timeout for requests to the LuluStream API (in seconds)
    pub const HTTP_TIMEOUT_SECS: u64 = 15;

    /// LuluStream request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(HTTP_TIMEOUT_SECS)
    }
}

/// Metadata extraction configuration
pub mod download {
    use super::Duration;

    /// Timeout for a yt-dlp metadata extraction (in seconds)
    pub const YTDLP_TIMEOUT_SECS: u64 = 30;

    /// Socket timeout passed to yt-dlp itself (in seconds)
    pub const YTDLP_SOCKET_TIMEOUT_SECS: u64 = 15;

    /// yt-dlp command timeout duration
    pub fn ytdlp_timeout() -> Duration {
        Duration::from_secs(YTDLP_TIMEOUT_SECS)
    }
}

/// Webhook server configuration
pub mod webhook {
    use once_cell::sync::Lazy;

    pub const DEFAULT_PORT: u16 = 8080;

    /// Parses a port number, ignoring anything that is not a valid u16.
    pub fn parse_port(raw: &str) -> Option<u16> {
        raw.trim().parse::<u16>().ok().filter(|port| *port > 0)
    }

    /// Port the webhook server listens on
    /// Read from PORT environment variable
    /// Default: 8080
    pub static PORT: Lazy<u16> = Lazy::new(|| {
        super::non_empty_var("PORT")
            .and_then(|raw| parse_port(&raw))
            .unwrap_or(DEFAULT_PORT)
    });

    /// Public URL Telegram should deliver updates to
    /// Read from BASE_URL environment variable
    pub static BASE_URL: Lazy<Option<String>> = Lazy::new(|| super::non_empty_var("BASE_URL"));
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Telegram Bot API requests (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Bot API server configuration utilities
pub mod bot_api {
    /// Returns the BOT_API_URL environment variable if set.
    pub fn get_url() -> Option<String> {
        super::non_empty_var("BOT_API_URL")
    }

    /// Returns true if the URL points to a local Bot API server.
    pub fn is_local_url(url: &str) -> bool {
        !url.contains("api.telegram.org")
    }
}

/// Masks a secret for logging, keeping only enough to recognise it.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "***".to_string()
    } else {
        format!("{}***", visible)
    }
}
