//! Analysis of yt-dlp stderr output
//!
//! Classifies a failed extraction and pulls out the one line worth showing
//! to the administrator.

use crate::core::utils::truncate_chars;

/// Longest reason forwarded to the chat
pub const MAX_REASON_CHARS: usize = 300;

/// yt-dlp error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YtDlpErrorType {
    /// No extractor handles the URL
    UnsupportedUrl,
    /// Private, removed or region-blocked video
    VideoUnavailable,
    /// Site wants a login or cookies
    AuthRequired,
    /// Timeouts, DNS, connection resets
    NetworkError,
    /// Anything else
    Unknown,
}

/// Analyzes yt-dlp stderr and determines the error type
pub fn analyze_ytdlp_error(stderr: &str) -> YtDlpErrorType {
    let stderr_lower = stderr.to_lowercase();

    if stderr_lower.contains("unsupported url") || stderr_lower.contains("is not a valid url") {
        return YtDlpErrorType::UnsupportedUrl;
    }

    if stderr_lower.contains("private video")
        || stderr_lower.contains("video unavailable")
        || stderr_lower.contains("this video is not available")
        || stderr_lower.contains("video has been removed")
        || stderr_lower.contains("http error 404")
    {
        return YtDlpErrorType::VideoUnavailable;
    }

    if stderr_lower.contains("sign in to confirm")
        || stderr_lower.contains("please sign in")
        || stderr_lower.contains("login required")
        || stderr_lower.contains("use --cookies")
        || stderr_lower.contains("http error 403")
    {
        return YtDlpErrorType::AuthRequired;
    }

    if stderr_lower.contains("timed out")
        || stderr_lower.contains("timeout")
        || stderr_lower.contains("connection")
        || stderr_lower.contains("network")
        || stderr_lower.contains("name or service not known")
        || stderr_lower.contains("failed to resolve")
    {
        return YtDlpErrorType::NetworkError;
    }

    YtDlpErrorType::Unknown
}

/// Returns a short label for logs
pub fn error_label(error_type: YtDlpErrorType) -> &'static str {
    match error_type {
        YtDlpErrorType::UnsupportedUrl => "unsupported_url",
        YtDlpErrorType::VideoUnavailable => "video_unavailable",
        YtDlpErrorType::AuthRequired => "auth_required",
        YtDlpErrorType::NetworkError => "network",
        YtDlpErrorType::Unknown => "unknown",
    }
}

/// Extracts the human-readable failure reason from stderr.
///
/// Prefers the first `ERROR:` line, falls back to the last non-empty line.
pub fn summarize_stderr(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().map(str::trim).filter(|line| !line.is_empty()).collect();

    let reason = lines
        .iter()
        .find_map(|line| line.strip_prefix("ERROR:"))
        .map(str::trim)
        .or_else(|| lines.last().copied())
        .unwrap_or("yt-dlp exited without an error message");

    truncate_chars(reason, MAX_REASON_CHARS)
}
