//! Metadata extraction through the yt-dlp binary.
//!
//! The extractor only ever asks for metadata (`--dump-single-json
//! --skip-download`); nothing is downloaded to disk.

use async_trait::async_trait;
use serde_json::Value;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

use crate::core::config;
use crate::download::ytdlp_errors::{analyze_ytdlp_error, error_label, summarize_stderr, YtDlpErrorType};

/// Why a metadata extraction failed
#[derive(Debug, Error)]
pub enum ExtractError {
    /// yt-dlp ran and reported an error
    #[error("yt-dlp failed to extract info: {reason}")]
    Failed { kind: YtDlpErrorType, reason: String },

    #[error("yt-dlp timed out after {0} seconds")]
    Timeout(u64),

    /// yt-dlp succeeded but stdout was not a metadata object
    #[error("yt-dlp returned invalid metadata.")]
    InvalidMetadata,

    /// yt-dlp could not be run at all
    #[error("yt-dlp extraction error: {0}")]
    Unexpected(String),
}

/// Raw yt-dlp info dict
#[derive(Debug, Clone)]
pub struct VideoMetadata {
    raw: Value,
}

impl VideoMetadata {
    /// Wraps an info dict. Returns `None` unless the value is a JSON object.
    pub fn from_json(raw: Value) -> Option<Self> {
        raw.is_object().then_some(Self { raw })
    }

    /// The `formats` list; empty when absent or not a list.
    pub fn formats(&self) -> &[Value] {
        self.raw
            .get("formats")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn title(&self) -> Option<&str> {
        self.raw.get("title").and_then(Value::as_str)
    }
}

/// Source of video metadata for a page or direct URL.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<VideoMetadata, ExtractError>;
}

/// [`MetadataExtractor`] backed by the yt-dlp command line tool.
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    bin: String,
    timeout: Duration,
}

impl YtDlpExtractor {
    pub fn new(bin: impl Into<String>, timeout: Duration) -> Self {
        Self {
            bin: bin.into(),
            timeout,
        }
    }

    /// Extractor using `YTDL_BIN` and the default extraction timeout.
    pub fn from_env() -> Self {
        Self::new(config::YTDL_BIN.as_str(), config::download::ytdlp_timeout())
    }

    fn build_args(url: &str) -> Vec<String> {
        vec![
            "--dump-single-json".to_string(),
            "--skip-download".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            "--socket-timeout".to_string(),
            config::download::YTDLP_SOCKET_TIMEOUT_SECS.to_string(),
            // Stop option parsing so a URL can never be read as a flag
            "--".to_string(),
            url.to_string(),
        ]
    }
}

#[async_trait]
impl MetadataExtractor for YtDlpExtractor {
    async fn extract(&self, url: &str) -> Result<VideoMetadata, ExtractError> {
        let args = Self::build_args(url);
        log::debug!("yt-dlp command for metadata: {} {}", self.bin, args.join(" "));

        let mut command = TokioCommand::new(&self.bin);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                log::error!("Failed to execute {}: {}", self.bin, e);
                return Err(ExtractError::Unexpected(e.to_string()));
            }
            Err(_) => {
                log::warn!("yt-dlp timed out after {:?} for {}", self.timeout, url);
                return Err(ExtractError::Timeout(self.timeout.as_secs()));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let kind = analyze_ytdlp_error(&stderr);
            log::error!(
                "yt-dlp exited with {} for {}, error type: {}",
                output.status,
                url,
                error_label(kind)
            );
            log::error!("yt-dlp stderr: {}", stderr);
            return Err(ExtractError::Failed {
                kind,
                reason: summarize_stderr(&stderr),
            });
        }

        let raw: Value = serde_json::from_slice(&output.stdout).map_err(|e| {
            log::warn!("Failed to parse yt-dlp JSON output: {}", e);
            ExtractError::InvalidMetadata
        })?;

        let metadata = VideoMetadata::from_json(raw).ok_or(ExtractError::InvalidMetadata)?;
        log::info!(
            "yt-dlp extracted metadata for {:?} ({} formats)",
            metadata.title().unwrap_or("untitled"),
            metadata.formats().len()
        );
        Ok(metadata)
    }
}
