//! lulurelay - Telegram webhook bot that mirrors videos to LuluStream
//!
//! An administrator sends a video page URL or a direct video URL. The bot
//! extracts metadata with yt-dlp (nothing is downloaded), picks the best
//! direct format, asks LuluStream to fetch it remotely and replies with the
//! hosted file's thumbnail and watch link.
//!
//! # Modules
//!
//! - [`core`]: Configuration, errors, logging and text utilities
//! - [`download`]: yt-dlp metadata extraction and format selection
//! - [`lulustream`]: Remote upload and file info client
//! - [`telegram`]: Message orchestration and the webhook

pub mod cli;
pub mod core;
pub mod download;
pub mod lulustream;
pub mod telegram;

// Re-export commonly used items for convenience
pub use crate::core::{config, AppError, AppResult};
pub use download::{select_best_direct_format, MetadataExtractor, YtDlpExtractor};
pub use lulustream::{FileInfo, LuluClient, LuluError};
pub use telegram::{HandlerDeps, WebhookState};
