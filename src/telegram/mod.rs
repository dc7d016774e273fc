//! Telegram bot integration: bot setup, message handling and the webhook

pub mod bot;
pub mod caption;
pub mod handlers;
pub mod webhook;

// Re-exports for convenience
pub use bot::{create_bot, register_webhook};
pub use handlers::{handle_message, HandlerDeps, PipelineError};
pub use webhook::{process_update, router, serve, WebhookState};
