//! Admin message handling: guard, acknowledge, run the pipeline, reply.

use futures_util::FutureExt;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use teloxide::prelude::*;
use teloxide::types::{InputFile, ParseMode};
use teloxide::RequestError;
use url::Url;

use super::pipeline::run_pipeline;
use super::types::HandlerDeps;
use crate::core::error::AppResult;
use crate::lulustream::FileInfo;
use crate::telegram::caption::{compose_caption, compose_send_failure_notice};

pub const USAGE_PROMPT: &str = "Please send a valid video page URL or a direct video URL.";
pub const PROCESSING_NOTICE: &str = "Processing URL: extracting metadata (no download)...";
pub const UNEXPECTED_ERROR_NOTICE: &str = "An unexpected error occurred. Check server logs for details.";

/// First http(s) URL in `text`, or the whole (trimmed) text when there is none.
pub fn pick_target(text: &str) -> &str {
    text.split_whitespace()
        .find(|token| {
            Url::parse(token)
                .map(|url| matches!(url.scheme(), "http" | "https"))
                .unwrap_or(false)
        })
        .unwrap_or_else(|| text.trim())
}

/// Handles one incoming message.
///
/// Errors are logged and, for the admin, answered with a generic notice. A
/// panic gets the same notice and is then resumed, so the caller still sees
/// the task fail.
pub async fn handle_message(bot: &Bot, msg: &Message, deps: &HandlerDeps) {
    let outcome = AssertUnwindSafe(process_message(bot, msg, deps)).catch_unwind().await;

    let panicked = match outcome {
        Ok(Ok(())) => return,
        Ok(Err(e)) => {
            log::error!("Failed to process message {} in chat {}: {}", msg.id.0, msg.chat.id, e);
            None
        }
        Err(payload) => {
            log::error!(
                "Panic while processing message {} in chat {}: {}",
                msg.id.0,
                msg.chat.id,
                panic_message(payload.as_ref())
            );
            Some(payload)
        }
    };

    if deps.is_admin(msg.from.as_ref()) {
        if let Err(notify_err) = bot.send_message(msg.chat.id, UNEXPECTED_ERROR_NOTICE).await {
            log::error!("Failed to send error notice to chat {}: {}", msg.chat.id, notify_err);
        }
    }

    if let Some(payload) = panicked {
        panic::resume_unwind(payload);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Processes a message and lets reply failures propagate.
pub async fn process_message(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> AppResult<()> {
    let Some(text) = msg.text() else {
        log::debug!("Ignoring non-text message {}", msg.id.0);
        return Ok(());
    };

    if text.starts_with('/') {
        log::debug!("Ignoring command message {}", msg.id.0);
        return Ok(());
    }

    if !deps.is_admin(msg.from.as_ref()) {
        log::debug!(
            "Ignoring message from unauthorized user {:?}",
            msg.from.as_ref().map(|user| user.id.0)
        );
        return Ok(());
    }

    let chat_id = msg.chat.id;
    let text = text.trim();
    if text.is_empty() {
        bot.send_message(chat_id, USAGE_PROMPT).await?;
        return Ok(());
    }

    let target = pick_target(text);
    bot.send_message(chat_id, PROCESSING_NOTICE).await?;

    let info = match run_pipeline(deps, target).await {
        Ok(info) => info,
        Err(e) => {
            log::warn!("Pipeline stopped at {} stage ({}): {}", e.stage(), e.subcategory(), e);
            bot.send_message(chat_id, e.to_string()).await?;
            return Ok(());
        }
    };

    deliver_result(bot, chat_id, deps, &info).await
}

/// Sends the thumbnail with its caption to the admin, falling back to a
/// plain-text notice in `reply_chat` when Telegram refuses the photo.
async fn deliver_result(bot: &Bot, reply_chat: ChatId, deps: &HandlerDeps, info: &FileInfo) -> AppResult<()> {
    let Some(admin) = deps.admin_user_id else {
        return Ok(());
    };

    let watch_url = deps.watch_url(&info.file_code);
    let caption = compose_caption(&info.title, &watch_url);

    let sent = match Url::parse(&info.thumbnail_url) {
        Ok(photo_url) => bot
            .send_photo(ChatId::from(admin), InputFile::url(photo_url))
            .caption(caption)
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map(|_| ())
            .map_err(|e| {
                log::error!("sendPhoto failed: {}", e);
                send_failure_reason(&e)
            }),
        Err(e) => Err(format!("invalid thumbnail URL ({})", e)),
    };

    match sent {
        Ok(()) => {
            log::info!("Delivered {} to admin chat", watch_url);
            Ok(())
        }
        Err(reason) => {
            let notice = compose_send_failure_notice(&reason, &info.title, &watch_url);
            bot.send_message(reply_chat, notice).await?;
            Ok(())
        }
    }
}

/// Reason shown to the admin. Network errors are summarized since their text
/// may include the request URL, which carries the bot token.
fn send_failure_reason(err: &RequestError) -> String {
    match err {
        RequestError::Api(api_err) => api_err.to_string(),
        RequestError::Network(_) => "network error".to_string(),
        _ => "request failed".to_string(),
    }
}
