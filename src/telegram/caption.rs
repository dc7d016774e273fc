//! Result caption and fallback notice composition

use crate::core::utils::{escape_markdown_v2, escape_markdown_v2_link_url, truncate_chars};

/// Telegram rejects photo captions above 1024 characters. Escaping can
/// double the title, so it is cut well before that.
const MAX_TITLE_CHARS: usize = 400;

/// MarkdownV2 caption for the result photo.
pub fn compose_caption(title: &str, watch_url: &str) -> String {
    let title = truncate_chars(title, MAX_TITLE_CHARS);
    format!(
        "🎬 {}\n\n▶️ Watch: [{}]({})",
        escape_markdown_v2(&title),
        escape_markdown_v2(watch_url),
        escape_markdown_v2_link_url(watch_url)
    )
}

/// Plain-text notice sent when the result photo could not be delivered.
pub fn compose_send_failure_notice(reason: &str, title: &str, watch_url: &str) -> String {
    format!(
        "Failed to send result photo: {}\n\n🎬 {}\n▶️ Watch: {}",
        reason, title, watch_url
    )
}
