/// Characters Telegram MarkdownV2 treats as markup outside of code and links.
pub const MARKDOWN_V2_RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escapes text for Telegram MarkdownV2.
///
/// Every reserved character is prefixed with a backslash:
/// `_`, `*`, `[`, `]`, `(`, `)`, `~`, `` ` ``, `>`, `#`, `+`, `-`, `=`, `|`, `{`, `}`, `.`, `!`
///
/// The backslash itself is escaped as well, otherwise a title ending in `\`
/// would swallow the next character of the caption.
///
/// # Example
///
/// ```
/// use lulurelay::core::utils::escape_markdown_v2;
///
/// let escaped = escape_markdown_v2("Hello. World!");
/// assert_eq!(escaped, "Hello\\. World\\!");
/// ```
pub fn escape_markdown_v2(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if c == '\\' || MARKDOWN_V2_RESERVED.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

/// Escapes the URL part of a MarkdownV2 inline link, `[text](url)`.
///
/// Inside the parentheses only `)` and `\` are special.
pub fn escape_markdown_v2_link_url(url: &str) -> String {
    let mut result = String::with_capacity(url.len());

    for c in url.chars() {
        if c == ')' || c == '\\' {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

/// Reverses [`escape_markdown_v2`]: drops every escaping backslash.
pub fn unescape_markdown_v2(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                result.push(next);
                continue;
            }
        }
        result.push(c);
    }

    result
}

/// Shortens `text` to at most `max_chars` characters, appending `…` when cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
