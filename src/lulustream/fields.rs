//! Tolerant field lookup for LuluStream responses.
//!
//! The API is not consistent about key names or nesting, so every field has
//! an ordered list of candidate keys.

use serde_json::Value;

/// File code keys in an upload `result`
pub const UPLOAD_FILE_CODE_KEYS: &[&str] = &["filecode", "file_code", "fileCode"];

pub const INFO_TITLE_KEYS: &[&str] = &["file_title", "title"];
pub const INFO_THUMBNAIL_KEYS: &[&str] = &["player_img", "thumbnail"];
pub const INFO_FILE_CODE_KEYS: &[&str] = &["file_code", "filecode"];

/// Converts a JSON value to a non-empty string.
///
/// Strings and numbers are accepted; empty strings, `null`, booleans and
/// containers count as missing.
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First candidate key of `object` holding a usable value.
pub fn lookup(object: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| object.get(*key).and_then(value_as_text))
}

/// The object nested under `result`.
///
/// The file info endpoint returns `result` as a list with one entry per
/// requested code; in that case the first entry is used.
pub fn nested_result(data: &Value) -> Option<&Value> {
    let result = data.get("result")?;
    match result {
        Value::Array(items) => items.first().filter(|item| item.is_object()),
        Value::Object(_) => Some(result),
        _ => None,
    }
}

/// Looks `keys` up at the top level first, then under `result`.
pub fn lookup_top_or_nested(data: &Value, keys: &[&str]) -> Option<String> {
    lookup(data, keys).or_else(|| nested_result(data).and_then(|result| lookup(result, keys)))
}
