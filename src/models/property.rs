//! Property extractors for database-backed pages.
//!
//! Each function takes the property object as returned by Notion (for
//! example `{"id": "...", "type": "status", "status": {...}}`) and never
//! fails: missing or null values produce an empty string or list.

use super::rich_text::plain_text;
use serde_json::Value;

/// Text of a `title` property.
pub fn title(prop: &Value) -> String {
    plain_text(&prop["title"])
}

/// Text of a `rich_text` property.
pub fn rich_text(prop: &Value) -> String {
    plain_text(&prop["rich_text"])
}

/// Selected option name of a `status` property.
pub fn status(prop: &Value) -> String {
    option_name(&prop["status"])
}

/// Selected option name of a `select` property.
pub fn select(prop: &Value) -> String {
    option_name(&prop["select"])
}

/// Option names of a `multi_select` property, in server order.
pub fn multi_select(prop: &Value) -> Vec<String> {
    names(&prop["multi_select"])
}

/// Display names of a `people` property, in server order.
pub fn people(prop: &Value) -> Vec<String> {
    names(&prop["people"])
}

/// Timestamp stored under `key`, e.g. `last_edited_time` or `created_time`.
pub fn timestamp(prop: &Value, key: &str) -> String {
    prop[key].as_str().unwrap_or_default().to_string()
}

fn option_name(option: &Value) -> String {
    option["name"].as_str().unwrap_or_default().to_string()
}

// Entries without a name (bots, deleted users) are skipped.
fn names(entries: &Value) -> Vec<String> {
    entries
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry["name"].as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
