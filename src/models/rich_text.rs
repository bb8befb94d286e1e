//! Rich text runs.

use serde_json::Value;

/// Concatenate the plain content of a rich-text run list.
///
/// Only runs carrying `text.content` contribute; runs are joined by a single
/// space. Anything that is not an array yields an empty string.
pub fn plain_text(runs: &Value) -> String {
    let Some(runs) = runs.as_array() else {
        return String::new();
    };

    runs.iter()
        .filter_map(|run| run.get("text")?.get("content")?.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
