//! Hashtag rules shared by the commit path.
//!
//! A tag is `#` followed by one or more characters that are neither
//! whitespace nor `#`. The note service parses tags out of the note body,
//! so every tag that should be attached to a note must appear in its text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([^\s#]+)").expect("tag pattern is valid"));

/// Returns the tags in `text`, in order of appearance, without the `#`.
pub fn extract_tags(text: &str) -> Vec<String> {
    TAG_PATTERN
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Appends every tag in `tags` that `content` does not already carry, as a
/// separate paragraph of space-separated `#tag`s in sorted order.
pub fn append_missing_tags(content: &str, tags: &BTreeSet<String>) -> String {
    let present: BTreeSet<String> = extract_tags(content).into_iter().collect();
    let missing: Vec<String> = tags
        .iter()
        .filter(|tag| !present.contains(*tag))
        .map(|tag| format!("#{}", tag))
        .collect();

    if missing.is_empty() {
        return content.trim().to_string();
    }

    format!("{}\n\n{}", content, missing.join(" ")).trim().to_string()
}
