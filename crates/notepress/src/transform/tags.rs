//! Hashtag handling.
//!
//! Tags are collected from the raw body before anything else touches it, then
//! the `#` is dropped from standalone tags so the sentence still reads
//! naturally: `#todo buy milk` publishes as `todo buy milk` tagged `todo`.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"#(\w+)").expect("valid tag pattern"));

/// Returns every `#word` tag in order of first appearance, without duplicates.
pub fn extract_tags(text: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for caps in TAG_PATTERN.captures_iter(text) {
        let tag = &caps[1];
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Removes the leading `#` from tags that stand on their own, i.e. are preceded
/// by whitespace (or the start) and followed by whitespace (or the end).
pub fn strip_tag_marks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in TAG_PATTERN.find_iter(text) {
        let standalone_start = text[..m.start()]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace);
        let standalone_end = text[m.end()..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace);

        if standalone_start && standalone_end {
            out.push_str(&text[last..m.start()]);
            // skip the '#'
            out.push_str(&text[m.start() + 1..m.end()]);
            last = m.end();
        }
    }

    out.push_str(&text[last..]);
    out
}
