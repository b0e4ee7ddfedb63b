//! Raw CSS fragment helpers.
//!
//! These operate on serialized CSS *text*, not on parsed nodes: the
//! containment check compares two already-serialized blocks, and needs to
//! chop them into selector/body pairs without a full reparse.

/// Remove newline characters.
pub fn strip_newlines(css: &str) -> String {
    css.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// Split de-newlined CSS into top-level rule fragments.
///
/// A `}` ends a fragment unless the next non-space character is a quote, a
/// comma, or another closing brace, so string contents and nested structure
/// stay attached to their fragment. Whitespace immediately before the `}`
/// belongs to the separator; empty fragments are dropped.
pub fn split_top_level_rules(css: &str) -> Vec<String> {
    let text = strip_newlines(css);
    let bytes = text.as_bytes();
    let mut fragments = Vec::new();
    let mut start = 0usize;

    for i in 0..bytes.len() {
        if bytes[i] != b'}' || !splits_here(bytes, i) {
            continue;
        }
        let mut end = i;
        while end > start && bytes[end - 1].is_ascii_whitespace() {
            end -= 1;
        }
        if end > start {
            fragments.push(text[start..end].to_string());
        }
        start = i + 1;
    }
    if start < text.len() {
        fragments.push(text[start..].to_string());
    }
    fragments
}

fn splits_here(bytes: &[u8], brace: usize) -> bool {
    let mut j = brace + 1;
    while j < bytes.len() && bytes[j].is_ascii_whitespace() {
        j += 1;
    }
    !matches!(bytes.get(j), Some(b'"') | Some(b'\'') | Some(b',') | Some(b'}'))
}

/// Split one fragment at its braces: the selector is everything before the
/// first `{`, the body everything between the first and second `{` (or to
/// the end). No trimming; the containment check matches selectors verbatim.
pub fn split_selector_and_body(fragment: &str) -> (String, Option<String>) {
    let mut parts = fragment.split('{');
    let selector = parts.next().unwrap_or_default().to_string();
    let body = parts.next().map(str::to_string);
    (selector, body)
}
