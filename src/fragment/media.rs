//! Media-query segmentation.
//!
//! The containment check compares flat selector/body pairs, so rules wrapped
//! in `@media` (or any other at-rule block) have to be pulled out and turned
//! into standalone fragments first. Each inner rule is prefixed with its
//! at-rule header, which makes "contained in a media query" compare exactly
//! like a top-level rule — as long as both sides of the comparison went
//! through the same transformation.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fragment::split::{split_top_level_rules, strip_newlines};

static AT_RULE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@[a-zA-Z0-9:()\s-]+").expect("valid pattern"));

static AT_RULE_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@[a-zA-Z0-9:()\s-]+\{([a-zA-Z0-9:()\s;._{}-]+)").expect("valid pattern")
});

/// Result of pulling at-rule blocks out of a raw CSS string.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MediaSegmentation {
    /// Inner rules of each at-rule block, re-flattened to standalone
    /// fragments prefixed with the block's header text.
    pub flattened: Vec<String>,
    /// The input with at-rule headers removed and a leading stray `{`
    /// trimmed.
    pub remainder: String,
}

/// Separate top-level rules from at-rule-wrapped rules.
pub fn segment_media_queries(raw_css: &str) -> MediaSegmentation {
    let headers: Vec<&str> = AT_RULE_HEADER
        .find_iter(raw_css)
        .map(|m| m.as_str())
        .collect();

    let without_headers = AT_RULE_HEADER.replace_all(raw_css, "");
    let without_bodies = AT_RULE_BODY.replace_all(&without_headers, "");
    let remainder = without_bodies
        .strip_prefix('{')
        .unwrap_or(&without_bodies)
        .to_string();

    let mut flattened = Vec::new();
    let mut scan = 0usize;
    let mut index = 0usize;
    while scan <= raw_css.len() {
        let Some(caps) = AT_RULE_BODY.captures_at(raw_css, scan) else {
            break;
        };
        let whole = caps.get(0).expect("match group 0");
        // a zero-width match would re-match forever; step past it
        scan = if whole.end() > whole.start() {
            whole.end()
        } else {
            whole.end() + 1
        };
        while scan < raw_css.len() && !raw_css.is_char_boundary(scan) {
            scan += 1;
        }

        let inner = strip_newlines(caps.get(1).map_or("", |m| m.as_str()));
        let header = headers.get(index).copied().unwrap_or_default();
        for rule in split_top_level_rules(&inner) {
            flattened.push(format!("{header}{rule}"));
        }
        index += 1;
    }

    MediaSegmentation {
        flattened,
        remainder,
    }
}
