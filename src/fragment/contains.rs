//! Textual containment between two serialized CSS blocks.
//!
//! The comparison is textual: whitespace or ordering differences inside a
//! declaration can make a containment check fail even when the CSS means the
//! same thing. Both sides of every check are produced by the same
//! serializer, so in practice the comparison only fails when the
//! declarations really differ.

use crate::fragment::media::segment_media_queries;
use crate::fragment::split::{split_selector_and_body, split_top_level_rules};

/// A selector/body pair cut out of a serialized CSS string.
#[derive(Debug, PartialEq, Eq)]
struct Block {
    selector: String,
    body: String,
}

/// Does `output` contain every declaration `expected` asks for?
///
/// Every expected selector must appear verbatim in the output, and each of
/// its declarations must be a substring of at least one output block with
/// that selector.
pub fn contains(output: &str, expected: &str) -> bool {
    let output_blocks = selector_body_pairs(output);
    let expected_blocks = selector_body_pairs(expected);

    expected_blocks.iter().all(|block| {
        let matching: Vec<&Block> = output_blocks
            .iter()
            .filter(|candidate| candidate.selector == block.selector)
            .collect();
        if matching.is_empty() {
            return false;
        }
        declarations(&block.body)
            .iter()
            .all(|decl| matching.iter().any(|candidate| candidate.body.contains(decl)))
    })
}

/// Cut a raw CSS string into selector/body pairs: top-level rules first,
/// then the flattened at-rule rules. Fragments without a body are dropped.
fn selector_body_pairs(css: &str) -> Vec<Block> {
    let segmented = segment_media_queries(css);

    split_top_level_rules(&segmented.remainder)
        .iter()
        .chain(segmented.flattened.iter())
        .filter_map(|fragment| {
            let (selector, body) = split_selector_and_body(fragment);
            body.map(|body| Block { selector, body })
        })
        .collect()
}

/// Split a block body into trimmed `property: value` strings, discarding
/// empty pieces and brace remnants.
fn declarations(body: &str) -> Vec<String> {
    body.split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty() && *decl != "{" && *decl != "}")
        .map(str::to_string)
        .collect()
}
