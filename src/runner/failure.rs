//! Assertion-failure message formatting.

use std::fmt::Write;

use similar::{ChangeTag, TextDiff};

use crate::parse::model::Assertion;

/// Render one failed assertion as a human-readable message.
///
/// The message is the description and assertion type, the details when
/// present, then a blank line and a line diff of expected vs. actual output
/// under a `- Expected` / `+ Received` header.
pub fn format_failure_message(assertion: &Assertion) -> String {
    let mut msg = format!(
        "{} [type: {}]",
        assertion.description,
        assertion.assertion_type.as_deref().unwrap_or("unknown"),
    );
    if let Some(details) = &assertion.details {
        let _ = write!(msg, " -- {details}");
    }
    msg.push_str("\n\n");
    msg.push_str(&render_diff(
        assertion.expected.as_deref().unwrap_or_default(),
        assertion.output.as_deref().unwrap_or_default(),
    ));
    msg.push('\n');
    msg
}

/// Line diff with `- ` for expected-only lines, `+ ` for output-only lines,
/// and two spaces for common lines. No trailing newline.
fn render_diff(expected: &str, actual: &str) -> String {
    let diff = TextDiff::from_lines(expected, actual);
    let mut out = String::from("- Expected\n+ Received\n\n");
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "- ",
            ChangeTag::Insert => "+ ",
            ChangeTag::Equal => "  ",
        };
        let _ = write!(out, "{sign}{change}");
        if change.missing_newline() {
            out.push('\n');
        }
    }
    out.trim_end_matches('\n').to_string()
}
