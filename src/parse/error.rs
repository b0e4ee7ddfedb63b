//! Structural parse errors with source context windows.

use crate::css::node::Position;
use crate::css::parser::CssError;

/// Number of source lines shown under a structural error by default.
pub const DEFAULT_CONTEXT_LINES: usize = 10;

/// Fatal errors from [`crate::parse::parse`]. No partial tree survives one.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The node stream broke the sentinel grammar at a point where a
    /// specific sentinel was mandatory. The message already carries the
    /// position and a rendered context window.
    #[error("{message}")]
    Structure {
        message: String,
        seeking: &'static str,
        position: Option<Position>,
    },
    /// The compiled CSS itself could not be read.
    #[error("invalid css: {0}")]
    Css(#[from] CssError),
}

/// Source lines plus the configured window height, for error rendering.
pub(crate) struct SourceContext<'a> {
    lines: Vec<&'a str>,
    window: usize,
}

impl<'a> SourceContext<'a> {
    pub(crate) fn new(raw_css: &'a str, context_lines: Option<usize>) -> Self {
        Self {
            lines: raw_css
                .split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line))
                .collect(),
            window: context_lines.unwrap_or(DEFAULT_CONTEXT_LINES),
        }
    }

    /// Build a structural error: `Line L, column C: {msg}; looking for
    /// {seeking}.` plus a context window ending at the offending line with a
    /// caret under the offending column. Without a position the window is
    /// omitted.
    pub(crate) fn error(
        &self,
        msg: String,
        seeking: &'static str,
        position: Option<Position>,
    ) -> ParseError {
        let mut message = match position {
            Some(pos) => format!(
                "Line {}, column {}: {msg}; looking for {seeking}.",
                pos.line, pos.column
            ),
            None => format!("Line <unknown>, column <unknown>: {msg}; looking for {seeking}."),
        };
        if let Some(pos) = position {
            let end = pos.line.min(self.lines.len());
            let start = pos.line.saturating_sub(self.window);
            let window = self.lines[start..end].join("\n");
            let caret_indent = " ".repeat(pos.column.saturating_sub(1));
            message.push_str(&format!("\n-- Context --\n{window}\n{caret_indent}^\n"));
        }
        ParseError::Structure {
            message,
            seeking,
            position,
        }
    }
}
