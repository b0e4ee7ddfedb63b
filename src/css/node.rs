//! Node model for compiled CSS: comments, rules, and at-rules.

use std::fmt;

/// 1-based source position of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A single property declaration. The value is kept as raw text so that
/// captured output round-trips exactly as the compiler produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// Body of an at-rule.
#[derive(Debug, Clone, PartialEq)]
pub enum AtRuleBody {
    /// Statement at-rule, e.g. `@import "x";`.
    None,
    /// Declaration block, e.g. `@font-face { ... }`.
    Declarations(Vec<Declaration>),
    /// Nested rules, e.g. `@media ... { ... }`.
    Rules(Vec<Node>),
}

/// One ordered node of a compiled stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Comment {
        /// The comment text between `/*` and `*/`, untrimmed.
        text: String,
        position: Option<Position>,
    },
    Rule {
        selectors: Vec<String>,
        declarations: Vec<Declaration>,
        position: Option<Position>,
    },
    AtRule {
        /// The at-rule name without the `@`, e.g. `media`.
        name: String,
        /// Everything between the name and the block or semicolon.
        params: String,
        body: AtRuleBody,
        position: Option<Position>,
    },
}

impl Node {
    pub fn is_comment(&self) -> bool {
        matches!(self, Node::Comment { .. })
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Node::Comment { position, .. }
            | Node::Rule { position, .. }
            | Node::AtRule { position, .. } => *position,
        }
    }

    /// Name used in diagnostics: `comment`, `rule`, or the at-rule's name.
    pub fn type_name(&self) -> &str {
        match self {
            Node::Comment { .. } => "comment",
            Node::Rule { .. } => "rule",
            Node::AtRule { name, .. } => name,
        }
    }
}
