//! The parsed test tree: modules, tests, assertions.

use std::collections::BTreeMap;

/// A named group of tests, possibly nested. Replayed as a `describe` block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Module {
    pub name: String,
    pub tests: Vec<Test>,
    pub modules: Vec<Module>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
            modules: Vec::new(),
        }
    }
}

/// A named sequence of assertions. Replayed as an `it` block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Test {
    pub name: String,
    pub assertions: Vec<Assertion>,
}

impl Test {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assertions: Vec::new(),
        }
    }
}

/// A single pass/fail check.
///
/// Inline assertions carry their verdict directly; block assertions compare
/// a captured OUTPUT block against an EXPECTED / CONTAINED / CONTAINS_STRING
/// block once both are closed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assertion {
    pub description: String,
    pub passed: bool,
    /// `equal`, `contains`, `contains-string`, or the bracketed label of an
    /// inline failure (e.g. `assert-true`).
    pub assertion_type: Option<String>,
    pub output: Option<String>,
    pub expected: Option<String>,
    pub details: Option<String>,
    /// Any other `key: value` failure-detail lines, keyed lowercase.
    pub extra: BTreeMap<String, String>,
}
