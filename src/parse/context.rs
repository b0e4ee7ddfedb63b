//! Mutable parse state: the finished tree plus the open module, test,
//! assertion, and capture buffer.
//!
//! One `Context` belongs to exactly one `parse` call. The "current" slots
//! are force-closed innermost-first, so a module boundary (or the end of the
//! stream) flushes the open assertion into the open test, the open test into
//! the open module, and the open module into the tree.

use crate::css::node::Node;
use crate::parse::model::{Assertion, Module, Test};
use crate::parse::sentinel;

#[derive(Debug, Default)]
pub(crate) struct Context {
    pub modules: Vec<Module>,
    pub current_module: Option<Module>,
    pub current_test: Option<Test>,
    pub current_assertion: Option<Assertion>,
    /// Nodes accumulated inside an OUTPUT / EXPECTED / CONTAINED /
    /// CONTAINS_STRING block.
    pub capture: Option<Vec<Node>>,
}

impl Context {
    pub(crate) fn finish_assertion(&mut self) {
        if let Some(assertion) = self.current_assertion.take() {
            if let Some(test) = self.current_test.as_mut() {
                test.assertions.push(assertion);
            }
        }
    }

    pub(crate) fn finish_test(&mut self) {
        self.finish_assertion();
        if let Some(test) = self.current_test.take() {
            if let Some(module) = self.current_module.as_mut() {
                module.tests.push(test);
            }
        }
    }

    pub(crate) fn finish_module(&mut self) {
        self.finish_test();
        if let Some(mut module) = self.current_module.take() {
            let path: Vec<String> = module
                .name
                .split(sentinel::MODULE_NESTING)
                .map(str::to_string)
                .collect();
            module.name = path.last().cloned().unwrap_or_default();
            insert_module(&mut self.modules, &path, module);
        }
    }
}

/// Insert `module` at the depth named by `path`, creating empty placeholder
/// modules for missing intermediate segments. Intermediate segments match
/// existing siblings by exact name; the leaf is always appended. Descends
/// iteratively so nesting depth cannot overflow the stack.
fn insert_module(modules: &mut Vec<Module>, path: &[String], module: Module) {
    let mut list = modules;
    for segment in &path[..path.len().saturating_sub(1)] {
        let index = match list.iter().position(|m| m.name == *segment) {
            Some(index) => index,
            None => {
                list.push(Module::new(segment.clone()));
                list.len() - 1
            }
        };
        list = &mut list[index].modules;
    }
    list.push(module);
}
