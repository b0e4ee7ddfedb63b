//! Canonical serialization of node lists.
//!
//! Captured OUTPUT/EXPECTED blocks are compared as strings, so both sides of
//! every comparison go through this one serializer. The format is fixed:
//! two-space indentation per nesting level, one declaration per line,
//! top-level nodes joined by a single newline, no trailing newline.

use crate::css::node::{AtRuleBody, Declaration, Node};

/// Serialize an ordered node list to canonical CSS text.
pub fn serialize(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|node| render_node(node, 0))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_node(node: &Node, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    match node {
        Node::Comment { text, .. } => format!("{indent}/*{text}*/"),
        Node::Rule {
            selectors,
            declarations,
            ..
        } => {
            let head = selectors
                .iter()
                .map(|s| format!("{indent}{s}"))
                .collect::<Vec<_>>()
                .join(",\n");
            format!("{head} {{\n{}{indent}}}", render_declarations(declarations, depth))
        }
        Node::AtRule {
            name, params, body, ..
        } => {
            let head = if params.is_empty() {
                format!("{indent}@{name}")
            } else {
                format!("{indent}@{name} {params}")
            };
            match body {
                AtRuleBody::None => format!("{head};"),
                AtRuleBody::Declarations(declarations) => {
                    format!("{head} {{\n{}{indent}}}", render_declarations(declarations, depth))
                }
                AtRuleBody::Rules(nodes) => {
                    if nodes.is_empty() {
                        return format!("{head} {{}}");
                    }
                    let inner = nodes
                        .iter()
                        .map(|n| render_node(n, depth + 1))
                        .collect::<Vec<_>>()
                        .join("\n");
                    format!("{head} {{\n{inner}\n{indent}}}")
                }
            }
        }
    }
}

fn render_declarations(declarations: &[Declaration], depth: usize) -> String {
    let indent = "  ".repeat(depth + 1);
    declarations
        .iter()
        .map(|d| format!("{indent}{}: {};\n", d.property, d.value))
        .collect()
}
