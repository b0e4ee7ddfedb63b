//! Compiled-CSS reader: tokenizer, node model, parser, serializer.
//!
//! The rest of the crate treats this module as a black box with two sides:
//! [`parser::parse_nodes`] turns compiled CSS text into an ordered list of
//! typed nodes with source positions, and [`serialize::serialize`] turns a
//! node slice back into canonical CSS text.

pub mod node;
pub mod parser;
pub mod serialize;
pub mod tokenizer;

pub use node::{AtRuleBody, Declaration, Node, Position};
pub use parser::{parse_nodes, CssError};
pub use serialize::serialize;
