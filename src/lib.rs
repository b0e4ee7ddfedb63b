//! # sassert
//!
//! Run Sass test suites as native Rust test assertions.
//!
//! A companion Sass test library reports its results as specially-tagged
//! comments in the compiled CSS. sassert compiles the stylesheet, parses
//! that comment stream back into a tree of modules, tests, and assertions,
//! and replays the tree through `describe`/`it`-style callbacks so failures
//! surface as ordinary test panics — with a line diff of expected vs.
//! actual CSS.
//!
//! ## Core Systems
//!
//! - **[`css`]** — Compiled-CSS reader: tokenizer, node model, serializer
//! - **[`parse`]** — The comment-stream state machine and the module tree
//! - **[`fragment`]** — Raw-fragment splitting and the containment check
//! - **[`runner`]** — `describe`/`it` replay and failure formatting
//! - **[`compiler`]** — Pluggable Sass compiler with a bundled provider
//!
//! ## Example
//!
//! ```no_run
//! use sassert::{run_sass, CompileOptions, RunOptions, SourceType};
//!
//! let describe = |_name: &str, body: &dyn Fn()| body();
//! let it = |_name: &str, body: &dyn Fn()| body();
//!
//! run_sass(
//!     &RunOptions {
//!         describe: &describe,
//!         it: &it,
//!         source_type: SourceType::Path,
//!         context_lines: None,
//!         compiler: None,
//!     },
//!     "tests/scss/suite.scss",
//!     &CompileOptions::default(),
//! )
//! .expect("sass test run");
//! ```

pub mod compiler;
pub mod css;
pub mod fragment;
pub mod parse;
pub mod runner;

pub use compiler::{CompileError, CompileOptions, Compiler, OutputStyle};
pub use parse::{parse, Assertion, Module, ParseError, Test};
pub use runner::{format_failure_message, replay, run_sass, RunError, RunOptions, SourceType};
