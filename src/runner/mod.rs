//! Test execution: compile the stylesheet, parse the results, replay the
//! tree through the host framework's callbacks.

pub mod failure;
pub mod replay;

pub use failure::format_failure_message;
pub use replay::{replay, BlockFn};

use std::path::PathBuf;

use crate::compiler::{self, CompileOptions, Compiler, OutputStyle};
use crate::parse;

/// How the source argument of [`run_sass`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceType {
    /// The source is a path to a stylesheet file.
    #[default]
    Path,
    /// The source is inline stylesheet text.
    String,
}

/// Host-framework options for a test run.
pub struct RunOptions<'a> {
    pub describe: BlockFn<'a>,
    pub it: BlockFn<'a>,
    pub source_type: SourceType,
    /// Context-window height for parse errors; `None` means the default.
    pub context_lines: Option<usize>,
    /// Explicit compiler; takes precedence over the bundled provider.
    pub compiler: Option<&'a dyn Compiler>,
}

/// Errors raised before any test tree is produced.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The run was configured in a way this tool cannot honor.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// No Sass compiler is available.
    #[error(
        "no sass compiler available: supply one in `RunOptions::compiler` \
         or enable the `grass` feature"
    )]
    CompilerNotFound,
    #[error(transparent)]
    Compile(#[from] compiler::CompileError),
    #[error(transparent)]
    Parse(#[from] parse::ParseError),
}

/// Compile a stylesheet, parse its test output, and replay the resulting
/// module tree through the host callbacks.
///
/// The crate's own support-stylesheet directory is appended to the load
/// paths, so test files can `@use` the companion library without
/// configuration. Assertion failures surface as panics from inside the `it`
/// bodies during replay; everything else is a [`RunError`].
pub fn run_sass(
    options: &RunOptions,
    source: &str,
    compile_options: &CompileOptions,
) -> Result<(), RunError> {
    if compile_options.style == OutputStyle::Compressed {
        return Err(RunError::Config(
            "the `compressed` output style strips the comments test results travel in; \
             this tool requires the default Sass `expanded` output style"
                .into(),
        ));
    }

    let mut compile_options = compile_options.clone();
    compile_options.load_paths.push(support_path());

    let compiler = compiler::select(options.compiler).ok_or(RunError::CompilerNotFound)?;
    let css = match options.source_type {
        SourceType::Path => compiler.compile_path(source, &compile_options)?,
        SourceType::String => compiler.compile_string(source, &compile_options)?,
    };
    log::debug!("compiled {} bytes of css", css.len());

    let modules = parse::parse(&css, options.context_lines)?;
    replay(&modules, options.describe, options.it);
    Ok(())
}

/// Directory holding this crate's support stylesheets.
fn support_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("sass")
}
