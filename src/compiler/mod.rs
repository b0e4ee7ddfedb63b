//! Sass compiler boundary: options, the [`Compiler`] trait, and provider
//! selection.
//!
//! The compiler is pluggable. An explicit handle passed by the caller always
//! wins; otherwise the bundled [`grass`] provider is used when the `grass`
//! feature is enabled. With the feature off and no explicit handle there is
//! no compiler, which [`crate::runner::run_sass`] reports as a typed error.

#[cfg(feature = "grass")]
pub mod grass;

use std::path::PathBuf;

/// Output style requested from the compiler.
///
/// Only [`OutputStyle::Expanded`] preserves the comments test results travel
/// in; `Compressed` exists so the rejection can be expressed in types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    #[default]
    Expanded,
    Compressed,
}

/// Options forwarded to the Sass compiler.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Directories searched by `@use` and `@import`.
    pub load_paths: Vec<PathBuf>,
    pub style: OutputStyle,
    /// Silence compiler warnings.
    pub quiet: bool,
}

/// A Sass compiler capable of producing CSS text.
pub trait Compiler {
    /// Compile the stylesheet at `path`.
    fn compile_path(&self, path: &str, options: &CompileOptions) -> Result<String, CompileError>;

    /// Compile inline stylesheet `source`.
    fn compile_string(&self, source: &str, options: &CompileOptions)
        -> Result<String, CompileError>;
}

/// Compiler diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[cfg(feature = "grass")]
    #[error(transparent)]
    Grass(#[from] Box<::grass::Error>),
    /// Failure reported by a caller-supplied compiler.
    #[error("sass compiler error: {0}")]
    Other(String),
}

/// Pick a compiler: the explicit handle wins, then the bundled provider.
pub(crate) fn select(explicit: Option<&dyn Compiler>) -> Option<&dyn Compiler> {
    if let Some(compiler) = explicit {
        return Some(compiler);
    }
    bundled()
}

#[cfg(feature = "grass")]
fn bundled() -> Option<&'static dyn Compiler> {
    static BUNDLED: grass::GrassCompiler = grass::GrassCompiler;
    Some(&BUNDLED)
}

#[cfg(not(feature = "grass"))]
fn bundled() -> Option<&'static dyn Compiler> {
    None
}
