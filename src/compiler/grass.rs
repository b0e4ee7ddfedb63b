//! Bundled compiler provider backed by the `grass` crate.

use super::{CompileError, CompileOptions, Compiler, OutputStyle};

/// Pure-Rust Sass compiler, available behind the `grass` feature.
#[derive(Debug, Default)]
pub struct GrassCompiler;

fn to_grass_options(options: &CompileOptions) -> ::grass::Options<'static> {
    let mut grass_options = ::grass::Options::default()
        .style(match options.style {
            OutputStyle::Expanded => ::grass::OutputStyle::Expanded,
            OutputStyle::Compressed => ::grass::OutputStyle::Compressed,
        })
        .quiet(options.quiet);
    for path in &options.load_paths {
        grass_options = grass_options.load_path(path);
    }
    grass_options
}

impl Compiler for GrassCompiler {
    fn compile_path(&self, path: &str, options: &CompileOptions) -> Result<String, CompileError> {
        Ok(::grass::from_path(path, &to_grass_options(options))?)
    }

    fn compile_string(
        &self,
        source: &str,
        options: &CompileOptions,
    ) -> Result<String, CompileError> {
        Ok(::grass::from_string(source, &to_grass_options(options))?)
    }
}
