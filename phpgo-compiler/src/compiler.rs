//! The compilation facade: bind, generate, finalize.

use std::io::Write;

use anyhow::{Context as _, Result};

use crate::ast::Module;
use crate::binder::bind;
use crate::diagnostics::Diagnostics;
use crate::generator::Generator;

#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Capture a pretty-printed JSON dump of the resolved AST alongside
    /// the generated code.
    pub dump_ast: bool,
}

/// The result of compiling one file: the complete generated unit plus the
/// non-fatal diagnostics collected along the way.
#[derive(Debug)]
pub struct Compilation {
    pub file_name: String,
    pub output: String,
    pub diagnostics: Diagnostics,
    pub ast_json: Option<String>,
}

impl Compilation {
    /// Flush the fully buffered unit to the sink in a single write. A
    /// compilation that failed never produces a `Compilation`, so a sink
    /// can never see a partial artifact.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<()> {
        sink.write_all(self.output.as_bytes())
            .with_context(|| format!("failed to write generated code for {}", self.file_name))
    }
}

pub struct Compiler {
    options: CompileOptions,
    diagnostics: Diagnostics,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Diagnostics accumulated across every `compile` call on this
    /// instance.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn compile(&mut self, file_name: &str, module: &Module) -> Result<Compilation> {
        let ast_json = if self.options.dump_ast {
            Some(
                serde_json::to_string_pretty(module)
                    .with_context(|| format!("failed to serialize the AST of {file_name}"))?,
            )
        } else {
            None
        };

        let bindings = bind(module).with_context(|| format!("failed to compile {file_name}"))?;

        let mut generator = Generator::new(file_name, bindings);
        generator
            .generate(module)
            .with_context(|| format!("failed to compile {file_name}"))?;
        let (output, diagnostics) = generator.finalize();
        self.diagnostics.extend(diagnostics.clone());

        Ok(Compilation {
            file_name: file_name.to_string(),
            output,
            diagnostics,
            ast_json,
        })
    }
}

/// One-shot compilation with default options.
pub fn compile(file_name: &str, module: &Module) -> Result<Compilation> {
    Compiler::new(CompileOptions::default()).compile(file_name, module)
}
