use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use phpgo_compiler::{CompileOptions, Compiler, Diagnostic, DiagnosticLevel, Module};

#[derive(Parser)]
#[command(
    name = "phpgo",
    version,
    about = "Generate Go source from a resolved PHP AST.",
    long_about = "Read a resolved AST (JSON) produced by the front end and emit one Go file. \
Output goes to stdout unless --output is given."
)]
struct Cli {
    /// Path to the resolved AST, serialized as JSON.
    input: PathBuf,

    /// Destination for the generated Go file (defaults to stdout).
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Source file name used for the banner and package header (defaults
    /// to the input file stem).
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Dump the deserialized AST to stderr before generating.
    #[arg(long)]
    dump_ast: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let module: Module = serde_json::from_str(&source)
        .with_context(|| format!("failed to parse the AST in {}", cli.input.display()))?;

    let file_name = match &cli.name {
        Some(name) => name.clone(),
        None => cli
            .input
            .file_stem()
            .map(|stem| format!("{}.php", stem.to_string_lossy()))
            .unwrap_or_else(|| "main.php".to_string()),
    };

    let mut compiler = Compiler::new(CompileOptions {
        dump_ast: cli.dump_ast,
    });
    let compilation = compiler.compile(&file_name, &module)?;

    if let Some(ast_json) = &compilation.ast_json {
        eprintln!("{ast_json}");
    }
    for diagnostic in compilation.diagnostics.entries() {
        report(diagnostic);
    }

    match &cli.output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            compilation.write_to(&mut file)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            compilation.write_to(&mut handle)?;
            handle.flush().context("failed to flush stdout")?;
        }
    }

    if compilation.diagnostics.has_errors() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn report(diagnostic: &Diagnostic) {
    let level = match diagnostic.level {
        DiagnosticLevel::Error => "error",
        DiagnosticLevel::Warning => "warning",
    };
    match diagnostic.span {
        Some(span) => eprintln!(
            "{level}: {} (line {}, column {})",
            diagnostic.message, span.line, span.column
        ),
        None => eprintln!("{level}: {}", diagnostic.message),
    }
}
