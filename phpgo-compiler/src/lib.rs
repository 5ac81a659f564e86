//! Type solving and Go code generation for a resolved PHP subset AST.
//!
//! The pipeline is three phases over one translation unit. `binder::bind`
//! runs a forward pass that accumulates every variable's full kind set and
//! every function's return kind set. `generator::Generator` then walks the
//! tree once, rendering each value either as a native Go value (when its
//! set stayed monomorphic) or through the shared boxed representation.
//! `varinfo::VarInfo` aggregates what crossed a polymorphic position and
//! synthesizes the box type, its coercions, comparison matrix, accessors,
//! and kind predicates into the finished unit.

pub mod ast;
pub mod binder;
pub mod compiler;
pub mod context;
pub mod diagnostics;
pub mod generator;
pub mod solver;
pub mod types;
pub mod variable;
pub mod varinfo;

pub use ast::Module;
pub use compiler::{compile, Compilation, CompileOptions, Compiler};
pub use diagnostics::{CompileError, Diagnostic, DiagnosticLevel, Diagnostics};
