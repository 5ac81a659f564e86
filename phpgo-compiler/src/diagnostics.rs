use thiserror::Error;

use crate::ast::SourceSpan;

/// Fatal, unrecoverable conditions. Either one aborts the compilation of
/// the current file; because output stays buffered until finalization, no
/// partial artifact ever reaches the sink.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("array literal mixes element types: expected {expected}, found {found} (line {line})")]
    HeterogeneousArray {
        expected: String,
        found: String,
        line: usize,
    },
    #[error("array literal mixes keyed and unkeyed items (line {line})")]
    MixedArrayKeys { line: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub level: DiagnosticLevel,
    pub span: Option<SourceSpan>,
}

/// Non-fatal findings collected while a file compiles: unknown function
/// calls, compound assignments on boxed values, and the like.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.push_error_with_span(message, None);
    }

    pub fn push_error_with_span<S: Into<String>>(&mut self, message: S, span: Option<SourceSpan>) {
        self.entries.push(Diagnostic {
            message: message.into(),
            level: DiagnosticLevel::Error,
            span,
        });
    }

    pub fn push_warning_with_span<S: Into<String>>(
        &mut self,
        message: S,
        span: Option<SourceSpan>,
    ) {
        self.entries.push(Diagnostic {
            message: message.into(),
            level: DiagnosticLevel::Warning,
            span,
        });
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|diagnostic| diagnostic.level == DiagnosticLevel::Error)
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }
}
