//! Error handling for the MIPS three-address compiler
//! 
//! Translation problems come in two flavours. Fatal ones abort the run and
//! are returned as [`CompilerError`]. Everything else is recorded as a
//! [`Diagnostic`] in an [`ErrorReporter`] while translation carries on with
//! a default.

use crate::source_loc::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fatal translation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Register exhaustion at {location}: all {limit} {class} registers are in use")]
    RegisterExhausted {
        location: SourceLocation,
        class: String,
        limit: usize,
    },
}

impl CompilerError {
    /// Create an IO error that names the file involved
    pub fn io_error(path: &str, err: &std::io::Error) -> Self {
        CompilerError::IoError {
            message: format!("{}: {}", path, err),
        }
    }

    /// Create a register exhaustion error
    pub fn register_exhausted(class: &str, limit: usize, location: SourceLocation) -> Self {
        CompilerError::RegisterExhausted {
            location,
            class: class.to_string(),
            limit,
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic message with location and severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: SourceLocation,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: String, location: SourceLocation) -> Self {
        Self::with_severity(Severity::Error, message, location)
    }

    pub fn warning(message: String, location: SourceLocation) -> Self {
        Self::with_severity(Severity::Warning, message, location)
    }

    pub fn note(message: String, location: SourceLocation) -> Self {
        Self::with_severity(Severity::Note, message, location)
    }

    fn with_severity(severity: Severity, message: String, location: SourceLocation) -> Self {
        Self {
            severity,
            message,
            location,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.location, self.severity, self.message)?;
        
        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }
        
        Ok(())
    }
}

/// Collects diagnostics raised during one translation
#[derive(Debug, Clone, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic, updating the counters
    pub fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Note => {}
        }
        self.diagnostics.push(diagnostic);
    }

    /// Report a warning diagnostic
    pub fn warning(&mut self, message: String, location: SourceLocation) {
        self.report(Diagnostic::warning(message, location));
    }

    /// Report a note diagnostic
    pub fn note(&mut self, message: String, location: SourceLocation) {
        self.report(Diagnostic::note(message, location));
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Print all diagnostics to stderr
    pub fn print_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            eprintln!("{}", diagnostic);
        }
    }

    /// Create a summary string
    pub fn summary(&self) -> String {
        match (self.error_count, self.warning_count) {
            (0, 0) => "No errors or warnings".to_string(),
            (0, w) => format!("{} warning{}", w, if w == 1 { "" } else { "s" }),
            (e, 0) => format!("{} error{}", e, if e == 1 { "" } else { "s" }),
            (e, w) => format!(
                "{} error{} and {} warning{}",
                e,
                if e == 1 { "" } else { "s" },
                w,
                if w == 1 { "" } else { "s" }
            ),
        }
    }
}
