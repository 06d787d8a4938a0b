//! MIPS Three-Address Compiler - Common Types and Utilities
//! 
//! This crate contains shared types, error definitions, and utilities
//! used by the translator and the command line driver.

pub mod error;
pub mod loader;
pub mod source_loc;
pub mod types;

pub use error::{CompilerError, Diagnostic, ErrorReporter, Severity};
pub use loader::{Program, ProgramLoader};
pub use source_loc::SourceLocation;
pub use types::*;
