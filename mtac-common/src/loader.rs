//! Program loader
//! 
//! Reads three-address code from disk (or from memory in tests) and hands
//! it to the translator line by line.

use crate::error::CompilerError;
use crate::source_loc::SourceLocation;
use log::debug;
use std::fs;
use std::path::Path;

/// A 3AC program held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    name: String,
    source: String,
}

impl Program {
    /// Build a program from text that is already in memory
    pub fn from_source(name: &str, source: &str) -> Self {
        Self {
            name: name.to_string(),
            source: source.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Raw lines paired with their 1-based line numbers
    pub fn lines(&self) -> impl Iterator<Item = (u32, &str)> {
        self.source
            .lines()
            .enumerate()
            .map(|(i, line)| (i as u32 + 1, line))
    }

    /// Location of a line in this program
    pub fn location(&self, line: u32) -> SourceLocation {
        SourceLocation::new(&self.name, line)
    }
}

/// Reads 3AC files
pub struct ProgramLoader;

impl ProgramLoader {
    pub fn load(path: &Path) -> Result<Program, CompilerError> {
        let display = path.display().to_string();
        let source = fs::read_to_string(path).map_err(|e| CompilerError::io_error(&display, &e))?;
        debug!("Loaded {} ({} bytes)", display, source.len());
        Ok(Program::from_source(&display, &source))
    }
}
