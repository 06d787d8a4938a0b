//! Source location tracking for diagnostics
//! 
//! Three-address code is line oriented, so a location is a file name plus
//! a 1-based line number.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A line in a 3AC input file (line is 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
}

impl SourceLocation {
    pub fn new(filename: &str, line: u32) -> Self {
        Self {
            filename: filename.to_string(),
            line,
        }
    }
    
    /// Create a dummy location for testing
    pub fn dummy() -> Self {
        Self::new("<unknown>", 0)
    }
}

// Allow creating location with just a line (common pattern in tests)
impl SourceLocation {
    pub fn new_simple(line: u32) -> Self {
        Self::new("<input>", line)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.filename, self.line)
    }
}
