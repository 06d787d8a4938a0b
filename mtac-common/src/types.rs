//! Common types used throughout the compiler
//! 
//! Semantic types of declared variables and the table that binds variable
//! names to them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Semantic type of a declared 3AC variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolType {
    Int,
    Float,
    Char,
    Str,
    Array,
}

impl SymbolType {
    /// Whether values of this type live in floating-point registers
    pub fn is_float(&self) -> bool {
        matches!(self, SymbolType::Float)
    }

    /// Size of the storage reserved for a scalar of this type, in bytes
    pub fn size_in_bytes(&self) -> u32 {
        match self {
            SymbolType::Char => 1,
            SymbolType::Int | SymbolType::Float | SymbolType::Str | SymbolType::Array => 4,
        }
    }
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolType::Int => write!(f, "int"),
            SymbolType::Float => write!(f, "float"),
            SymbolType::Char => write!(f, "char"),
            SymbolType::Str => write!(f, "string"),
            SymbolType::Array => write!(f, "array"),
        }
    }
}

/// Variable name to declared type
///
/// Only declarations write to the table. A repeated declaration replaces
/// the earlier type.
#[derive(Debug, Clone, Default)]
pub struct SymbolTypeTable {
    types: HashMap<String, SymbolType>,
}

impl SymbolTypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the type of a variable, returning the type it replaced
    pub fn declare(&mut self, name: &str, ty: SymbolType) -> Option<SymbolType> {
        self.types.insert(name.to_string(), ty)
    }

    pub fn lookup(&self, name: &str) -> Option<SymbolType> {
        self.types.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_type_properties() {
        assert!(SymbolType::Float.is_float());
        assert!(!SymbolType::Int.is_float());
        assert!(!SymbolType::Char.is_float());

        assert_eq!(SymbolType::Char.size_in_bytes(), 1);
        assert_eq!(SymbolType::Int.size_in_bytes(), 4);
        assert_eq!(SymbolType::Float.size_in_bytes(), 4);
    }

    #[test]
    fn test_symbol_type_display() {
        assert_eq!(SymbolType::Int.to_string(), "int");
        assert_eq!(SymbolType::Str.to_string(), "string");
        assert_eq!(SymbolType::Array.to_string(), "array");
    }

    #[test]
    fn test_symbol_type_table() {
        let mut table = SymbolTypeTable::new();
        assert!(table.is_empty());
        assert_eq!(table.lookup("x"), None);

        assert_eq!(table.declare("x", SymbolType::Int), None);
        assert_eq!(table.lookup("x"), Some(SymbolType::Int));

        // Redeclaration silently replaces the earlier type
        assert_eq!(table.declare("x", SymbolType::Float), Some(SymbolType::Int));
        assert_eq!(table.lookup("x"), Some(SymbolType::Float));
        assert_eq!(table.len(), 1);
    }
}
