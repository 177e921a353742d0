//! Core data model for symbol-table entries and impure-data findings.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One defined symbol as reported by a symbol-table reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub address: u64,
    pub size: u64,
    /// Single-letter storage class code (`nm` convention, uppercase is global).
    pub storage_class: char,
    pub name: String,
}

impl SymbolRecord {
    pub fn new(address: u64, size: u64, storage_class: char, name: impl Into<String>) -> Self {
        Self { address, size, storage_class, name: name.into() }
    }
}

/// A symbol flagged as mutable static/global storage in a given object file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpureSymbol {
    pub object_file: PathBuf,
    pub name: String,
    pub size: u64,
}

impl ImpureSymbol {
    pub fn new(object_file: impl Into<PathBuf>, name: impl Into<String>, size: u64) -> Self {
        Self { object_file: object_file.into(), name: name.into(), size }
    }
}

/// Renders the report line `file:symbol:size` with the size in decimal.
impl fmt::Display for ImpureSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.object_file.display(), self.name, self.size)
    }
}
