//! Classification policy: which storage classes count as impure data, and which
//! symbol names are known to be benign.

use std::path::Path;

use crate::model::{ImpureSymbol, SymbolRecord};

/// Storage classes for initialized data (`d`/`D`), BSS (`b`/`B`) and common (`c`/`C`).
pub const NON_REENTRANT_CLASSES: &[char] = &['d', 'b', 'D', 'B', 'C', 'c'];

/// Symbols that land in data/BSS but are managed by the C++ runtime or libgcc.
pub const IGNORE_NAMES: &[&str] = &["std::__ioinit", "__gthread_active_p()::__gthread_active_ptr"];

/// Read-only policy applied to every symbol record of a scan.
#[derive(Debug, Clone)]
pub struct ClassificationPolicy {
    non_reentrant_classes: &'static [char],
    ignore_names: &'static [&'static str],
    extra_ignored: Vec<String>,
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self {
            non_reentrant_classes: NON_REENTRANT_CLASSES,
            ignore_names: IGNORE_NAMES,
            extra_ignored: Vec::new(),
        }
    }
}

impl ClassificationPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fully-qualified symbol name that is never reported.
    pub fn with_ignored(mut self, name: impl Into<String>) -> Self {
        self.extra_ignored.push(name.into());
        self
    }

    pub fn is_non_reentrant_class(&self, storage_class: char) -> bool {
        self.non_reentrant_classes.contains(&storage_class)
    }

    /// Exact, case-sensitive match against the ignore list.
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore_names.contains(&name) || self.extra_ignored.iter().any(|n| n == name)
    }

    /// True when the record lives in mutable static storage and is not ignored.
    pub fn is_impure(&self, record: &SymbolRecord) -> bool {
        !self.is_ignored(&record.name) && self.is_non_reentrant_class(record.storage_class)
    }

    /// Filter `records` down to findings for `object_file`, preserving input order.
    pub fn classify(&self, object_file: &Path, records: &[SymbolRecord]) -> Vec<ImpureSymbol> {
        records
            .iter()
            .filter(|record| self.is_impure(record))
            .map(|record| ImpureSymbol::new(object_file, record.name.clone(), record.size))
            .collect()
    }
}
