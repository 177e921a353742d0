use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::discovery::{self, DiscoveryError};
use crate::model::{ImpureSymbol, SymbolRecord};
use crate::policy::ClassificationPolicy;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("File system error: {0}")]
    FileSystem(#[from] DiscoveryError),
    #[error("Failed to run symbol tool '{tool}' on {path}: {source}")]
    ToolInvocation {
        tool: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Source of symbol tables for object files (e.g. `nm`, or a native object parser).
///
/// Implementations return the defined symbols of one file in their natural order. A file
/// the reader cannot make sense of yields an empty list; only a reader that cannot run at
/// all reports an error.
pub trait SymbolTableReader {
    fn read_symbols(&self, object_file: &Path) -> Result<Vec<SymbolRecord>, ScanError>;
    fn name(&self) -> &'static str;
}

/// Outcome of scanning a directory tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub files_scanned: usize,
    pub symbols_seen: usize,
    /// Findings in discovery order, then symbol-table order within each file.
    pub findings: Vec<ImpureSymbol>,
}

impl ScanReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Ties a symbol reader to a classification policy.
pub struct Scanner<'a> {
    pub reader: &'a dyn SymbolTableReader,
    pub policy: &'a ClassificationPolicy,
}

impl<'a> Scanner<'a> {
    pub fn new(reader: &'a dyn SymbolTableReader, policy: &'a ClassificationPolicy) -> Self {
        Self { reader, policy }
    }

    /// Scan a single object file and return its findings.
    pub fn scan_file(&self, object_file: &Path) -> Result<Vec<ImpureSymbol>, ScanError> {
        self.read_and_classify(object_file).map(|(_, findings)| findings)
    }

    /// Discover every object file under `root` and scan them one after another.
    ///
    /// The first hard error aborts the scan; no partial report is returned.
    pub fn scan_tree(&self, root: &Path) -> Result<ScanReport, ScanError> {
        let object_files = discovery::find_object_files(root)?;
        let mut report = ScanReport::default();

        for object_file in &object_files {
            let (symbol_count, findings) = self.read_and_classify(object_file)?;
            report.files_scanned += 1;
            report.symbols_seen += symbol_count;
            report.findings.extend(findings);
        }

        log::info!(
            "scanned {} object file(s) under {}: {} symbol(s), {} impure",
            report.files_scanned,
            root.display(),
            report.symbols_seen,
            report.findings.len()
        );
        Ok(report)
    }

    /// Read one file's symbol table and classify it. Returns the number of symbols read
    /// alongside the findings.
    fn read_and_classify(
        &self,
        object_file: &Path,
    ) -> Result<(usize, Vec<ImpureSymbol>), ScanError> {
        let records = self.reader.read_symbols(object_file)?;
        let findings = self.policy.classify(object_file, &records);
        log::debug!(
            "{}: {} symbol(s), {} impure (reader: {})",
            object_file.display(),
            records.len(),
            findings.len(),
            self.reader.name()
        );
        Ok((records.len(), findings))
    }
}
