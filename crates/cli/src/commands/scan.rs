use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use impure_core::policy::ClassificationPolicy;
use impure_core::report::write_findings;
use impure_core::services::readers::NmReader;
use impure_core::services::scan::{ScanReport, Scanner};

/// Scan `root` with `nm` and the default policy, then print every finding to stdout.
pub fn scan_command(root: &Path) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    scan_to_writer(root, &mut out)?;
    Ok(())
}

/// Same as [`scan_command`] but writes the report to `out`.
///
/// Findings are written only once the whole tree has been scanned.
pub fn scan_to_writer<W: Write>(root: &Path, out: &mut W) -> Result<ScanReport> {
    let reader = NmReader::new();
    let policy = ClassificationPolicy::default();
    let report = Scanner::new(&reader, &policy)
        .scan_tree(root)
        .with_context(|| format!("Failed to scan {} for impure data", root.display()))?;

    write_findings(out, &report.findings).context("Failed to write report")?;
    Ok(report)
}
