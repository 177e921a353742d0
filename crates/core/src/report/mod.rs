//! Line-oriented report output: one `file:symbol:size` line per finding.

use std::io::{self, Write};

use crate::model::ImpureSymbol;

/// Write every finding on its own line, in the order given.
pub fn write_findings<W: Write>(out: &mut W, findings: &[ImpureSymbol]) -> io::Result<()> {
    for finding in findings {
        writeln!(out, "{finding}")?;
    }
    out.flush()
}

/// Render findings into a single string, mostly useful for tests and embedding.
pub fn render_findings(findings: &[ImpureSymbol]) -> String {
    findings.iter().map(|finding| format!("{finding}\n")).collect()
}
