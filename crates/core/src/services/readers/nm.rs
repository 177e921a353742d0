use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::model::SymbolRecord;
use crate::services::scan::{ScanError, SymbolTableReader};

/// Program name looked up on the execution path when no explicit tool is configured.
pub const DEFAULT_NM: &str = "nm";

/// Demangled names, sizes next to addresses, defined symbols only.
pub const NM_ARGS: [&str; 3] = ["--demangle", "--print-size", "--defined-only"];

/// How a line of `nm` output is split into fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Exactly four whitespace-separated fields. Demangled names containing spaces
    /// (templates, operators, lambdas) do not parse and are skipped.
    #[default]
    Strict,
    /// Address, size and class are the first three fields; the rest of the line is the
    /// name, so names with embedded spaces are kept.
    NameRemainder,
}

/// Symbol-table reader that shells out to GNU/LLVM `nm`.
#[derive(Debug, Clone)]
pub struct NmReader {
    program: PathBuf,
    mode: ParseMode,
}

impl Default for NmReader {
    fn default() -> Self {
        Self { program: PathBuf::from(DEFAULT_NM), mode: ParseMode::default() }
    }
}

impl NmReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different `nm` binary, e.g. a cross toolchain's `arm-none-eabi-nm`.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }
}

impl SymbolTableReader for NmReader {
    fn read_symbols(&self, object_file: &Path) -> Result<Vec<SymbolRecord>, ScanError> {
        // nm's own diagnostics go straight to the user's terminal.
        let output = Command::new(&self.program)
            .args(NM_ARGS)
            .arg(object_file)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| ScanError::ToolInvocation {
                tool: self.program.display().to_string(),
                path: object_file.to_path_buf(),
                source,
            })?;

        if !output.status.success() {
            log::debug!(
                "{} exited with {} for {}",
                self.program.display(),
                output.status,
                object_file.display()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_nm_output(&stdout, self.mode))
    }

    fn name(&self) -> &'static str {
        "nm"
    }
}

/// Parse a full `nm --print-size` listing, skipping every line that is not a symbol.
pub fn parse_nm_output(text: &str, mode: ParseMode) -> Vec<SymbolRecord> {
    let mut skipped = 0usize;
    let records: Vec<SymbolRecord> = text
        .lines()
        .filter_map(|line| {
            let record = parse_nm_line(line, mode);
            if record.is_none() && !line.trim().is_empty() {
                skipped += 1;
            }
            record
        })
        .collect();
    if skipped > 0 {
        log::debug!("skipped {skipped} non-symbol line(s) of nm output");
    }
    records
}

/// Parse one `address size class name` line. Returns `None` for anything else.
pub fn parse_nm_line(line: &str, mode: ParseMode) -> Option<SymbolRecord> {
    match mode {
        ParseMode::Strict => {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [address, size, class, name] = fields.as_slice() else {
                return None;
            };
            build_record(address, size, class, name)
        }
        ParseMode::NameRemainder => {
            let (address, rest) = next_field(line)?;
            let (size, rest) = next_field(rest)?;
            let (class, rest) = next_field(rest)?;
            build_record(address, size, class, rest)
        }
    }
}

fn next_field(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    Some(text.split_at(end))
}

fn build_record(address: &str, size: &str, class: &str, name: &str) -> Option<SymbolRecord> {
    let address = parse_hex(address)?;
    let size = parse_hex(size)?;
    let mut class_chars = class.chars();
    let storage_class = class_chars.next()?;
    if class_chars.next().is_some() {
        return None;
    }
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(SymbolRecord::new(address, size, storage_class, name))
}

/// Digits only; `from_str_radix` alone would also take a leading `+`.
fn parse_hex(field: &str) -> Option<u64> {
    if !field.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(field, 16).ok()
}
