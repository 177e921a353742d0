pub mod nm;

pub use nm::{parse_nm_line, parse_nm_output, NmReader, ParseMode};
