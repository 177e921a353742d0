pub mod readers;
pub mod scan;
