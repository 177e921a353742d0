//! impure-core
//!
//! Core library for finding impure data in compiled object files.
//!
//! Impure data is statically-allocated mutable storage: symbols that live in the
//! initialized-data, zero-initialized (BSS) or common sections. Code that touches such
//! symbols is not reentrant without extra synchronization.
//!
//! This crate defines the symbol model, object-file discovery, the classification policy,
//! symbol-table readers (currently `nm`), scan orchestration and report formatting.
//! All substantive logic lives here so it is testable and reusable from multiple
//! frontends.

pub mod discovery;
pub mod model;
pub mod policy;
pub mod report;
pub mod services;

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
