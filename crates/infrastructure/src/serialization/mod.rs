//! Document parsing and deterministic JSON output.
//!
//! Schema and catalog documents may be JSON or YAML, chosen by file
//! extension. Reports are written as stable JSON:
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 encoding without BOM

mod json;

pub use json::*;
