//! Shared test utilities for the locale-root test suite.
//!
//! Small filesystem builders used by the per-stage unit tests. Tests build
//! their trees inside a [`tempfile::TempDir`] so they can mutate freely
//! without affecting each other.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_file(tmp.path(), "ar/index.html", "<html></html>");
//! assert_eq!(read_file(tmp.path(), "ar/index.html"), "<html></html>");
//! ```

use std::fs;
use std::path::Path;

/// Write `content` to `root/rel`, creating parent directories as needed.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
}

/// Read `root/rel` as a string. Panics with the full path on failure.
pub fn read_file(root: &Path, rel: &str) -> String {
    let path = root.join(rel);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("could not read {}: {e}", path.display()))
}
