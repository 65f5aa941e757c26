//! Tree pruning stage.
//!
//! Removes the now-redundant top-level locale directories. Their content
//! lives on in two places after the earlier stages: promoted at the output
//! root and archived under `_locales/`. Deletion failures are collected as
//! warnings instead of aborting, since a leftover directory only wastes
//! space and never breaks the deployed site.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::config::RestructureConfig;

/// Result of the prune stage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PruneReport {
    /// Locale directories that were removed.
    pub removed: Vec<String>,
    /// Locale directories that were already gone.
    pub missing: Vec<String>,
    /// Deletion failures, as printable messages.
    pub warnings: Vec<String>,
}

/// Delete the top-level locale directories from the output root.
pub fn prune(out_root: &Path, config: &RestructureConfig) -> PruneReport {
    let mut report = PruneReport::default();
    for locale in config.locales.codes() {
        let dir = out_root.join(locale);
        match fs::remove_dir_all(&dir) {
            Ok(()) => report.removed.push(locale.to_string()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                report.missing.push(locale.to_string());
            }
            Err(e) => {
                report
                    .warnings
                    .push(format!("could not remove {}: {e}", dir.display()));
            }
        }
    }
    report
}
