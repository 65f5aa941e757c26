//! Post-run verification stage.
//!
//! Checks that the pages listed in config actually exist in the
//! restructured tree. Purely diagnostic: results are printed for the
//! operator but never affect the process exit code, because a partially
//! built site is still worth deploying during development.

use serde::Serialize;
use std::path::Path;

use crate::config::RestructureConfig;

/// One expected-page check.
#[derive(Debug, Clone, Serialize)]
pub struct PageCheck {
    /// Path relative to the output root, as configured.
    pub page: String,
    /// Whether the file exists.
    pub found: bool,
}

/// Result of the verify stage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerifyReport {
    pub checks: Vec<PageCheck>,
}

impl VerifyReport {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.found).count()
    }

    pub fn failed(&self) -> usize {
        self.checks.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

/// Check every configured page for existence under the output root.
pub fn verify(out_root: &Path, config: &RestructureConfig) -> VerifyReport {
    let checks = config
        .verify
        .pages
        .iter()
        .map(|page| PageCheck {
            page: page.clone(),
            found: out_root.join(page).exists(),
        })
        .collect();
    VerifyReport { checks }
}
