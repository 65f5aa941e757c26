//! CLI output formatting for all pipeline stages.
//!
//! # Output Format
//!
//! Every stage prints one line per entity (a locale tree, a page, a check),
//! with secondary context as indented lines below it. Targets follow a `→`.
//!
//! ## Archive
//!
//! ```text
//! ar → _locales/ar/ (14 files)
//! en → _locales/en/ (12 files)
//! ```
//!
//! ## Promote
//!
//! ```text
//! ar → / (3 files, 4 directories)
//!     Preserved: favicon.ico
//!     Preserved: robots.txt
//! ```
//!
//! ## Rewrite
//!
//! ```text
//! 18 pages updated (24 scanned)
//!     Redirect scripts injected: 12
//! ```
//!
//! ## Prune
//!
//! ```text
//! ar → removed
//! en → removed
//! ```
//!
//! ## Verify
//!
//! ```text
//! index.html → ok
//! products/index.html → MISSING
//! 4 of 5 expected pages present
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use std::path::Path;

use crate::archive::ArchiveReport;
use crate::config::{LOCALES_DIR, RestructureConfig};
use crate::promote::PromoteReport;
use crate::prune::PruneReport;
use crate::rewrite::RewriteReport;
use crate::verify::VerifyReport;

// ============================================================================
// Stage 1: Archive output
// ============================================================================

/// Format archive stage output: where each locale tree was copied.
pub fn format_archive_output(report: &ArchiveReport) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in &report.archived {
        lines.push(format!(
            "{} \u{2192} {}/{}/ ({} files)",
            entry.locale, LOCALES_DIR, entry.locale, entry.files
        ));
    }
    for locale in &report.skipped {
        lines.push(format!("{} missing, skipped", locale));
    }
    lines
}

/// Print archive output to stdout.
pub fn print_archive_output(report: &ArchiveReport) {
    for line in format_archive_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Promote output
// ============================================================================

/// Format promote stage output: what landed at the root, what was left alone.
pub fn format_promote_output(report: &PromoteReport, config: &RestructureConfig) -> Vec<String> {
    let default = &config.locales.default;
    if !report.source_found {
        return vec![format!("{} missing, nothing to promote", default)];
    }
    let mut lines = vec![format!(
        "{} \u{2192} / ({} files, {} directories)",
        default, report.files_copied, report.dirs_merged
    )];
    for name in &report.preserved {
        lines.push(format!("    Preserved: {}", name));
    }
    lines
}

/// Print promote output to stdout.
pub fn print_promote_output(report: &PromoteReport, config: &RestructureConfig) {
    for line in format_promote_output(report, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 3: Rewrite output
// ============================================================================

/// Format rewrite stage output: page and injection counts.
pub fn format_rewrite_output(report: &RewriteReport) -> Vec<String> {
    vec![
        format!(
            "{} pages updated ({} scanned)",
            report.pages_updated, report.pages_scanned
        ),
        format!(
            "    Redirect scripts injected: {}",
            report.scripts_injected
        ),
    ]
}

/// Print rewrite output to stdout.
pub fn print_rewrite_output(report: &RewriteReport) {
    for line in format_rewrite_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 4: Prune output
// ============================================================================

/// Format prune stage output: per-locale removal results plus warnings.
pub fn format_prune_output(report: &PruneReport) -> Vec<String> {
    let mut lines = Vec::new();
    for locale in &report.removed {
        lines.push(format!("{} \u{2192} removed", locale));
    }
    for locale in &report.missing {
        lines.push(format!("{} already absent", locale));
    }
    for warning in &report.warnings {
        lines.push(format!("Warning: {}", warning));
    }
    lines
}

/// Print prune output to stdout.
pub fn print_prune_output(report: &PruneReport) {
    for line in format_prune_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 5: Verify output
// ============================================================================

/// Format verify stage output: one line per expected page plus a summary.
///
/// Missing pages are shouted in caps so they stand out in CI logs; the
/// result is informational either way.
pub fn format_verify_output(report: &VerifyReport) -> Vec<String> {
    let mut lines = Vec::new();
    for check in &report.checks {
        let status = if check.found { "ok" } else { "MISSING" };
        lines.push(format!("{} \u{2192} {}", check.page, status));
    }
    let total = report.checks.len();
    if report.all_passed() {
        lines.push(format!("All {} expected pages present", total));
    } else {
        lines.push(format!(
            "{} of {} expected pages present",
            report.passed(),
            total
        ));
    }
    lines
}

/// Print verify output to stdout.
pub fn print_verify_output(report: &VerifyReport) {
    for line in format_verify_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Run summary
// ============================================================================

/// Format the closing summary of a full run.
pub fn format_run_summary(config: &RestructureConfig, out_root: &Path) -> Vec<String> {
    vec![
        String::new(),
        "Restructure complete".to_string(),
        format!(
            "    {} \u{2192} {}/",
            config.locales.default,
            out_root.display()
        ),
        format!(
            "    {} \u{2192} {}",
            config.locales.secondary,
            config.locales.secondary_prefix()
        ),
        format!(
            "Deploy the contents of {}/ to your web host",
            out_root.display()
        ),
    ]
}

/// Print the run summary to stdout.
pub fn print_run_summary(config: &RestructureConfig, out_root: &Path) {
    for line in format_run_summary(config, out_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
