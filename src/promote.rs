//! Default-locale promotion stage.
//!
//! Copies the immediate children of the default-locale tree (`ar/` by
//! default) over the output root, so the default-locale site is served
//! without a locale prefix. Shared root assets named in the protected
//! allow-list are left untouched; everything else, including the root
//! `index.html` redirect stub the build framework emits, is overwritten.
//!
//! The allow-list applies to top-level *files* only. Directories are always
//! merged, because a locale build and the shared root may both legitimately
//! contribute to the same directory (e.g. `images/`).

use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::archive::copy_tree;
use crate::config::RestructureConfig;

#[derive(Error, Debug)]
pub enum PromoteError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result of the promotion stage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromoteReport {
    /// Whether the default-locale directory existed at all.
    pub source_found: bool,
    /// Top-level files copied over the root.
    pub files_copied: usize,
    /// Top-level directories merged into the root.
    pub dirs_merged: usize,
    /// Top-level files skipped because the root already owns them.
    pub preserved: Vec<String>,
}

/// Promote the default-locale tree over the output root.
///
/// A missing source directory is reported, not fatal: the pipeline keeps
/// going so the remaining stages can still normalize whatever is there.
pub fn promote(out_root: &Path, config: &RestructureConfig) -> Result<PromoteReport, PromoteError> {
    let src = out_root.join(&config.locales.default);
    let mut report = PromoteReport::default();
    if !src.is_dir() {
        return Ok(report);
    }
    report.source_found = true;

    // Sorted for deterministic output and reports.
    let mut entries: Vec<_> = fs::read_dir(&src)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name();
        let name_str = name.to_string_lossy().to_string();
        let target = out_root.join(&name);

        // Entries that vanish mid-walk are skipped, like everywhere else.
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            copy_tree(&entry.path(), &target);
            report.dirs_merged += 1;
        } else if config.promote.protected.contains(&name_str) {
            report.preserved.push(name_str);
        } else if fs::copy(entry.path(), &target).is_ok() {
            report.files_copied += 1;
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn promotes_pages_to_root() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path();
        write_file(out, "ar/index.html", "<html>ar home</html>");
        write_file(out, "ar/about-us/index.html", "<html>ar about</html>");

        let config = RestructureConfig::default();
        let report = promote(out, &config).unwrap();

        assert!(report.source_found);
        assert_eq!(report.files_copied, 1);
        assert_eq!(report.dirs_merged, 1);
        assert_eq!(read_file(out, "index.html"), "<html>ar home</html>");
        assert_eq!(read_file(out, "about-us/index.html"), "<html>ar about</html>");
        // Source tree is left in place for the prune stage.
        assert!(out.join("ar/index.html").exists());
    }

    #[test]
    fn root_redirect_stub_is_overwritten() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path();
        write_file(out, "index.html", "<meta http-equiv=\"refresh\" content=\"0; url=/ar/\">");
        write_file(out, "ar/index.html", "<html>real home</html>");

        let config = RestructureConfig::default();
        promote(out, &config).unwrap();

        assert_eq!(read_file(out, "index.html"), "<html>real home</html>");
    }

    #[test]
    fn protected_files_are_preserved() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path();
        write_file(out, "favicon.ico", "root icon");
        write_file(out, "robots.txt", "User-agent: *");
        write_file(out, "ar/favicon.ico", "locale icon");
        write_file(out, "ar/robots.txt", "locale robots");
        write_file(out, "ar/index.html", "home");

        let config = RestructureConfig::default();
        let report = promote(out, &config).unwrap();

        assert_eq!(
            report.preserved,
            vec!["favicon.ico".to_string(), "robots.txt".to_string()]
        );
        assert_eq!(read_file(out, "favicon.ico"), "root icon");
        assert_eq!(read_file(out, "robots.txt"), "User-agent: *");
    }

    #[test]
    fn protected_name_does_not_block_directory_merge() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path();
        write_file(out, "images/shared.svg", "shared");
        write_file(out, "ar/images/hero.jpg", "hero");

        let config = RestructureConfig::default();
        let report = promote(out, &config).unwrap();

        // "images" is in the protected list but is a directory here, so it
        // merges instead of being skipped.
        assert_eq!(report.dirs_merged, 1);
        assert!(report.preserved.is_empty());
        assert_eq!(read_file(out, "images/shared.svg"), "shared");
        assert_eq!(read_file(out, "images/hero.jpg"), "hero");
    }

    #[test]
    fn missing_source_reports_not_found() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path();
        write_file(out, "en/index.html", "en only");

        let config = RestructureConfig::default();
        let report = promote(out, &config).unwrap();

        assert!(!report.source_found);
        assert_eq!(report.files_copied, 0);
        assert_eq!(report.dirs_merged, 0);
    }

    #[test]
    fn nested_pages_survive_promotion() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path();
        write_file(
            out,
            "ar/products/antibiotics/index.html",
            "<html>deep page</html>",
        );

        let config = RestructureConfig::default();
        promote(out, &config).unwrap();

        assert_eq!(
            read_file(out, "products/antibiotics/index.html"),
            "<html>deep page</html>"
        );
    }
}
