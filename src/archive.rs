//! Locale archiving stage.
//!
//! Before the default-locale tree is promoted over the output root, both
//! locale trees are copied verbatim into `_locales/`. The copy under
//! `_locales/<default>/` is a pristine backup that later stages never touch;
//! the copy under `_locales/<secondary>/` becomes the live secondary-locale
//! site once its links are rewritten.
//!
//! Any stale `_locales/` from a previous run is removed first, so re-running
//! the pipeline never mixes old and new trees.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::{LOCALES_DIR, RestructureConfig};

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// One archived locale tree.
#[derive(Debug, Clone, Serialize)]
pub struct LocaleArchive {
    /// Locale code (`ar`, `en`).
    pub locale: String,
    /// Number of files copied into `_locales/<locale>/`.
    pub files: usize,
}

/// Result of the archive stage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArchiveReport {
    /// Locales copied into `_locales/`, in config order.
    pub archived: Vec<LocaleArchive>,
    /// Locales whose source directory was missing from the output root.
    pub skipped: Vec<String>,
}

/// Copy both locale trees into `_locales/` under the output root.
///
/// A locale directory missing from the output root is recorded as skipped
/// rather than treated as an error: partial builds are common during
/// development and the remaining stages still do useful work. Unreadable
/// entries inside a tree are skipped file-by-file.
pub fn archive(out_root: &Path, config: &RestructureConfig) -> Result<ArchiveReport, ArchiveError> {
    let locales_root = out_root.join(LOCALES_DIR);

    // Wipe any archive left over from a previous run.
    match fs::remove_dir_all(&locales_root) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let mut report = ArchiveReport::default();
    for locale in config.locales.codes() {
        let src = out_root.join(locale);
        if !src.is_dir() {
            report.skipped.push(locale.to_string());
            continue;
        }
        let files = copy_tree(&src, &locales_root.join(locale));
        report.archived.push(LocaleArchive {
            locale: locale.to_string(),
            files,
        });
    }
    Ok(report)
}

/// Recursively copy `src` into `dst`, returning the number of files copied.
///
/// Best-effort: unreadable entries and failed copies are skipped silently.
/// Existing files in `dst` are overwritten; existing directories are merged.
pub fn copy_tree(src: &Path, dst: &Path) -> usize {
    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let Ok(entry) = entry else { continue };
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            let _ = fs::create_dir_all(&target);
        } else {
            if let Some(parent) = target.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if fs::copy(entry.path(), &target).is_ok() {
                copied += 1;
            }
        }
    }
    copied
}
