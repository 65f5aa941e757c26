//! Link rewriting stage.
//!
//! After promotion the default-locale pages live at the root but their
//! internal links still carry locale prefixes, and the archived secondary
//! tree links to routes that no longer exist at those paths. This stage
//! walks every `.html` file and fixes hrefs with plain text replacement.
//! Pages come out of a known build pipeline, so regex over the raw markup
//! is reliable here and avoids pulling in an HTML parser.
//!
//! Which rules apply depends on where a file sits in the tree:
//!
//! | Location                      | Mode      | Effect                                  |
//! |-------------------------------|-----------|-----------------------------------------|
//! | outside `_locales/`           | root      | strip locale prefixes, inject redirect  |
//! | `_locales/<secondary>/` tree  | secondary | re-prefix links into `/_locales/<sec>/` |
//! | rest of `_locales/`           | untouched | pristine backup stays byte-identical    |
//!
//! The traversal threads two booleans through the recursion: `inject` turns
//! off permanently when descending into `_locales/`, and `english` turns on
//! permanently when descending from `_locales/` into the secondary-locale
//! directory. Root mode additionally inserts a small client-side redirect
//! script right after `<head>`, guarded by a marker id so repeated runs
//! never double-inject.
//!
//! Per-file read and write failures are skipped silently; a handful of
//! unreadable pages should not abort a deploy.

use regex::Regex;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::config::{LOCALES_DIR, RestructureConfig};

/// Marker attribute carried by the redirect script. Its presence in a page
/// means the script is already injected.
const INJECT_MARKER: &str = r#"id="locale-redirect""#;

/// Redirect script template. `__LOCALE__` and `__PREFIX__` are substituted
/// from config when the rewriter is built.
const REDIRECT_SNIPPET: &str = include_str!("../static/locale-redirect.html");

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid rewrite pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result of the rewrite stage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RewriteReport {
    /// HTML files visited in an active mode.
    pub pages_scanned: usize,
    /// Files whose content changed and was written back.
    pub pages_updated: usize,
    /// Redirect scripts inserted.
    pub scripts_injected: usize,
}

/// Compiled rewrite rules for one locale pair.
///
/// All patterns are built from config values at construction time. Locale
/// codes and route slugs are validated to `[A-Za-z0-9_-]`, and escaped
/// anyway before being spliced into a pattern.
pub struct LinkRewriter {
    /// `href="/ar/..."` or `href='/en/...'`, either locale, either quote.
    locale_prefix: Regex,
    /// Bare `href="/ar"` with no trailing slash, double-quoted.
    bare_locale_dq: Regex,
    /// Bare locale link, single-quoted.
    bare_locale_sq: Regex,
    /// Known top-level routes, e.g. `href="/about-us/"`. `None` when the
    /// route list is empty.
    known_routes: Option<Regex>,
    /// Secondary tree prefix, `/_locales/en/`.
    prefix: String,
    /// Secondary locale code.
    secondary: String,
    /// Redirect script with locale and prefix substituted.
    snippet: String,
}

impl LinkRewriter {
    pub fn new(config: &RestructureConfig) -> Result<Self, RewriteError> {
        let default = regex::escape(&config.locales.default);
        let secondary = regex::escape(&config.locales.secondary);
        let prefix = config.locales.secondary_prefix();

        let locale_prefix = Regex::new(&format!(
            r#"href=(?P<q>["'])/(?:{default}|{secondary})/"#
        ))?;
        let bare_locale_dq = Regex::new(&format!(r#"href="/(?:{default}|{secondary})""#))?;
        let bare_locale_sq = Regex::new(&format!(r"href='/(?:{default}|{secondary})'"))?;

        let known_routes = if config.rewrite.routes.is_empty() {
            None
        } else {
            let alternation = config
                .rewrite
                .routes
                .iter()
                .map(|r| regex::escape(r))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(
                r#"href=(?P<q>["'])/(?P<route>{alternation})/"#
            ))?)
        };

        let snippet = REDIRECT_SNIPPET
            .replace("__LOCALE__", &config.locales.secondary)
            .replace("__PREFIX__", &prefix)
            .trim()
            .to_string();

        Ok(Self {
            locale_prefix,
            bare_locale_dq,
            bare_locale_sq,
            known_routes,
            prefix,
            secondary: config.locales.secondary.clone(),
            snippet,
        })
    }

    /// Root mode: locale-prefixed links point at the promoted root copy.
    ///
    /// `href="/ar/about-us/"` becomes `href="/about-us/"` and a bare
    /// `href="/ar"` becomes `href="/"`.
    pub fn rewrite_root(&self, content: &str) -> String {
        let out = self.locale_prefix.replace_all(content, "href=${q}/");
        let out = self.bare_locale_dq.replace_all(&out, r#"href="/""#);
        let out = self.bare_locale_sq.replace_all(&out, "href='/'");
        out.into_owned()
    }

    /// Secondary mode: links stay inside the `/_locales/<secondary>/` tree.
    ///
    /// Locale-prefixed links are re-prefixed, known top-level routes are
    /// pulled into the namespace, and `href="/"` points at the secondary
    /// homepage. A link that already carries the namespace prefix cannot
    /// match any of the patterns, so the pass is idempotent; a final sweep
    /// collapses double prefixes left over from older runs.
    pub fn rewrite_english(&self, content: &str) -> String {
        let prefix = &self.prefix;
        let out = self
            .locale_prefix
            .replace_all(content, format!("href=${{q}}{prefix}"));
        let out = self
            .bare_locale_dq
            .replace_all(&out, format!(r#"href="{prefix}""#));
        let out = self
            .bare_locale_sq
            .replace_all(&out, format!("href='{prefix}'"));
        let mut out = match &self.known_routes {
            Some(re) => re
                .replace_all(&out, format!("href=${{q}}{prefix}${{route}}/"))
                .into_owned(),
            None => out.into_owned(),
        };
        out = out.replace(r#"href="/""#, &format!(r#"href="{prefix}""#));
        out = out.replace("href='/'", &format!("href='{prefix}'"));

        let doubled = format!("{}{prefix}", prefix.trim_end_matches('/'));
        while out.contains(&doubled) {
            out = out.replace(&doubled, prefix);
        }
        out
    }

    /// Insert the redirect script right after the opening `<head>` tag.
    ///
    /// Returns whether an insertion happened. Pages without a literal
    /// `<head>` and pages already carrying the marker are left alone.
    pub fn inject_redirect(&self, content: &mut String) -> bool {
        if content.contains(INJECT_MARKER) {
            return false;
        }
        let Some(pos) = content.find("<head>") else {
            return false;
        };
        content.insert_str(pos + "<head>".len(), &self.snippet);
        true
    }
}

/// Rewrite links across the whole output tree.
pub fn rewrite(out_root: &Path, config: &RestructureConfig) -> Result<RewriteReport, RewriteError> {
    let rewriter = LinkRewriter::new(config)?;
    let mut report = RewriteReport::default();
    walk(out_root, out_root, true, false, &rewriter, &mut report)?;
    Ok(report)
}

/// Depth-first traversal carrying the two mode flags.
///
/// `inject` starts true at the root and turns off for good at any directory
/// named `_locales`. `english` starts false and turns on for good at a
/// directory named after the secondary locale that sits below `_locales`.
/// Files in neither mode (the default-locale backup) are not touched at
/// all. Entries that vanish mid-walk are skipped.
fn walk(
    root: &Path,
    dir: &Path,
    inject: bool,
    english: bool,
    rewriter: &LinkRewriter,
    report: &mut RewriteReport,
) -> Result<(), RewriteError> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            let child_inject = inject && name != LOCALES_DIR;
            let child_english = english
                || (under_locales(root, dir)
                    && name.to_str() == Some(rewriter.secondary.as_str()));
            walk(root, &path, child_inject, child_english, rewriter, report)?;
        } else if is_html(&path) {
            process_file(&path, inject, english, rewriter, report);
        }
    }
    Ok(())
}

/// Whether `dir` lies at or below a `_locales` directory inside the tree
/// being walked.
fn under_locales(root: &Path, dir: &Path) -> bool {
    dir.strip_prefix(root)
        .map(|rel| rel.components().any(|c| c.as_os_str() == LOCALES_DIR))
        .unwrap_or(false)
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
}

fn process_file(
    path: &Path,
    inject: bool,
    english: bool,
    rewriter: &LinkRewriter,
    report: &mut RewriteReport,
) {
    if !english && !inject {
        // Default-locale backup under _locales/: byte-identical, always.
        return;
    }
    let Ok(content) = fs::read_to_string(path) else {
        return;
    };
    report.pages_scanned += 1;

    let mut updated = if english {
        rewriter.rewrite_english(&content)
    } else {
        rewriter.rewrite_root(&content)
    };
    let mut injected = false;
    if !english {
        injected = rewriter.inject_redirect(&mut updated);
    }

    if updated != content && fs::write(path, &updated).is_ok() {
        report.pages_updated += 1;
        if injected {
            report.scripts_injected += 1;
        }
    }
}
