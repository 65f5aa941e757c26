//! # locale-root
//!
//! A post-build restructurer for bilingual static site exports. The build
//! framework emits one tree per locale (`out/ar/`, `out/en/`) plus a root
//! redirect stub; this tool flattens that export so the default locale is
//! served from `/` and the secondary locale from `/_locales/<code>/`, with
//! every internal link fixed up to match.
//!
//! # Architecture: Five-Stage Pipeline
//!
//! A full run transforms the export in place through five ordered stages:
//!
//! ```text
//! 1. Archive   ar/, en/      →  _locales/ar/, _locales/en/   (verbatim copies)
//! 2. Promote   ar/*          →  out root                      (allow-list aware)
//! 3. Rewrite   every *.html  →  fixed hrefs + redirect script
//! 4. Prune     ar/, en/      →  deleted
//! 5. Verify    expected pages exist?                          (diagnostic)
//! ```
//!
//! Before and after:
//!
//! ```text
//! out/                         out/
//! ├── index.html  (stub)       ├── index.html  (real ar homepage)
//! ├── favicon.ico              ├── favicon.ico (untouched)
//! ├── ar/                      ├── about-us/
//! │   ├── index.html           │   └── index.html
//! │   └── about-us/            └── _locales/
//! │       └── index.html           ├── ar/     (pristine backup)
//! └── en/                          └── en/     (links re-prefixed)
//!     └── index.html
//! ```
//!
//! Each stage is also exposed as its own CLI subcommand, because deploy
//! scripts occasionally need to re-run a single step (most often `rewrite`
//! after hand-editing a page).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`archive`] | Stage 1 - copies both locale trees verbatim into `_locales/` |
//! | [`promote`] | Stage 2 - copies the default-locale tree over the output root |
//! | [`rewrite`] | Stage 3 - fixes hrefs per tree region and injects the locale redirect |
//! | [`prune`] | Stage 4 - deletes the now-redundant top-level locale directories |
//! | [`verify`] | Stage 5 - existence checks for the configured expected pages |
//! | [`config`] | `locale-root.toml` loading and validation |
//! | [`report`] | Aggregate per-stage report, serializable as JSON |
//! | [`output`] | CLI output formatting for all stages |
//!
//! # Design Decisions
//!
//! ## Text Replacement Over HTML Parsing
//!
//! Links are rewritten with regex and substring replacement on the raw
//! markup, not via a DOM. The pages come from a single known build pipeline
//! with predictable quoting, so the patterns are reliable, and the tool
//! stays fast and dependency-light. The trade-off is documented in
//! [`rewrite`]: hrefs inside inline scripts or comments are rewritten too.
//!
//! ## Uniformly Non-Fatal Stages
//!
//! The tool runs at the tail of a deploy. A missing locale tree, an
//! unreadable page, or a failed deletion should never take the deploy down
//! with it: each stage reports what it skipped and the run carries on. Only
//! environment-level failures (unreadable output root, invalid config)
//! abort.
//!
//! ## Stage-Level Re-Runs
//!
//! Every stage tolerates being run again: the archive wipes stale copies
//! before writing, rewriting is idempotent, injection is guarded by a
//! marker id, and pruning treats already-deleted trees as success. A full
//! re-run wants a fresh export though, since pruning consumes the locale
//! trees the archive stage feeds on.
//!
//! ## Everything Configurable Is Data
//!
//! Locale codes, the protected allow-list, known routes, and the expected
//! page list all live in [`config`]. Nothing site-specific is hardcoded,
//! which keeps every stage testable against synthetic trees.

pub mod archive;
pub mod config;
pub mod output;
pub mod promote;
pub mod prune;
pub mod report;
pub mod rewrite;
pub mod verify;

#[cfg(test)]
pub(crate) mod test_helpers;
