//! Restructure configuration module.
//!
//! Handles loading and validating `locale-root.toml`. Everything
//! site-specific (locale codes, the protected-filename allow-list, the
//! known-route list, the verification page list) is data from this file, so
//! the copy and rewrite algorithms stay testable against synthetic trees.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [locales]
//! default = "ar"            # Locale promoted to the site root
//! secondary = "en"          # Locale kept under /_locales/<code>/
//!
//! [promote]
//! # Root files that must never be overwritten during promotion.
//! protected = ["favicon.ico", "robots.txt", "sitemap.xml", ...]
//!
//! [rewrite]
//! # Top-level route slugs that secondary-locale pages link to bare.
//! routes = ["about-us", "contact-us", "products", "news"]
//!
//! [verify]
//! # Pages (relative to the output root) expected to exist after a run.
//! pages = ["index.html", "about-us/index.html", ...]
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want.
//!
//! ```toml
//! # Only swap the locale pair
//! [locales]
//! default = "de"
//! secondary = "fr"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Directory at the output root holding the locale backups and the rewritten
/// secondary-locale tree. The traversal and rewrite rules key on this exact
/// name, so it is a constant rather than configuration.
pub const LOCALES_DIR: &str = "_locales";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Restructure configuration loaded from `locale-root.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RestructureConfig {
    /// Locale pair: which tree is promoted to the root, which is namespaced.
    pub locales: LocalesConfig,
    /// Promotion settings (protected root filenames).
    pub promote: PromoteConfig,
    /// Link rewriting settings (known internal routes).
    pub rewrite: RewriteConfig,
    /// Post-run verification settings (expected pages).
    pub verify: VerifyConfig,
}

/// The two locale codes the build emits as top-level directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalesConfig {
    /// Locale whose tree is copied over the output root.
    pub default: String,
    /// Locale whose tree stays reachable under `/_locales/<code>/`.
    pub secondary: String,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            default: "ar".to_string(),
            secondary: "en".to_string(),
        }
    }
}

impl LocalesConfig {
    /// Both locale codes, default locale first.
    pub fn codes(&self) -> [&str; 2] {
        [self.default.as_str(), self.secondary.as_str()]
    }

    /// Root-relative URL prefix of the secondary-locale tree, with leading
    /// and trailing slash (`/_locales/en/`).
    pub fn secondary_prefix(&self) -> String {
        format!("/{}/{}/", LOCALES_DIR, self.secondary)
    }
}

/// Promotion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromoteConfig {
    /// Exact filenames at the output root that promotion must not overwrite.
    ///
    /// Only immediate-child *files* of the default-locale tree are checked
    /// against this set; directories are always merged regardless of name.
    /// Listing shared asset directories here is harmless and documents
    /// intent. The root `index.html` is deliberately absent: the framework's
    /// redirect stub must be replaced by the real homepage.
    pub protected: BTreeSet<String>,
}

impl Default for PromoteConfig {
    fn default() -> Self {
        let protected = [
            "favicon.ico",
            "apple-touch-icon.png",
            "manifest.webmanifest",
            "robots.txt",
            "sitemap.xml",
            "images",
            "assets",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();
        Self { protected }
    }
}

/// Link rewriting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewriteConfig {
    /// Top-level route slugs that secondary-locale pages may link to as bare
    /// root-relative hrefs (`href="/about-us/"`). These get re-prefixed into
    /// the `/_locales/<secondary>/` namespace. Order is preserved.
    pub routes: Vec<String>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        let routes = ["about-us", "contact-us", "products", "news"]
            .into_iter()
            .map(str::to_string)
            .collect();
        Self { routes }
    }
}

/// Post-run verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifyConfig {
    /// Page paths, relative to the output root, expected to exist after a
    /// full run. Checked by the `verify` stage; diagnostic only.
    pub pages: Vec<String>,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        let pages = [
            "index.html",
            "about-us/index.html",
            "contact-us/index.html",
            "products/index.html",
            "_locales/en/index.html",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();
        Self { pages }
    }
}

impl RestructureConfig {
    /// Validate config values.
    ///
    /// Locale codes and route slugs are restricted to `[A-Za-z0-9_-]` so
    /// they can be spliced into regex patterns and replacement strings
    /// without further escaping concerns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for code in self.locales.codes() {
            if code.is_empty() {
                return Err(ConfigError::Validation(
                    "locale codes must not be empty".into(),
                ));
            }
            if !is_bare_slug(code) {
                return Err(ConfigError::Validation(format!(
                    "locale code '{code}' contains characters outside [A-Za-z0-9_-]"
                )));
            }
            if code == LOCALES_DIR {
                return Err(ConfigError::Validation(format!(
                    "locale code must not be named '{LOCALES_DIR}'"
                )));
            }
        }
        if self.locales.default == self.locales.secondary {
            return Err(ConfigError::Validation(
                "default and secondary locales must differ".into(),
            ));
        }
        for route in &self.rewrite.routes {
            if route.is_empty() || !is_bare_slug(route) {
                return Err(ConfigError::Validation(format!(
                    "route '{route}' must be a bare slug ([A-Za-z0-9_-], no slashes)"
                )));
            }
        }
        for page in &self.verify.pages {
            if page.is_empty() || page.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "verify page '{page}' must be a non-empty path relative to the output root"
                )));
            }
        }
        Ok(())
    }
}

fn is_bare_slug(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

// =============================================================================
// Config loading
// =============================================================================

/// Load config from a `locale-root.toml` file.
///
/// A missing file yields the stock defaults. User files are sparse: omitted
/// sections and keys keep their defaults, unknown keys are rejected, and the
/// result is validated.
pub fn load_config(path: &Path) -> Result<RestructureConfig, ConfigError> {
    let config: RestructureConfig = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        RestructureConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `locale-root.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# locale-root configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Locales
# ---------------------------------------------------------------------------
[locales]
# Locale whose tree is copied over the output root.
default = "ar"

# Locale whose tree stays reachable under /_locales/<code>/.
secondary = "en"

# ---------------------------------------------------------------------------
# Promotion
# ---------------------------------------------------------------------------
[promote]
# Root files that promotion must never overwrite. These are shared assets
# placed at the output root independently of the locale build.
#
# Only top-level *files* of the default-locale tree are checked against this
# list; directories are always merged regardless of name (the directory
# entries below document intent). index.html is deliberately not listed:
# the framework's root redirect stub must be replaced by the real homepage.
protected = [
    "apple-touch-icon.png",
    "assets",
    "favicon.ico",
    "images",
    "manifest.webmanifest",
    "robots.txt",
    "sitemap.xml",
]

# ---------------------------------------------------------------------------
# Link rewriting
# ---------------------------------------------------------------------------
[rewrite]
# Top-level route slugs that secondary-locale pages link to as bare
# root-relative hrefs (href="/about-us/"). These are re-prefixed into the
# /_locales/<secondary>/ namespace. Order is preserved.
routes = ["about-us", "contact-us", "products", "news"]

# ---------------------------------------------------------------------------
# Verification
# ---------------------------------------------------------------------------
[verify]
# Pages (relative to the output root) expected to exist after a full run.
# Checked by the verify stage; results are printed but never change the
# exit code.
pages = [
    "index.html",
    "about-us/index.html",
    "contact-us/index.html",
    "products/index.html",
    "_locales/en/index.html",
]
"##
}
