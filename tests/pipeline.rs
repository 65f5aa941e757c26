//! End-to-end tests driving the locale-root binary against synthetic exports.
//!
//! Run with: `cargo test --test pipeline`

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

const AR_INDEX: &str =
    r#"<html><head></head><body><a href="/en/about-us/">English</a></body></html>"#;
const AR_ABOUT: &str = r#"<html><head></head><body><a href="/ar">الرئيسية</a></body></html>"#;
const EN_INDEX: &str =
    r#"<html><head></head><body><a href="/about-us/">About</a></body></html>"#;
const EN_ABOUT: &str = r#"<html><head></head><body><a href="/">Home</a></body></html>"#;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap_or_else(|e| panic!("could not read {rel}: {e}"))
}

/// Minimal bilingual export as the site builder leaves it.
fn sample_export(out: &Path) {
    write(
        out,
        "index.html",
        r#"<meta http-equiv="refresh" content="0; url=/ar/">"#,
    );
    write(out, "favicon.ico", "root icon");
    write(out, "robots.txt", "User-agent: *\n");
    write(out, "ar/index.html", AR_INDEX);
    write(out, "ar/about-us/index.html", AR_ABOUT);
    write(out, "en/index.html", EN_INDEX);
    write(out, "en/about-us/index.html", EN_ABOUT);
}

/// Run the binary against `out`, asserting success. The config file is read
/// from inside `out` so tests can drop one there; a missing file means
/// defaults.
fn run(out: &Path, args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_locale-root"))
        .arg("--output")
        .arg(out)
        .arg("--config")
        .arg(out.join("locale-root.toml"))
        .args(args)
        .output()
        .expect("failed to run locale-root");
    assert!(
        output.status.success(),
        "locale-root failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

#[test]
fn full_run_restructures_export() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path();
    sample_export(out);

    run(out, &["run"]);

    // Default locale serves from the root with stripped links and the
    // redirect script in place.
    let root_index = read(out, "index.html");
    assert!(root_index.contains(r#"href="/about-us/""#), "got: {root_index}");
    assert!(root_index.contains(r#"id="locale-redirect""#));

    // Secondary tree links stay inside its namespace, no script.
    let en_index = read(out, "_locales/en/index.html");
    assert!(en_index.contains(r#"href="/_locales/en/about-us/""#), "got: {en_index}");
    assert!(!en_index.contains(r#"id="locale-redirect""#));
    let en_about = read(out, "_locales/en/about-us/index.html");
    assert!(en_about.contains(r#"href="/_locales/en/""#), "got: {en_about}");

    // The default-locale backup is byte-identical to the build output.
    assert_eq!(read(out, "_locales/ar/index.html"), AR_INDEX);
    assert_eq!(read(out, "_locales/ar/about-us/index.html"), AR_ABOUT);

    // The top-level locale trees are gone.
    assert!(!out.join("ar").exists());
    assert!(!out.join("en").exists());
}

#[test]
fn full_run_preserves_shared_root_assets() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path();
    sample_export(out);
    write(out, "ar/favicon.ico", "locale icon");
    write(out, "ar/robots.txt", "locale robots");

    run(out, &["run"]);

    assert_eq!(read(out, "favicon.ico"), "root icon");
    assert_eq!(read(out, "robots.txt"), "User-agent: *\n");
}

#[test]
fn no_subcommand_runs_full_pipeline() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path();
    sample_export(out);

    let output = run(out, &[]);
    let stdout = stdout_of(&output);

    for stage in 1..=5 {
        assert!(
            stdout.contains(&format!("==> Stage {stage}:")),
            "missing stage {stage} header in:\n{stdout}"
        );
    }
    assert!(stdout.contains("Restructure complete"));
    assert!(!out.join("ar").exists());
    assert!(out.join("_locales/en/index.html").exists());
}

#[test]
fn missing_secondary_locale_still_runs() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path();
    write(out, "ar/index.html", AR_INDEX);

    let output = run(out, &["run"]);
    let stdout = stdout_of(&output);

    assert!(stdout.contains("en missing, skipped"), "got:\n{stdout}");
    assert!(read(out, "index.html").contains(r#"id="locale-redirect""#));
    assert!(!out.join("_locales/en").exists());
}

// ---------------------------------------------------------------------------
// Individual stages
// ---------------------------------------------------------------------------

#[test]
fn rewrite_rerun_is_stable() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path();
    sample_export(out);

    run(out, &["run"]);
    let root_index = read(out, "index.html");
    let en_index = read(out, "_locales/en/index.html");
    let ar_backup = read(out, "_locales/ar/index.html");

    run(out, &["rewrite"]);

    assert_eq!(read(out, "index.html"), root_index);
    assert_eq!(read(out, "_locales/en/index.html"), en_index);
    assert_eq!(read(out, "_locales/ar/index.html"), ar_backup);
}

#[test]
fn rewrite_skips_unreadable_pages() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path();
    write(out, "index.html", AR_INDEX);
    let garbled = b"\xff\xfe<head></head>".to_vec();
    fs::write(out.join("garbled.html"), &garbled).unwrap();

    // run() asserts exit 0; a page the tool cannot read must not fail the
    // stage or be rewritten in place.
    run(out, &["rewrite"]);

    assert_eq!(fs::read(out.join("garbled.html")).unwrap(), garbled);
    let index = read(out, "index.html");
    assert!(index.contains(r#"href="/about-us/""#), "got: {index}");
    assert!(index.contains(r#"id="locale-redirect""#));
}

#[test]
fn verify_reports_missing_pages() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path();
    write(out, "index.html", "home");

    let output = run(out, &["verify"]);
    let stdout = stdout_of(&output);

    assert!(stdout.contains("index.html \u{2192} ok"), "got:\n{stdout}");
    assert!(stdout.contains("MISSING"), "got:\n{stdout}");
    // Missing pages are diagnostic only; run() already asserted exit 0.
}

#[test]
fn gen_config_output_parses_back() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["gen-config"]);
    let stdout = stdout_of(&output);

    assert!(stdout.contains("[locales]"));
    let config: locale_root::config::RestructureConfig =
        toml::from_str(&stdout).expect("stock config should parse");
    assert_eq!(config.locales.default, "ar");
}

#[test]
fn archive_help_mentions_the_wipe() {
    // Standalone `archive` replaces an existing _locales/ archive; the help
    // text has to say so.
    let output = Command::new(env!("CARGO_BIN_EXE_locale-root"))
        .args(["archive", "--help"])
        .output()
        .expect("failed to run locale-root");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Wipe _locales/"), "got:\n{stdout}");
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn custom_routes_config_is_honored() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path();
    write(out, "locale-root.toml", "[rewrite]\nroutes = [\"team\"]\n");
    write(out, "ar/index.html", AR_INDEX);
    write(
        out,
        "en/index.html",
        r#"<html><head></head><body><a href="/team/">Team</a> <a href="/careers/">Careers</a></body></html>"#,
    );

    run(out, &["run"]);

    let en_index = read(out, "_locales/en/index.html");
    assert!(en_index.contains(r#"href="/_locales/en/team/""#), "got: {en_index}");
    assert!(en_index.contains(r#"href="/careers/""#), "got: {en_index}");
}

#[test]
fn run_report_writes_json() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path();
    sample_export(out);
    let report_path = tmp.path().join("report.json");

    run(out, &["run", "--report", report_path.to_str().unwrap()]);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["archive"]["archived"][0]["locale"], "ar");
    assert_eq!(report["prune"]["removed"], serde_json::json!(["ar", "en"]));
    assert!(report["rewrite"]["pages_scanned"].as_u64().unwrap() > 0);
}
