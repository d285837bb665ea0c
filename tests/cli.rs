//! End-to-end runs of the `photo-facets` binary against the fixture corpus.
//!
//! Run with: `cargo test --test cli`

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture_corpus() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/corpus.json")
}

fn run(config_dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_photo-facets"))
        .arg("--corpus")
        .arg(fixture_corpus())
        .arg("--config-dir")
        .arg(config_dir.path())
        .args(args)
        .output()
        .unwrap()
}

fn stdout(out: &Output) -> String {
    assert!(
        out.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn filter_and_mode_prints_single_photo() {
    let tmp = TempDir::new().unwrap();
    let out = run(
        &tmp,
        &["filter", "--tag", "street", "--tag", "night", "--logic", "and"],
    );
    let text = stdout(&out);
    assert!(text.starts_with("Listing all: 1 photo\n"), "{text}");
    assert!(text.contains("001 Neon Alley (tokyo/neon-alley)"));
    // The fixture has a photo in an album that does not exist
    assert!(String::from_utf8_lossy(&out.stderr).contains("missing album"));
}

#[test]
fn filter_honors_config_logic() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("config.toml"), "[filter]\ntag_logic = \"and\"\n").unwrap();
    let text = stdout(&run(&tmp, &["filter", "--tag", "street", "--tag", "night"]));
    assert!(text.starts_with("Listing all: 1 photo\n"), "{text}");
}

#[test]
fn filter_shutter_fraction_range() {
    let tmp = TempDir::new().unwrap();
    let text = stdout(&run(&tmp, &["filter", "--shutter", "1/1000:1/200"]));
    assert!(text.starts_with("Listing all: 2 photos\n"), "{text}");
    assert!(text.contains("(tokyo/crossing)"));
    assert!(text.contains("(tokyo/temple-gate)"));
}

#[test]
fn search_writing_lists_entries() {
    let tmp = TempDir::new().unwrap();
    let text = stdout(&run(&tmp, &["search", "--writing", "street tokyo"]));
    assert!(text.contains("001 Street photography, Tokyo 2024 [post, 2024-04-01]"));
}

#[test]
fn check_reports_dangling_reference() {
    let tmp = TempDir::new().unwrap();
    let text = stdout(&run(&tmp, &["check"]));
    assert!(text.contains("archive/old-roll"));
    assert!(text.contains("==> Corpus is valid"));
}

#[test]
fn invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("config.toml"), "[filter]\ntag_logik = \"and\"\n").unwrap();
    let out = run(&tmp, &["filter"]);
    assert!(!out.status.success());
}

#[test]
fn gen_config_prints_stock_file() {
    let tmp = TempDir::new().unwrap();
    let text = stdout(&run(&tmp, &["gen-config"]));
    assert!(text.contains("[listings]"));
    assert!(text.contains("missing_exif = \"exclude\""));
}
