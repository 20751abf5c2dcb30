use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    corpus_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let corpus_path = dir.path().join("corpus.txt");
        fs::write(
            &corpus_path,
            "the quick brown fox jumps over the lazy dog\n\
             pack my box with five dozen liquor jugs\n\
             sphinx of black quartz judge my vow\n",
        )
        .unwrap();
        Self { dir, corpus_path }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_keyscope"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn s(p: &Path) -> &str {
    p.to_str().unwrap()
}

#[test]
fn test_cli_analyze_json() {
    let ctx = TestContext::new();
    let output = run(&[
        "analyze",
        "--corpus",
        s(&ctx.corpus_path),
        "--layout",
        "colemak_dh",
        "--json",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["layout_name"], "colemak_dh");
    assert!(report["sfb"].is_number());
    assert!(report["effort"].as_f64().unwrap() > 0.0);
    assert!(report["diagnostics"]["top_sfbs"].is_array());
}

#[test]
fn test_cli_analyze_tables() {
    let ctx = TestContext::new();
    let output = run(&["analyze", "--corpus", s(&ctx.corpus_path)]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    println!("{}", stdout);
    assert!(stdout.contains("sfb"));
    assert!(stdout.contains("qwerty"));
}

#[test]
fn test_cli_compare_sorted_ascending() {
    let ctx = TestContext::new();
    let output = run(&[
        "compare",
        "--corpus",
        s(&ctx.corpus_path),
        "--layouts",
        "qwerty,dvorak,colemak",
        "--sort-by",
        "effort",
        "--json",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let reports: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports.len(), 3);
    let efforts: Vec<f64> = reports
        .iter()
        .map(|r| r["effort"].as_f64().unwrap())
        .collect();
    assert!(efforts.windows(2).all(|w| w[0] <= w[1]), "{:?}", efforts);
}

#[test]
fn test_cli_corpus_export_and_reuse() {
    let ctx = TestContext::new();
    let out = ctx.path("tables");
    let output = run(&["corpus", "--corpus", s(&ctx.corpus_path), "--out", s(&out)]);
    assert!(output.status.success());
    assert!(out.join("1grams.csv").exists());
    assert!(out.join("2grams.csv").exists());
    assert!(out.join("3grams.csv").exists());

    let from_text = run(&["analyze", "--corpus", s(&ctx.corpus_path), "--json"]);
    let from_counts = run(&["analyze", "--counts", s(&out), "--json"]);
    assert!(from_counts.status.success());

    let a: serde_json::Value = serde_json::from_slice(&from_text.stdout).unwrap();
    let b: serde_json::Value = serde_json::from_slice(&from_counts.stdout).unwrap();
    assert_eq!(a["corpus_version"], b["corpus_version"]);
    assert_eq!(a["sfb"], b["sfb"]);
}

#[test]
fn test_cli_layout_file_and_config_file() {
    let ctx = TestContext::new();
    let layout = ctx.path("mine.json");
    fs::write(&layout, r#"{"t": "H3", "h": "H6", "e": "H2"}"#).unwrap();
    let config = ctx.path("config.json");
    fs::write(&config, r#"{"rules": {"required_alphabet": "the"}}"#).unwrap();

    let output = run(&[
        "analyze",
        "--config",
        s(&config),
        "--corpus",
        s(&ctx.corpus_path),
        "--layout",
        s(&layout),
        "--json",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["layout_name"], "mine");
    assert!(report["diagnostics"]["unmapped_pct"].as_f64().unwrap() > 50.0);
}

#[test]
fn test_cli_errors_exit_nonzero() {
    let ctx = TestContext::new();

    let unknown = run(&["analyze", "--corpus", s(&ctx.corpus_path), "--layout", "nope"]);
    assert!(!unknown.status.success());
    assert!(String::from_utf8_lossy(&unknown.stderr).contains("nope"));

    let empty = ctx.path("empty.txt");
    fs::write(&empty, "   \n\t ").unwrap();
    let output = run(&["analyze", "--corpus", s(&empty)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("empty"));

    let bad_metric = run(&["compare", "--corpus", s(&ctx.corpus_path), "--sort-by", "speed"]);
    assert!(!bad_metric.status.success());
}
