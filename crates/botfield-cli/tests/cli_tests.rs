//! Drives the `botfield` binary end to end.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn botfield_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_botfield"))
}

fn botfield(dir: &Path, args: &[&str]) -> Output {
    Command::new(botfield_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .output()
        .expect("spawn botfield")
}

#[test]
fn non_positive_steps_fail_before_touching_the_database() {
    let dir = tempfile::tempdir().unwrap();

    for steps in ["0", "-3"] {
        let out = botfield(dir.path(), &["run", "--steps", steps, "--db", "sim.db"]);
        assert!(!out.status.success(), "steps={steps} should fail");
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("steps"), "stderr: {stderr}");
    }

    assert!(!dir.path().join("sim.db").exists());
}

#[test]
fn missing_steps_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = botfield(dir.path(), &["run"]);
    assert!(!out.status.success());
}

#[test]
fn inspecting_a_missing_database_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();

    for args in [&["summary", "--db", "typo.db"][..], &["feed", "--db", "typo.db"][..]] {
        let out = botfield(dir.path(), args);
        assert!(!out.status.success(), "{args:?} should fail");
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("typo.db"), "stderr: {stderr}");
    }

    assert!(!dir.path().join("typo.db").exists());
}

#[test]
fn run_then_inspect() {
    let dir = tempfile::tempdir().unwrap();

    let out = botfield(dir.path(), &["run", "--steps", "12", "--seed", "7", "--db", "sim.db"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Seed:   7"));
    assert!(stdout.contains("Post rate:"));

    let out = botfield(dir.path(), &["summary", "--db", "sim.db", "--json"]);
    assert!(out.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(summary["total_ticks"], 12);
    assert_eq!(summary["posts_per_agent"].as_array().map(Vec::len), Some(3));

    let out = botfield(dir.path(), &["feed", "--limit", "3", "--db", "sim.db"]);
    assert!(out.status.success());
}

#[test]
fn reset_starts_from_an_empty_log() {
    let dir = tempfile::tempdir().unwrap();

    assert!(botfield(dir.path(), &["run", "--steps", "5", "--db", "sim.db"]).status.success());
    assert!(botfield(dir.path(), &["run", "--steps", "5", "--db", "sim.db", "--reset"]).status.success());

    let out = botfield(dir.path(), &["summary", "--db", "sim.db", "--json"]);
    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(summary["total_ticks"], 5);
    assert_eq!(summary["posts_per_agent"].as_array().map(Vec::len), Some(3));
}

#[test]
fn init_writes_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let out = botfield(dir.path(), &["init"]);
    assert!(out.status.success());

    let config = std::fs::read_to_string(dir.path().join("botfield.toml")).unwrap();
    assert!(config.contains("seed = 42"));
    assert!(config.contains("engine = \"rule\""));
}
