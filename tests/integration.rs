use predicates::prelude::*;
use serde_json::Value;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_jsdoc-reconcile")));
    cmd.env_remove("RUST_LOG")
        .env_remove("JSDOC_RECONCILE_FORMAT")
        .env_remove("JSDOC_RECONCILE_INDENT");
    cmd
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}

fn json_lines(outcome: &Value) -> Vec<String> {
    outcome["lines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l.as_str().unwrap().to_string())
        .collect()
}

// -- stdin mode --

#[test]
fn stdin_mode_renders_blocks() {
    let assert = cmd().write_stdin(fixture("functions.json")).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output, fixture("functions.expected.js"));
}

#[test]
fn stdin_mode_json_report() {
    let assert = cmd()
        .args(["-f", "json"])
        .write_stdin(fixture("classes.json"))
        .assert()
        .success();
    let report: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let outcomes = report.as_array().unwrap();
    assert_eq!(outcomes.len(), 2);

    assert_eq!(outcomes[0]["name"], "User");
    assert!(outcomes[0]["existing"].is_null());
    assert_eq!(
        json_lines(&outcomes[0]),
        vec![
            "Represents a user.",
            "@class",
            "@constructor Creates a user.",
            "@param {string} id - The user ID.",
        ]
    );

    assert_eq!(
        json_lines(&outcomes[1]),
        vec![
            "Administrators can manage other users.",
            "",
            "@class",
            "@extends User",
            "@constructor Creates an admin.",
            "@param {string} id - The admin's badge number.",
            "@example",
            "const admin = new Admin('7');",
            "@internal",
        ]
    );
}

#[test]
fn stdin_mode_rejects_invalid_manifest() {
    cmd()
        .write_stdin("{\"items\": []}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("declarations"));
}

#[test]
fn unknown_tags_warn_but_survive() {
    let manifest = r#"[{
        "comment": "/**\n * Mystery.\n * @frobnicate loudly\n */",
        "metadata": {"kind": "function", "name": "mystery"}
    }]"#;
    cmd()
        .write_stdin(manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains(" * @frobnicate loudly"))
        .stderr(predicate::str::contains("unrecognized documentation tag"))
        .stderr(predicate::str::contains("mystery"));
}

#[test]
fn quiet_suppresses_warnings() {
    let manifest = r#"[{
        "comment": "/** @frobnicate */",
        "metadata": {"kind": "function", "name": "mystery"}
    }]"#;
    cmd()
        .arg("-q")
        .write_stdin(manifest)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn unknown_format_fails() {
    cmd()
        .args(["-f", "yaml"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

// -- file mode --

#[test]
fn file_mode_creates_output() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("functions.json"))
        .assert()
        .success();

    let output = std::fs::read_to_string(dir.path().join("functions.reconciled.js")).unwrap();
    assert_eq!(output, fixture("functions.expected.js"));
}

#[test]
fn file_mode_multiple_files() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap(), "-f", "json"])
        .arg(fixture_path("functions.json"))
        .arg(fixture_path("classes.json"))
        .assert()
        .success();

    assert!(dir.path().join("functions.reconciled.json").exists());
    assert!(dir.path().join("classes.reconciled.json").exists());
}

#[test]
fn file_mode_requires_output() {
    cmd()
        .arg(fixture_path("functions.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output is required"));
}

#[test]
fn file_mode_skips_broken_manifests() {
    let dir = TempDir::new().unwrap();
    let inputs = TempDir::new().unwrap();
    std::fs::write(inputs.path().join("broken.json"), "{ not json").unwrap();
    std::fs::copy(
        fixture_path("classes.json"),
        inputs.path().join("classes.json"),
    )
    .unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(inputs.path().to_str().unwrap())
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping"));

    assert!(dir.path().join("classes.reconciled.js").exists());
    assert!(!dir.path().join("broken.reconciled.js").exists());
}

#[test]
fn file_mode_skips_unreadable_manifests() {
    let dir = TempDir::new().unwrap();
    let inputs = TempDir::new().unwrap();
    std::fs::write(inputs.path().join("latin1.json"), [0xFF, 0xFE, b'[', b']']).unwrap();
    std::fs::copy(
        fixture_path("classes.json"),
        inputs.path().join("classes.json"),
    )
    .unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(inputs.path().to_str().unwrap())
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping"))
        .stderr(predicate::str::contains("latin1.json"));

    assert!(dir.path().join("classes.reconciled.js").exists());
    assert!(!dir.path().join("latin1.reconciled.js").exists());
}

#[test]
fn file_mode_keeps_outputs_with_the_same_stem() {
    let dir = TempDir::new().unwrap();
    let inputs = TempDir::new().unwrap();
    for sub in ["a", "b"] {
        std::fs::create_dir(inputs.path().join(sub)).unwrap();
    }
    std::fs::copy(fixture_path("functions.json"), inputs.path().join("a/users.json")).unwrap();
    std::fs::copy(fixture_path("classes.json"), inputs.path().join("b/users.json")).unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(inputs.path().join("a/users.json").to_str().unwrap())
        .arg(inputs.path().join("b/users.json").to_str().unwrap())
        .assert()
        .success()
        .stderr(predicate::str::contains("collides"));

    let first = std::fs::read_to_string(dir.path().join("users.reconciled.js")).unwrap();
    assert_eq!(first, fixture("functions.expected.js"));
    let second = std::fs::read_to_string(dir.path().join("users-2.reconciled.js")).unwrap();
    assert!(second.contains("@extends User"));
}

#[test]
fn file_mode_env_format() {
    let dir = TempDir::new().unwrap();

    cmd()
        .env("JSDOC_RECONCILE_FORMAT", "json")
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("classes.json"))
        .assert()
        .success();

    assert!(dir.path().join("classes.reconciled.json").exists());
}

// -- check mode --

#[test]
fn check_fails_when_documentation_would_change() {
    cmd()
        .arg("--check")
        .arg(fixture_path("functions.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("3 declaration(s) would change"));
}

#[test]
fn check_passes_on_reconciled_documentation() {
    let mut manifest = NamedTempFile::new().unwrap();
    manifest
        .write_all(
            br#"[{
                "comment": "/**\n * Loads a user.\n *\n * @param {number} id - The identifier.\n * @see https://example.com\n */",
                "metadata": {
                    "kind": "function",
                    "name": "loadUser",
                    "description": "Generated text.",
                    "params": [{"name": "id", "type": "number", "description": "Generated id text."}]
                }
            }]"#,
        )
        .unwrap();

    cmd()
        .arg("--check")
        .arg(manifest.path().to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
