//! The templates shipped in this repository must satisfy their own guides.

use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .unwrap()
        .to_path_buf()
}

#[test]
fn test_bundled_guides_pass_every_check() {
    if which::which("bash").is_err() {
        eprintln!("bash not installed; skipping");
        return;
    }

    let root = workspace_root();
    let output = Command::new(env!("CARGO_BIN_EXE_templint"))
        .current_dir(&root)
        .env_remove("TEMPLINT_CONFIG")
        .args(["validate", "--json", "--config"])
        .arg(root.join("templint.toml"))
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(
        output.status.success(),
        "bundled templates failed validation:\n{}",
        serde_json::to_string_pretty(&json["data"]).unwrap()
    );
    assert_eq!(json["data"]["summary"]["documents"], 2);
    assert_eq!(json["data"]["cross_document"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["summary"]["failed"], 0);
}

#[test]
fn test_shell_guide_gets_shell_only_checks() {
    let root = workspace_root();

    Command::new(env!("CARGO_BIN_EXE_templint"))
        .current_dir(&root)
        .env_remove("TEMPLINT_CONFIG")
        .args(["validate", "templates/shell-project/CUSTOMIZATION.md", "--config"])
        .arg(root.join("templint.toml"))
        .assert()
        .stdout(predicate::str::contains("shell-best-practices"))
        .stdout(predicate::str::contains("shellcheck-examples"));
}
