//! End-to-end scaffolding tests for skelly.
//!
//! Each test materializes a real manifest into a temp tree and checks the
//! action log on stdout together with the resulting filesystem state. The
//! command always runs from a `work/` subdirectory so the tree lands in the
//! temp root, one level up.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the skelly binary.
fn skelly_cmd() -> Command {
  cargo_bin_cmd!("skelly")
}

/// Create a temp tree with a `work/` cwd and a manifest one level up.
fn temp_tree(manifest: &str) -> TempDir {
  let temp = TempDir::new().unwrap();
  std::fs::create_dir(temp.path().join("work")).unwrap();
  std::fs::write(temp.path().join("structure.yml"), manifest).unwrap();
  temp
}

const BASIC_MANIFEST: &str = r#"
entries:
  - dir: "data/{raw,processed}"
  - file: "README.md"
    content: "hello"
"#;

#[test]
fn creates_tree_with_exact_log() {
  let temp = temp_tree(BASIC_MANIFEST);
  let base = temp.path();

  let expected = format!(
    "+ created 📁 {}\n+ created 📁 {}\n+ created 📄 {}\n",
    base.join("data/processed").display(),
    base.join("data/raw").display(),
    base.join("README.md").display(),
  );

  skelly_cmd()
    .current_dir(base.join("work"))
    .assert()
    .success()
    .stdout(predicate::str::diff(expected));

  assert!(base.join("data/raw").is_dir());
  assert!(base.join("data/processed").is_dir());
  assert_eq!(std::fs::read_to_string(base.join("README.md")).unwrap(), "hello");
}

#[test]
fn second_run_reports_only_exists() {
  let temp = temp_tree(BASIC_MANIFEST);

  skelly_cmd().current_dir(temp.path().join("work")).assert().success();

  skelly_cmd()
    .current_dir(temp.path().join("work"))
    .assert()
    .success()
    .stdout(predicate::str::contains("= exists  📁"))
    .stdout(predicate::str::contains("= exists  📄"))
    .stdout(predicate::str::contains("+ created").not());
}

#[test]
fn dry_run_logs_without_creating() {
  let temp = temp_tree(BASIC_MANIFEST);

  skelly_cmd()
    .current_dir(temp.path().join("work"))
    .arg("--dry-run")
    .assert()
    .success()
    .stdout(predicate::str::contains("+ created 📁"))
    .stdout(predicate::str::contains("+ created 📄"));

  assert!(!temp.path().join("data").exists());
  assert!(!temp.path().join("README.md").exists());
}

#[test]
fn existing_file_is_kept_without_force() {
  let temp = temp_tree("entries:\n  - file: README.md\n    content: new\n");
  std::fs::write(temp.path().join("README.md"), "old").unwrap();

  skelly_cmd()
    .current_dir(temp.path().join("work"))
    .assert()
    .success()
    .stdout(predicate::str::contains("= exists  📄"));

  assert_eq!(std::fs::read_to_string(temp.path().join("README.md")).unwrap(), "old");
}

#[test]
fn force_overwrites_existing_file() {
  let temp = temp_tree("entries:\n  - file: README.md\n    content: new\n");
  std::fs::write(temp.path().join("README.md"), "old").unwrap();

  skelly_cmd()
    .current_dir(temp.path().join("work"))
    .arg("--force")
    .assert()
    .success()
    .stdout(predicate::str::contains("+ created 📄"));

  assert_eq!(std::fs::read_to_string(temp.path().join("README.md")).unwrap(), "new");
}

#[test]
fn custom_manifest_name_is_honored() {
  let temp = TempDir::new().unwrap();
  std::fs::create_dir(temp.path().join("work")).unwrap();
  std::fs::write(temp.path().join("tree.yml"), "entries:\n  - dir: data\n").unwrap();

  skelly_cmd()
    .current_dir(temp.path().join("work"))
    .args(["-m", "tree.yml"])
    .assert()
    .success();

  assert!(temp.path().join("data").is_dir());
}

#[test]
fn project_root_redirects_tree() {
  let temp = temp_tree("project_root: app\nentries:\n  - dir: data\n");

  skelly_cmd()
    .current_dir(temp.path().join("work"))
    .assert()
    .success();

  assert!(temp.path().join("app/data").is_dir());
  assert!(!temp.path().join("data").exists());
}

#[test]
fn empty_entries_produce_no_output() {
  let temp = temp_tree("entries: []\n");

  skelly_cmd()
    .current_dir(temp.path().join("work"))
    .assert()
    .success()
    .stdout(predicate::str::is_empty());
}

#[cfg(unix)]
#[test]
fn mode_is_applied_to_created_file() {
  use std::os::unix::fs::PermissionsExt;

  let temp = temp_tree("entries:\n  - file: run.sh\n    content: \"#!/bin/sh\"\n    mode: \"700\"\n");

  skelly_cmd().current_dir(temp.path().join("work")).assert().success();

  let mode = std::fs::metadata(temp.path().join("run.sh")).unwrap().permissions().mode();
  assert_eq!(mode & 0o777, 0o700);
}

#[test]
fn invalid_mode_is_logged_not_fatal() {
  let temp = temp_tree(
    "entries:\n  - file: a.txt\n    mode: not-octal\n  - file: b.txt\n    content: ok\n",
  );

  skelly_cmd()
    .current_dir(temp.path().join("work"))
    .assert()
    .success()
    .stdout(predicate::str::contains("! chmod failed for"));

  assert!(temp.path().join("a.txt").exists());
  assert_eq!(std::fs::read_to_string(temp.path().join("b.txt")).unwrap(), "ok");
}
