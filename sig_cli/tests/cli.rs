use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

fn sigil() -> Command {
    Command::cargo_bin("sigil").unwrap()
}

fn write_sig(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write temp signature");
    path
}

#[test]
fn version_prints_crate_version() {
    sigil()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("sigil "));
}

#[test]
fn paths_lists_builtin_stdlib_by_default() {
    sigil()
        .arg("paths")
        .assert()
        .success()
        .stdout(predicate::str::contains("<builtin stdlib>"));
}

#[test]
fn paths_omits_builtin_stdlib_with_no_stdlib() {
    sigil()
        .args(["--no-stdlib", "paths"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<builtin stdlib>").not());
}

#[test]
fn parse_reports_declaration_count_for_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sig(&dir, "widget.sig", "class Widget\nend\n");

    sigil()
        .arg("parse")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 declaration"));
}

#[test]
fn parse_reports_syntax_error_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sig(&dir, "broken.sig", "class Widget\n");

    sigil()
        .arg("parse")
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("syntax error"));
}

#[test]
fn list_shows_classes_loaded_from_an_include_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_sig(&dir, "widget.sig", "class Widget\nend\n");

    sigil()
        .args(["--no-stdlib", "-I"])
        .arg(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget"));
}

#[test]
fn ancestors_reports_the_builtin_chain_for_object() {
    sigil()
        .args(["ancestors", "Object"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BasicObject"));
}

#[test]
fn methods_lists_inherited_methods_by_default() {
    sigil()
        .args(["methods", "String"])
        .assert()
        .success()
        .stdout(predicate::str::contains("length"));
}

#[test]
fn methods_no_inherit_hides_inherited_entries() {
    let assert = sigil()
        .args(["methods", "--no-inherit", "String"])
        .assert()
        .success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(out.contains("length"));
    assert!(!out.contains("initialize"));
}

#[test]
fn method_reports_no_such_method_for_unknown_selector() {
    sigil()
        .args(["method", "String", "does_not_exist"])
        .assert()
        .failure();
}

#[test]
fn validate_succeeds_on_the_bundled_standard_library() {
    sigil().arg("validate").assert().success();
}

#[test]
fn validate_fails_on_a_duplicate_superclass_declaration() {
    let dir = tempfile::tempdir().unwrap();
    write_sig(
        &dir,
        "conflict.sig",
        "class Widget < Object\nend\nclass Widget < String\nend\n",
    );

    sigil()
        .args(["-I"])
        .arg(dir.path())
        .arg("validate")
        .assert()
        .failure();
}

#[test]
fn ast_emits_json_filtered_by_pattern() {
    let dir = tempfile::tempdir().unwrap();
    write_sig(&dir, "widget.sig", "class Widget\nend\nclass Gadget\nend\n");

    let assert = sigil()
        .args(["--no-stdlib", "-I"])
        .arg(dir.path())
        .arg("ast")
        .arg("Widget")
        .assert()
        .success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(out.contains("Widget"));
    assert!(!out.contains("Gadget"));
}

#[test]
fn log_output_writes_to_the_requested_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("sigil.log");

    sigil()
        .args(["--log-level", "warn", "--log-output"])
        .arg(&log_file)
        .arg("paths")
        .assert()
        .success();

    assert!(log_file.exists());
}
