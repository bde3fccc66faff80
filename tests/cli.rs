//! Exercises the actual `rocks` binary rather than the in-process `Rocks`
//! facade the other integration tests use — this is the one place the exit
//! codes and argument handling in `src/main.rs` get checked end-to-end.

use std::fs;

use assert_cmd::Command;

fn script_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("rocks_cli_test_{}_{name}.lox", std::process::id()))
}

fn write_script(name: &str, source: &str) -> std::path::PathBuf {
    let path = script_path(name);
    fs::write(&path, source).expect("temp script to be writable");
    path
}

#[test]
fn too_many_arguments_prints_usage_and_exits_64() {
    Command::cargo_bin("rocks")
        .unwrap()
        .arg("a")
        .arg("b")
        .assert()
        .code(64)
        .stdout("Usage: rocks [script]\n");
}

#[test]
fn running_a_valid_script_prints_output_and_exits_0() {
    let path = write_script("valid", "print 1 + 2;\n");

    Command::cargo_bin("rocks").unwrap().arg(&path).assert().code(0).stdout("3\n");

    fs::remove_file(path).ok();
}

#[test]
fn running_a_script_with_a_parse_error_exits_65() {
    let path = write_script("parse_error", "1 +;\n");

    Command::cargo_bin("rocks").unwrap().arg(&path).assert().code(65);

    fs::remove_file(path).ok();
}

#[test]
fn running_a_script_with_a_runtime_error_exits_70() {
    let path = write_script("runtime_error", "print 1 + \"a\";\n");

    Command::cargo_bin("rocks").unwrap().arg(&path).assert().code(70);

    fs::remove_file(path).ok();
}

#[test]
fn running_a_missing_file_exits_74() {
    let path = script_path("does_not_exist");
    fs::remove_file(&path).ok();

    Command::cargo_bin("rocks").unwrap().arg(&path).assert().code(74);
}
