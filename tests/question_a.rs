use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

#[test]
fn question_a_output_right_answer() {
    let mut cmd = Command::cargo_bin("orbit-map").unwrap();
    cmd.args(["-q", "a", "-f", "tests/data/sample.txt"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::diff("42\n"));
}

#[test]
fn question_a_is_default() {
    let mut cmd = Command::cargo_bin("orbit-map").unwrap();
    cmd.current_dir("tests/data");
    cmd.assert()
        .success()
        .stdout(predicate::str::diff("54\n"));
}

#[test]
fn same_input_same_output() {
    let run = || {
        Command::cargo_bin("orbit-map")
            .unwrap()
            .args(["--file", "tests/data/input.txt"])
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn missing_root_fails() {
    let mut cmd = Command::cargo_bin("orbit-map").unwrap();
    cmd.args(["-f", "tests/data/no_root.txt"]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No root object(COM)"));
}

#[test]
fn malformed_line_fails() {
    let mut cmd = Command::cargo_bin("orbit-map").unwrap();
    cmd.args(["-f", "tests/data/malformed.txt"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid orbit specification(B-C)"));
}

#[test]
fn missing_file_fails() {
    let mut cmd = Command::cargo_bin("orbit-map").unwrap();
    cmd.args(["-f", "tests/data/not_there.txt"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read orbit map"));
}

#[test]
fn invalid_question_fails() {
    let mut cmd = Command::cargo_bin("orbit-map").unwrap();
    cmd.args(["-q", "c", "-f", "tests/data/sample.txt"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'c'"));
}
