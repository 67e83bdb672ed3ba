use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

#[test]
fn question_b_output_right_answer() {
    let mut cmd = Command::cargo_bin("orbit-map").unwrap();
    cmd.args(["-q", "b", "-f", "tests/data/input.txt"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::diff("4\n"));
}

#[test]
fn question_b_with_custom_endpoints() {
    let mut cmd = Command::cargo_bin("orbit-map").unwrap();
    cmd.args([
        "-q",
        "b",
        "-f",
        "tests/data/input.txt",
        "--from",
        "F",
        "--to",
        "H",
    ]);
    // E -> D -> C -> B -> G
    cmd.assert()
        .success()
        .stdout(predicate::str::diff("4\n"));
}

#[test]
fn question_b_without_travellers_fails() {
    let mut cmd = Command::cargo_bin("orbit-map").unwrap();
    cmd.args(["-q", "b", "-f", "tests/data/sample.txt"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Object(YOU) not found"));
}

#[test]
fn question_b_with_punctuated_names() {
    let mut cmd = Command::cargo_bin("orbit-map").unwrap();
    cmd.args(["-q", "b", "-f", "tests/data/punctuated.txt"]);
    // YOU orbits B.2, SAN orbits A-1: B.2 -> A-1
    cmd.assert()
        .success()
        .stdout(predicate::str::diff("1\n"));
}
