use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_describes_the_tool() {
    let mut cmd = Command::cargo_bin("skysearch").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deep flight search client"))
        .stdout(predicate::str::contains("--depart"));
}

#[test]
fn test_missing_airports_is_an_error() {
    let mut cmd = Command::cargo_bin("skysearch").unwrap();
    cmd.arg("--depart")
        .arg("2026-10-01")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_invalid_depart_date_is_an_error() {
    let mut cmd = Command::cargo_bin("skysearch").unwrap();
    cmd.args(["SFO", "NRT", "--depart", "not-a-date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--depart"));
}
