//! End-to-end regression coverage through the self-test binary: marker
//! stream, summary report, selectors, and process exit codes.

use assert_cmd::Command;
use predicates::prelude::*;

fn selftest() -> Command {
    let mut cmd = Command::cargo_bin("selftest").expect("selftest binary builds");
    // Keep the run deterministic regardless of the invoking environment.
    cmd.env_remove("CANOPY_SCOPE")
        .env_remove("CANOPY_TEST")
        .env_remove("CANOPY_BACKTRACE");
    cmd
}

#[test]
fn the_full_suite_reports_every_outcome_kind_and_exits_nonzero() {
    selftest()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("..FSEE"))
        .stdout(predicate::str::contains("failure: deliberate failure"))
        .stdout(predicate::str::contains("skip:"))
        .stdout(predicate::str::contains("error: deliberate panic"))
        .stdout(predicate::str::contains("error: malformed declaration"))
        .stdout(predicate::str::contains("unit: selftest/broken_test"))
        .stdout(predicate::str::contains("1 failed, 1 skipped, 2 errored"));
}

#[test]
fn a_pattern_narrows_the_loaded_units() {
    selftest()
        .arg("selftest/scope_test")
        .assert()
        .code(0)
        .stdout(predicate::str::contains(".."))
        .stdout(predicate::str::contains("failure").not())
        .stdout(predicate::str::contains("error").not());
}

#[test]
fn the_scope_selector_restricts_execution_without_hiding_load_errors() {
    selftest()
        .args(["--scope", "outcomes"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FSEE"));
}

#[test]
fn a_skip_only_selection_still_succeeds() {
    selftest()
        .args(["selftest/outcome_test", "--test", "skips deliberately"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("S\n"))
        .stdout(predicate::str::contains("0 failed, 1 skipped, 0 errored"));
}

#[test]
fn selectors_can_come_from_the_environment() {
    let mut cmd = selftest();
    cmd.env("CANOPY_TEST", "skips deliberately");
    cmd.arg("selftest/outcome_test")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("0 failed, 1 skipped, 0 errored"));
}

#[test]
fn an_invalid_pattern_is_a_usage_error() {
    selftest()
        .arg("[")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid unit pattern"));
}
