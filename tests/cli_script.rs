mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use regex::Regex;

use common::temp_home;

fn script(home: &std::path::Path, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("subtrack_cli")
        .unwrap()
        .env("SUBTRACK_CLI_SCRIPT", "1")
        .env("SUBTRACK_HOME", home)
        .env("NO_COLOR", "1")
        .write_stdin(input)
        .assert()
}

#[test]
fn script_mode_runs_first_launch_flow() {
    let home = temp_home();
    script(
        &home,
        "login\nskip\ndashboard\nset-pin\npin 4321\npin 4321\nexit\n",
    )
    .success()
    .stdout(contains("Signed in."))
    .stdout(contains("Onboarding skipped."))
    .stdout(contains("55 974 ₽"))
    .stdout(contains("Repeat the PIN to confirm it."))
    .stdout(contains("PIN saved."));

    let stored = std::fs::read_to_string(home.join("storage.json")).unwrap();
    assert!(stored.contains("\"userPin\""));
    assert!(!stored.contains("pinVerified"));
}

#[test]
fn restart_with_pin_starts_locked() {
    let home = temp_home();
    script(&home, "login\nskip\nset-pin\npin 4321\npin 4321\nexit\n").success();

    script(&home, "dashboard\npin 1111\npin 4321\ndashboard\nexit\n")
        .success()
        .stdout(contains("`dashboard` is not available on the locked screen"))
        .stdout(contains("Incorrect PIN. Try again."))
        .stdout(contains("PIN accepted."))
        .stdout(contains("Upcoming payments"));
}

#[test]
fn cancel_is_gated_behind_premium() {
    let home = temp_home();
    script(
        &home,
        "login\nskip\ncancel Netflix\npremium on\ncancel Netflix\ncancel \"Adobe Creative Cloud\"\nexit\n",
    )
    .success()
    .stdout(contains("Quick cancellation is available in Premium."))
    .stdout(contains("Cancel Netflix (App Store)"))
    .stdout(contains("https://example.com/cancel-subscription"));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let home = temp_home();
    script(&home, "logn\nexit\n")
        .success()
        .stdout(contains("Did you mean `login`?"));
}

#[test]
fn version_reports_package_version() {
    let home = temp_home();
    let output = Command::cargo_bin("subtrack_cli")
        .unwrap()
        .env("SUBTRACK_CLI_SCRIPT", "1")
        .env("SUBTRACK_HOME", &home)
        .write_stdin("version\nexit\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let pattern = Regex::new(r"SubTrack \d+\.\d+\.\d+").unwrap();
    assert!(pattern.is_match(&stdout), "unexpected output: {stdout}");
}

#[test]
fn config_changes_are_persisted() {
    let home = temp_home();
    script(&home, "config set quiet on\nexit\n").success();
    script(&home, "config show\nexit\n")
        .success()
        .stdout(contains("quiet").and(contains("on")));
}

#[test]
fn quiet_mode_hides_hints_but_keeps_results() {
    let home = temp_home();
    script(
        &home,
        "config set quiet on\nlogin\nskip\ndashboard\nsubscriptions\nstats\npremium on\ncancel Adobe Creative Cloud\nexit\n",
    )
    .success()
    .stdout(contains("Netflix"))
    .stdout(contains("[1] Netflix"))
    .stdout(contains("[##"))
    .stdout(contains("1. "))
    .stdout(contains("https://example.com/cancel-subscription"))
    .stdout(contains("Type `next`").not())
    .stdout(contains("Type `dashboard`").not());
}
