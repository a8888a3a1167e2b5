//! End-to-end tests for the `pbxsync diff` command.
//!
//! `diff` is read-only: every test also checks that the project file is
//! left byte-for-byte unchanged.

mod common;
use common::prelude::*;

#[test]
fn test_diff_help() {
    let mut cmd = cargo_bin_cmd!("pbxsync");
    cmd.arg("diff")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Show what a sync would change, without writing anything",
        ))
        .stdout(predicate::str::contains("--summary"));
}

#[test]
fn test_diff_lists_changes() {
    let fixture = TestFixture::new().with_project();
    let original = fixture.project_text();

    fixture
        .command()
        .args(["diff", "--from", "App", "--to", "App Beta", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ AppDelegate.m"))
        .stdout(predicate::str::contains("- BetaOnly.m"))
        .stdout(predicate::str::contains("~ main.m"))
        .stdout(predicate::str::contains("+ UIKit.framework"))
        .stdout(predicate::str::contains("+ Main.storyboard"))
        .stdout(predicate::str::contains(
            "Summary: 3 added, 1 removed, 1 changed",
        ));

    assert_eq!(fixture.project_text(), original);
}

#[test]
fn test_diff_summary() {
    let fixture = TestFixture::new().with_project();

    fixture
        .command()
        .args([
            "diff", "--from", "App", "--to", "App Beta", "--all", "--summary",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "sources: 1 added, 1 removed, 1 changed",
        ))
        .stdout(predicate::str::contains(
            "frameworks: 1 added, 0 removed, 0 changed",
        ))
        .stdout(predicate::str::contains("AppDelegate.m").not());
}

#[test]
fn test_diff_reverse_direction() {
    let fixture = TestFixture::new().with_project();

    fixture
        .command()
        .args(["diff", "--from", "App Beta", "--to", "App", "--phases", "sources"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sync 'App Beta' -> 'App'"))
        .stdout(predicate::str::contains("+ BetaOnly.m"))
        .stdout(predicate::str::contains("- AppDelegate.m"));
}

#[test]
fn test_diff_after_sync_reports_no_changes() {
    let fixture = TestFixture::new().with_project();

    fixture
        .command()
        .args(["sync", "--from", "App", "--to", "App Beta", "--all"])
        .assert()
        .success();

    fixture
        .command()
        .args(["diff", "--from", "App", "--to", "App Beta", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(no changes)"))
        .stdout(predicate::str::contains("No changes detected."));
}

#[test]
fn test_diff_unknown_phase_kind() {
    let fixture = TestFixture::new().with_project();

    fixture
        .command()
        .args(["diff", "--from", "App", "--to", "App Beta", "--phases", "headers"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'headers'"));
}

#[test]
fn test_diff_invalid_config() {
    let fixture = TestFixture::new()
        .with_project()
        .with_config("sourse: App\n");

    fixture
        .command()
        .args(["diff", "--from", "App", "--to", "App Beta", "--all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration parsing error"))
        .stderr(predicate::str::contains("hint:"));
}
