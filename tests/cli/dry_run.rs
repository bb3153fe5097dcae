//! Tests for `key-rotator rotate --dry-run`.

use crate::support::*;

#[test]
fn test_dry_run_reports_without_writing() {
    let t = Test::with_config(SINGLE_REPOSITORY);

    let output = t.rotate_dry_run("abc123\ny\n");
    assert_success(&output);
    assert_stdout_contains(&output, "Running in dry-run mode");
    assert_stdout_contains(
        &output,
        "[Dry Run] Would update TEST_SECRET GitHub Repository Secret in the o/r repository (Test repo secret) with provided secret value for test-secret",
    );
    assert_nothing_updated(&output);
}

#[test]
fn test_dry_run_makes_no_requests() {
    let t = Test::with_config(ALL_DESTINATIONS);
    let github = MockGitHub::start();

    let output = t
        .cmd()
        .args(["rotate", "config.yaml", "--dry-run", "--api-url", github.url()])
        .write_stdin("abc123\ny\n")
        .output()
        .unwrap();
    assert_success(&output);
    assert!(github.requests().is_empty());

    let out = stdout(&output);
    assert_eq!(out.matches("[Dry Run] Would update").count(), 3);
}

#[test]
fn test_dry_run_still_asks_for_confirmation() {
    let t = Test::with_config(SINGLE_REPOSITORY);

    let output = t.rotate_dry_run("abc123\nn\n");
    assert_success(&output);
    assert_cancelled(&output);
    assert_stdout_excludes(&output, "[Dry Run]");
}

#[test]
fn test_dry_run_lists_destinations_before_confirming() {
    let t = Test::with_config(ALL_DESTINATIONS);

    let output = t.rotate_dry_run("abc123\ny\n");
    assert_success(&output);

    let out = stdout(&output);
    let header = out.find("The following destinations will be updated:").unwrap();
    let question = out.find("(y/N)").unwrap();
    let first_update = out.find("[Dry Run]").unwrap();
    assert!(header < question && question < first_update);
    assert_stdout_contains(
        &output,
        "- DEPLOY_TOKEN GitHub Repository Environment Secret in the o/r repository's production environment",
    );
}

#[test]
fn test_dry_run_requires_token() {
    let t = Test::with_config(SINGLE_REPOSITORY);

    let output = t
        .cmd()
        .env_remove("GITHUB_TOKEN")
        .args(["rotate", "config.yaml", "--dry-run"])
        .write_stdin("abc123\ny\n")
        .output()
        .unwrap();
    assert_error(&output, "GITHUB_TOKEN");
    assert_hint(&output, "export GITHUB_TOKEN=<token>");
}
