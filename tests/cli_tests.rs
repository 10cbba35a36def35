use mockito::{Matcher, Server};
use predicates::prelude::*;
use serial_test::serial;
use tempfile::tempdir;

use test_helpers::base_serene_command;

#[test]
fn test_help_lists_subcommands() {
    let dir = tempdir().unwrap();
    base_serene_command(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("analyze")
                .and(predicate::str::contains("motivate"))
                .and(predicate::str::contains("suggest"))
                .and(predicate::str::contains("mood")),
        );
}

#[test]
fn test_missing_subcommand_fails() {
    let dir = tempdir().unwrap();
    base_serene_command(dir.path()).assert().failure();
}

#[test]
#[serial]
fn test_status_without_key_reports_not_configured() {
    let dir = tempdir().unwrap();
    base_serene_command(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("AI: not configured"));
}

#[test]
#[serial]
fn test_status_reports_fresh_quota() {
    let dir = tempdir().unwrap();
    base_serene_command(dir.path())
        .args(["status", "--user", "u1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily analysis: available"));

    assert!(dir.path().join("serene.db").exists());
}

#[test]
#[serial]
fn test_analyze_without_key_fails_with_configuration_message() {
    let dir = tempdir().unwrap();
    base_serene_command(dir.path())
        .args(["analyze", "--user", "u1", "Today was calm."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not set up correctly"));

    // A failed analysis does not spend the allowance.
    base_serene_command(dir.path())
        .args(["status", "--user", "u1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily analysis: available"));
}

#[test]
#[serial]
fn test_suggest_degrades_to_no_suggestions() {
    let dir = tempdir().unwrap();
    base_serene_command(dir.path())
        .args(["suggest", "--goal", "Sleep earlier"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No suggestions available"));
}

#[test]
#[serial]
fn test_mood_degrades_to_neutral_json() {
    let dir = tempdir().unwrap();
    base_serene_command(dir.path())
        .args(["--log-format", "json", "mood", "Rainy day."])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"mood\": \"unspecified\"")
                .and(predicate::str::contains("\"sentiment\": \"neutral\"")),
        );
}

#[test]
#[serial]
fn test_status_reports_when_allowance_was_used() {
    let mut server = Server::new();
    server
        .mock("POST", Matcher::Regex(r":generateContent".into()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"Rest well tonight."}]}}]}"#)
        .create();

    let dir = tempdir().unwrap();
    base_serene_command(dir.path())
        .env("SERENE_AI_API_KEY", "test-key")
        .env("SERENE_AI_BASE_URL", server.url())
        .args(["analyze", "--user", "u1", "Busy but good day."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rest well tonight."));

    base_serene_command(dir.path())
        .args(["status", "--user", "u1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily analysis: used at "));
}
