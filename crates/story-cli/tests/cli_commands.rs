//! Integration tests for the story CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STORY: &str = r#"{
    "title": "From Relays to Tubes",
    "acts": [
        {
            "number": 1,
            "title": "Switches",
            "era": "1930s",
            "stage": "relay",
            "persona": { "id": "zuse", "name": "Konrad Zuse", "years": "1910-1995" },
            "mindset": { "personaId": "zuse", "year": 1936, "knownTechnology": ["relay"] },
            "chapters": [{
                "number": 1,
                "title": "The Living Room",
                "year": "1936",
                "scenes": [
                    { "id": "intro", "type": "narrative", "text": ["Berlin, 1936."], "nextScene": "talk" },
                    { "id": "talk", "type": "dialogue", "lines": [
                        { "speaker": "Zuse", "text": "Binary is simpler." }
                    ], "nextScene": "decide" },
                    { "id": "decide", "type": "choice", "prompt": "What next?", "choices": [
                        { "id": "relay", "text": "Keep the relays", "nextScene": "click" },
                        { "id": "tube", "text": "Try vacuum tubes", "nextScene": "glow" }
                    ] },
                    { "id": "click", "type": "narrative", "text": ["The Z3 clicks to life."] }
                ]
            }]
        },
        {
            "number": 2,
            "title": "Tubes",
            "era": "1940s",
            "stage": "vacuum",
            "persona": { "id": "eckert", "name": "J. Presper Eckert" },
            "mindset": { "personaId": "eckert", "year": 1945 },
            "chapters": [{
                "number": 1,
                "title": "Moore School",
                "year": "1945",
                "scenes": [
                    { "id": "glow", "type": "narrative", "text": ["Eighteen thousand tubes glow."] }
                ]
            }]
        }
    ]
}"#;

/// Create a temp directory with a story file. Returns the dir and the file path.
fn test_story() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("story.json");
    fs::write(&path, STORY).unwrap();
    (dir, path)
}

fn story_cmd() -> Command {
    let mut cmd = Command::cargo_bin("story").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_valid_story() {
    let (_dir, path) = test_story();
    story_cmd()
        .args(["check", "--story"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"))
        .stdout(predicate::str::contains("2 acts, 2 chapters, 5 scenes"))
        .stdout(predicate::str::contains("Konrad Zuse"));
}

#[test]
fn check_reports_dangling_link() {
    let (dir, _) = test_story();
    let broken = dir.path().join("broken.json");
    fs::write(&broken, STORY.replace(r#""nextScene": "glow""#, r#""nextScene": "nowhere""#))
        .unwrap();

    story_cmd()
        .args(["check", "--story"])
        .arg(&broken)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere"))
        .stderr(predicate::str::contains("1 error"));
}

#[test]
fn check_malformed_json() {
    let (dir, _) = test_story();
    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{ not json").unwrap();

    story_cmd()
        .args(["check", "--story"])
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed content"));
}

#[test]
fn check_missing_file() {
    story_cmd()
        .args(["check", "--story", "/nonexistent/story.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_walks_through_story() {
    let (dir, path) = test_story();
    story_cmd()
        .args(["play", "--story"])
        .arg(&path)
        .arg("--save-dir")
        .arg(dir.path().join("saves"))
        .write_stdin("next\nnext\nchoose 2\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting a new game."))
        .stdout(predicate::str::contains("You are now Konrad Zuse."))
        .stdout(predicate::str::contains("Zuse: Binary is simpler."))
        .stdout(predicate::str::contains("You are now J. Presper Eckert."))
        .stdout(predicate::str::contains("Eighteen thousand tubes glow."))
        .stdout(predicate::str::contains("Act 2, Chapter 1, scene 'glow'"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn play_resumes_saved_progress() {
    let (dir, path) = test_story();
    let saves = dir.path().join("saves");

    story_cmd()
        .args(["play", "--story"])
        .arg(&path)
        .arg("--save-dir")
        .arg(&saves)
        .write_stdin("next\nquit\n")
        .assert()
        .success();

    story_cmd()
        .args(["play", "--story"])
        .arg(&path)
        .arg("--save-dir")
        .arg(&saves)
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resuming where you left off."))
        .stdout(predicate::str::contains("Binary is simpler."));
}

#[test]
fn play_new_ignores_save() {
    let (dir, path) = test_story();
    let saves = dir.path().join("saves");

    story_cmd()
        .args(["play", "--story"])
        .arg(&path)
        .arg("--save-dir")
        .arg(&saves)
        .write_stdin("next\nquit\n")
        .assert()
        .success();

    story_cmd()
        .args(["play", "--new", "--story"])
        .arg(&path)
        .arg("--save-dir")
        .arg(&saves)
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting a new game."))
        .stdout(predicate::str::contains("Berlin, 1936."));
}

#[test]
fn play_reports_engine_errors_and_continues() {
    let (dir, path) = test_story();
    story_cmd()
        .args(["play", "--story"])
        .arg(&path)
        .arg("--save-dir")
        .arg(dir.path().join("saves"))
        .write_stdin("back\ngo nowhere\nlook\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("no previous scene in history"))
        .stdout(predicate::str::contains("scene not found: nowhere"))
        .stdout(predicate::str::contains("[intro]"));
}

#[test]
fn play_rejects_invalid_story() {
    let (dir, _) = test_story();
    let broken = dir.path().join("broken.json");
    fs::write(&broken, STORY.replace(r#""nextScene": "talk""#, r#""nextScene": "gone""#))
        .unwrap();

    story_cmd()
        .args(["play", "--story"])
        .arg(&broken)
        .arg("--save-dir")
        .arg(dir.path().join("saves"))
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a valid story"));
}

// ---------------------------------------------------------------------------
// status / reset
// ---------------------------------------------------------------------------

#[test]
fn status_without_save() {
    let (dir, path) = test_story();
    story_cmd()
        .args(["status", "--story"])
        .arg(&path)
        .arg("--save-dir")
        .arg(dir.path().join("saves"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved progress"));
}

#[test]
fn status_after_play() {
    let (dir, path) = test_story();
    let saves = dir.path().join("saves");

    story_cmd()
        .args(["play", "--story"])
        .arg(&path)
        .arg("--save-dir")
        .arg(&saves)
        .write_stdin("next\ndiscover z1\nquit\n")
        .assert()
        .success();

    story_cmd()
        .args(["status", "--story"])
        .arg(&path)
        .arg("--save-dir")
        .arg(&saves)
        .assert()
        .success()
        .stdout(predicate::str::contains("talk"))
        .stdout(predicate::str::contains("Konrad Zuse"))
        .stdout(predicate::str::contains("z1"));
}

#[test]
fn slots_are_independent() {
    let (dir, path) = test_story();
    let saves = dir.path().join("saves");

    story_cmd()
        .args(["play", "--slot", "alice", "--story"])
        .arg(&path)
        .arg("--save-dir")
        .arg(&saves)
        .write_stdin("next\nquit\n")
        .assert()
        .success();

    story_cmd()
        .args(["status", "--slot", "bob", "--story"])
        .arg(&path)
        .arg("--save-dir")
        .arg(&saves)
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved progress in slot 'bob'"));
}

#[test]
fn slot_with_dot_is_rejected() {
    let (dir, path) = test_story();
    let saves = dir.path().join("saves");

    story_cmd()
        .args(["play", "--slot", "a.b", "--story"])
        .arg(&path)
        .arg("--save-dir")
        .arg(&saves)
        .write_stdin("next\nquit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("slot names may only contain"));

    story_cmd()
        .args(["reset", "--slot", "../a_b", "--save-dir"])
        .arg(&saves)
        .assert()
        .failure();
    assert!(!saves.join("a_b.json").exists());
}

#[test]
fn reset_clears_save() {
    let (dir, path) = test_story();
    let saves = dir.path().join("saves");

    story_cmd()
        .args(["play", "--story"])
        .arg(&path)
        .arg("--save-dir")
        .arg(&saves)
        .write_stdin("next\nquit\n")
        .assert()
        .success();

    story_cmd()
        .arg("reset")
        .arg("--save-dir")
        .arg(&saves)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared saved progress"));

    story_cmd()
        .arg("reset")
        .arg("--save-dir")
        .arg(&saves)
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved progress"));
}

#[test]
fn verbose_logs_to_stderr() {
    let (dir, path) = test_story();
    story_cmd()
        .args(["--verbose", "play", "--story"])
        .arg(&path)
        .arg("--save-dir")
        .arg(dir.path().join("saves"))
        .write_stdin("quit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("started new game"));
}
