//! Integration tests for the scorereel binary.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_match(dir: &TempDir) -> std::path::PathBuf {
    fs::write(dir.path().join("cup_final.mp4"), b"video").unwrap();
    let path = dir.path().join("cup_final.csv");
    fs::write(
        &path,
        "cup_final.mp4\nTeams,Red Hawks,Otters\nStart,0,0\n00:00:20,1,0,0\n00:01:00,0,2,0\n",
    )
    .unwrap();
    path
}

#[test]
fn test_config_path_command() {
    let mut cmd = cargo_bin_cmd!("scorereel");
    cmd.env_remove("SCOREREEL_CONFIG").arg("config").arg("path");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("scorereel"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_env_points_at_another_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("league").join("reel.toml");

    let mut cmd = cargo_bin_cmd!("scorereel");
    cmd.env("SCOREREEL_CONFIG", &config).arg("config").arg("path");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(config.display().to_string()));

    let mut cmd = cargo_bin_cmd!("scorereel");
    cmd.env("SCOREREEL_CONFIG", &config).arg("config").arg("init");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    assert!(config.exists());

    fs::write(&config, "[defaults]\nduration = 25\n").unwrap();
    let mut cmd = cargo_bin_cmd!("scorereel");
    cmd.env("SCOREREEL_CONFIG", &config).arg("config").arg("show");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("duration: 25"));
}

#[test]
fn test_no_inputs_prints_usage() {
    let mut cmd = cargo_bin_cmd!("scorereel");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage: scorereel"));
}

#[test]
fn test_inspect_prints_planned_clips() {
    let dir = TempDir::new().unwrap();
    let score = write_match(&dir);

    let mut cmd = cargo_bin_cmd!("scorereel");
    cmd.arg("inspect").arg(&score).arg("--duration").arg("10");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Red Hawks vs Otters"))
        .stdout(predicate::str::contains("Red Hawks: 0 | Otters: 0"))
        .stdout(predicate::str::contains("Red Hawks: 1 | Otters: 0"))
        .stdout(predicate::str::contains("2 clip(s), 0 skipped, final score 1-2"))
        .stdout(predicate::str::contains("cup_final_highlights.mp4"));
}

#[test]
fn test_verbosity_flags_follow_subcommands() {
    let dir = TempDir::new().unwrap();
    let score = write_match(&dir);

    let mut cmd = cargo_bin_cmd!("scorereel");
    cmd.arg("inspect").arg(&score).arg("-vv");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Red Hawks vs Otters"));

    let mut cmd = cargo_bin_cmd!("scorereel");
    cmd.arg("inspect").arg(&score).arg("--quiet");
    cmd.assert().success();
}

#[test]
fn test_inspect_missing_score_file() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("scorereel");
    cmd.arg("inspect").arg(dir.path().join("missing.csv"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("missing.csv"));
}

#[test]
fn test_invalid_duration_rejected() {
    let mut cmd = cargo_bin_cmd!("scorereel");
    cmd.arg("match.csv").arg("--duration").arg("0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("duration"));
}
