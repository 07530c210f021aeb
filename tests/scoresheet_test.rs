//! Tests for score file parsing.

use std::fs;
use std::path::PathBuf;

use scorereel::Error;
use scorereel::scoresheet::{ScoreEvent, parse_score_file};
use tempfile::TempDir;

fn write_score_file(dir: &TempDir, contents: &str) -> PathBuf {
    fs::write(dir.path().join("final.mp4"), b"video").unwrap();
    let path = dir.path().join("final.csv");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_parse_with_utf8_bom() {
    let dir = TempDir::new().unwrap();
    let path = write_score_file(
        &dir,
        "\u{FEFF}final.mp4\nTeams,Yellow Jackets,Blue Sharks\nStart,2,1\n00:10:00,1,0,0\n",
    );

    let sheet = parse_score_file(&path).unwrap();
    assert_eq!(sheet.metadata.video_path, dir.path().join("final.mp4"));
    assert_eq!(sheet.metadata.team_one, "Yellow Jackets");
    assert_eq!(sheet.metadata.team_two, "Blue Sharks");
    assert_eq!(sheet.metadata.starting_score().to_string(), "2-1");
    assert_eq!(sheet.events[0].time_secs, 600);
}

#[test]
fn test_only_well_formed_rows_survive_in_order() {
    let dir = TempDir::new().unwrap();
    let path = write_score_file(
        &dir,
        "final.mp4
Teams,A,B
Start,0,0
00:00:20,1,0,0
00:00:25,1,0
20 seconds,1,0,0
01:02:03,0,3,7

00:61:00,1,0,0
00:00:15,-1,0,0
",
    );

    let sheet = parse_score_file(&path).unwrap();
    assert_eq!(
        sheet.events,
        vec![
            ScoreEvent {
                time_secs: 20,
                team_one_delta: 1,
                team_two_delta: 0,
                extra: 0
            },
            ScoreEvent {
                time_secs: 3723,
                team_one_delta: 0,
                team_two_delta: 3,
                extra: 7
            },
            ScoreEvent {
                time_secs: 15,
                team_one_delta: -1,
                team_two_delta: 0,
                extra: 0
            },
        ]
    );
}

#[test]
fn test_absolute_video_path() {
    let dir = TempDir::new().unwrap();
    let videos = TempDir::new().unwrap();
    let video = videos.path().join("elsewhere.mp4");
    fs::write(&video, b"video").unwrap();
    let path = dir.path().join("match.csv");
    fs::write(
        &path,
        format!("{}\nx,A,B\nx,0,0\n00:00:09,1,0,0\n", video.display()),
    )
    .unwrap();

    let sheet = parse_score_file(&path).unwrap();
    assert_eq!(sheet.metadata.video_path, video);
}

#[test]
fn test_missing_video_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("match.csv");
    fs::write(&path, "gone.mp4\nx,A,B\nx,0,0\n00:00:09,1,0,0\n").unwrap();

    let result = parse_score_file(&path);
    assert!(matches!(result, Err(Error::SourceVideoNotFound { .. })));
}

#[test]
fn test_two_header_rows_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = write_score_file(&dir, "final.mp4\nTeams,A,B\n");

    let result = parse_score_file(&path);
    assert!(matches!(result, Err(Error::MalformedScoreFile { .. })));
}

#[test]
fn test_no_valid_events_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_score_file(&dir, "final.mp4\nTeams,A,B\nStart,0,0\nbad,row\n");

    let result = parse_score_file(&path);
    assert!(matches!(result, Err(Error::NoScoreEvents { .. })));
}
