//! Score file parsing.
//!
//! Uses the `csv` crate in headerless, flexible mode: the three header rows
//! have different widths than the event rows, and event rows are validated
//! one by one so a single bad line never discards the whole match.

use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{debug, warn};

use super::{MatchMetadata, ScoreEvent, ScoreSheet, parse_timestamp};
use crate::constants::SCORE_FILE_HEADER_ROWS;
use crate::error::{Error, Result};

/// Parse a score file into match metadata and ordered score events.
///
/// Layout:
/// - row 1: `<source_video_path>`
/// - row 2: `<ignored>,<team_one_name>,<team_two_name>`
/// - row 3: `<ignored>,<starting_score_one>,<starting_score_two>`
/// - row 4+: `<HH:MM:SS>,<team_one_delta>,<team_two_delta>,<extra>`
///
/// Event rows that do not match that shape are skipped with a warning.
///
/// # Errors
///
/// Returns an error if:
/// - The score file does not exist or cannot be read
/// - Fewer than three header rows are present
/// - The referenced video does not exist
/// - Team names or starting scores are missing or not integers
/// - No event row could be parsed
pub fn parse_score_file(path: &Path) -> Result<ScoreSheet> {
    if !path.exists() {
        return Err(Error::ScoreFileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| malformed(path, &format!("cannot open: {e}")))?;

    let mut records = reader.records();

    let mut header = Vec::with_capacity(SCORE_FILE_HEADER_ROWS);
    for _ in 0..SCORE_FILE_HEADER_ROWS {
        match records.next() {
            Some(Ok(record)) => header.push(record),
            Some(Err(e)) => return Err(malformed(path, &format!("unreadable header: {e}"))),
            None => return Err(malformed(path, "file is empty or has invalid format")),
        }
    }

    let raw_video = header[0].get(0).unwrap_or_default();
    if raw_video.is_empty() {
        return Err(malformed(path, "row 1 must contain the source video path"));
    }
    let video_path =
        resolve_source_video(path, raw_video).ok_or_else(|| Error::SourceVideoNotFound {
            score_path: path.to_path_buf(),
            video_path: PathBuf::from(raw_video),
        })?;

    let (team_one, team_two) = match (header[1].get(1), header[1].get(2)) {
        (Some(one), Some(two)) => (one.to_string(), two.to_string()),
        _ => return Err(malformed(path, "row 2 must contain both team names")),
    };

    let (starting_score_one, starting_score_two) =
        match (parse_int(header[2].get(1)), parse_int(header[2].get(2))) {
            (Some(one), Some(two)) => (one, two),
            _ => return Err(malformed(path, "row 3 must contain two integer starting scores")),
        };

    let mut events = Vec::new();
    for result in records {
        match result {
            Ok(record) => match parse_event(&record) {
                Some(event) => events.push(event),
                None => warn!(
                    "Invalid row format in {} (line {}): {:?}",
                    path.display(),
                    line_of(&record),
                    record.iter().collect::<Vec<_>>()
                ),
            },
            Err(e) => warn!("Unreadable row in {}: {e}", path.display()),
        }
    }

    if events.is_empty() {
        return Err(Error::NoScoreEvents {
            path: path.to_path_buf(),
        });
    }

    debug!(
        "Parsed {} score events from {}",
        events.len(),
        path.display()
    );

    Ok(ScoreSheet {
        metadata: MatchMetadata {
            video_path,
            team_one,
            team_two,
            starting_score_one,
            starting_score_two,
        },
        events,
    })
}

/// Resolve the video path written in a score file.
///
/// Absolute paths and paths that exist relative to the working directory
/// are used as given; otherwise the path is tried relative to the score
/// file's directory. Returns `None` if neither exists.
pub fn resolve_source_video(score_path: &Path, raw: &str) -> Option<PathBuf> {
    let as_given = PathBuf::from(raw);
    if as_given.exists() {
        return Some(as_given);
    }
    if as_given.is_absolute() {
        return None;
    }

    let beside_score = score_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(&as_given);
    beside_score.exists().then_some(beside_score)
}

/// Parse one event row; `None` if it does not match `HH:MM:SS,int,int,int`.
fn parse_event(record: &StringRecord) -> Option<ScoreEvent> {
    Some(ScoreEvent {
        time_secs: parse_timestamp(record.get(0)?)?,
        team_one_delta: parse_int(record.get(1))?,
        team_two_delta: parse_int(record.get(2))?,
        extra: parse_int(record.get(3))?,
    })
}

fn parse_int(field: Option<&str>) -> Option<i64> {
    field?.parse().ok()
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}

fn malformed(path: &Path, message: &str) -> Error {
    Error::MalformedScoreFile {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
