//! Score file parsing.
//!
//! A score file is a small CSV describing one match: the source video,
//! the two team names, their starting scores and then one row per
//! scoring event keyed by elapsed match time.

mod parser;
mod timestamp;
mod types;

pub use parser::{parse_score_file, resolve_source_video};
pub use timestamp::parse_timestamp;
pub use types::{MatchMetadata, RunningScore, ScoreEvent, ScoreSheet};
