//! Score sheet data types.

use std::path::PathBuf;

/// One scoring row of a score file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreEvent {
    /// Elapsed time of the event in seconds.
    pub time_secs: u32,
    /// Points added to team one.
    pub team_one_delta: i64,
    /// Points added to team two.
    pub team_two_delta: i64,
    /// Fourth column; parsed for validation but otherwise unused.
    pub extra: i64,
}

/// Match-level information from the score file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchMetadata {
    /// Resolved path to the source video.
    pub video_path: PathBuf,
    /// Name of team one.
    pub team_one: String,
    /// Name of team two.
    pub team_two: String,
    /// Score of team one before the first event.
    pub starting_score_one: i64,
    /// Score of team two before the first event.
    pub starting_score_two: i64,
}

impl MatchMetadata {
    /// Running score seeded with the starting scores.
    pub fn starting_score(&self) -> RunningScore {
        RunningScore {
            team_one: self.starting_score_one,
            team_two: self.starting_score_two,
        }
    }
}

/// A parsed score file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSheet {
    /// Header information.
    pub metadata: MatchMetadata,
    /// Events in file order.
    pub events: Vec<ScoreEvent>,
}

/// Cumulative score of both teams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningScore {
    /// Team one score.
    pub team_one: i64,
    /// Team two score.
    pub team_two: i64,
}

impl RunningScore {
    /// Score after an event's deltas; `None` if either total overflows.
    pub fn after(self, event: &ScoreEvent) -> Option<Self> {
        Some(Self {
            team_one: self.team_one.checked_add(event.team_one_delta)?,
            team_two: self.team_two.checked_add(event.team_two_delta)?,
        })
    }
}

impl std::fmt::Display for RunningScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.team_one, self.team_two)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_running_score_after_event() {
        let score = RunningScore {
            team_one: 3,
            team_two: 1,
        }
        .after(&ScoreEvent {
            time_secs: 12,
            team_one_delta: 2,
            team_two_delta: -1,
            extra: 0,
        })
        .unwrap();
        assert_eq!(score.team_one, 5);
        assert_eq!(score.team_two, 0);
        assert_eq!(score.to_string(), "5-0");
    }

    #[test]
    fn test_running_score_overflow() {
        let score = RunningScore {
            team_one: i64::MAX,
            team_two: 0,
        };
        let event = ScoreEvent {
            time_secs: 20,
            team_one_delta: 1,
            team_two_delta: 0,
            extra: 0,
        };
        assert_eq!(score.after(&event), None);

        let min = RunningScore {
            team_one: 0,
            team_two: i64::MIN,
        };
        let back = ScoreEvent {
            team_one_delta: 0,
            team_two_delta: -1,
            ..event
        };
        assert_eq!(min.after(&back), None);
    }
}
