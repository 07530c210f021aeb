//! Two-team scoreboard captions.

use crate::constants::overlay::{TEAM_ONE_Y, TEAM_TWO_Y, X_OFFSET};
use crate::scoresheet::{MatchMetadata, RunningScore};
use crate::video::FrameTransform;

use super::{Frame, TeamColors, TextBitmap, TextPainter, draw_text_with_background, team_colors};

/// One team's caption: name, score and colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamCaption {
    /// Team name as written in the score file.
    pub name: String,
    /// Score to display.
    pub score: i64,
    /// Caption colours.
    pub colors: TeamColors,
}

impl TeamCaption {
    /// Caption text, e.g. `Red Dragons: 3`.
    pub fn text(&self) -> String {
        format!("{}: {}", self.name, self.score)
    }
}

/// Scores shown on a clip, frozen when the clip was queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    /// Caption drawn at the upper position.
    pub team_one: TeamCaption,
    /// Caption drawn below team one.
    pub team_two: TeamCaption,
}

impl Scoreboard {
    /// Snapshot the running score with team names and colours from the match.
    pub fn snapshot(metadata: &MatchMetadata, score: RunningScore) -> Self {
        Self {
            team_one: TeamCaption {
                name: metadata.team_one.clone(),
                score: score.team_one,
                colors: team_colors(&metadata.team_one, TeamColors::TEAM_ONE_DEFAULT),
            },
            team_two: TeamCaption {
                name: metadata.team_two.clone(),
                score: score.team_two,
                colors: team_colors(&metadata.team_two, TeamColors::TEAM_TWO_DEFAULT),
            },
        }
    }

    /// Scores as a running-score pair.
    pub fn score(&self) -> RunningScore {
        RunningScore {
            team_one: self.team_one.score,
            team_two: self.team_two.score,
        }
    }
}

/// Rasterised caption ready for compositing.
#[derive(Debug, Clone)]
pub struct Label {
    /// Rendered text.
    pub text: TextBitmap,
    /// Box and text colours.
    pub colors: TeamColors,
}

/// Frame transform drawing both team captions.
///
/// Captions are rasterised once at construction; every frame of the clip
/// gets exactly the same boxes.
#[derive(Debug, Clone)]
pub struct ScoreboardOverlay {
    team_one: Label,
    team_two: Label,
    padding: u32,
}

impl ScoreboardOverlay {
    /// Rasterise a scoreboard with the given painter.
    pub fn new(scoreboard: &Scoreboard, painter: &TextPainter, padding: u32) -> Self {
        let label = |caption: &TeamCaption| Label {
            text: painter.render(&caption.text()),
            colors: caption.colors,
        };
        Self::from_labels(
            label(&scoreboard.team_one),
            label(&scoreboard.team_two),
            padding,
        )
    }

    /// Build an overlay from already rasterised labels.
    pub fn from_labels(team_one: Label, team_two: Label, padding: u32) -> Self {
        Self {
            team_one,
            team_two,
            padding,
        }
    }
}

impl FrameTransform for ScoreboardOverlay {
    fn apply(&self, frame: &Frame) -> Frame {
        let with_one = draw_text_with_background(
            frame,
            &self.team_one.text,
            self.team_one.colors,
            X_OFFSET,
            TEAM_ONE_Y,
            self.padding,
        );
        draw_text_with_background(
            &with_one,
            &self.team_two.text,
            self.team_two.colors,
            X_OFFSET,
            TEAM_TWO_Y,
            self.padding,
        )
    }
}
