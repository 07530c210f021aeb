//! Team colour selection.

use crate::constants::palette::{ENTRIES, Rgb, TEAM_ONE_DEFAULT, TEAM_TWO_DEFAULT};

/// Background and text colour of a team caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamColors {
    /// Caption box colour.
    pub background: Rgb,
    /// Caption text colour.
    pub foreground: Rgb,
}

impl TeamColors {
    /// Fallback for team one: yellow box, black text.
    pub const TEAM_ONE_DEFAULT: Self = Self {
        background: TEAM_ONE_DEFAULT.0,
        foreground: TEAM_ONE_DEFAULT.1,
    };

    /// Fallback for team two: blue box, white text.
    pub const TEAM_TWO_DEFAULT: Self = Self {
        background: TEAM_TWO_DEFAULT.0,
        foreground: TEAM_TWO_DEFAULT.1,
    };
}

/// Pick colours for a team by looking for a colour word in its name.
///
/// Matching is a case-insensitive substring test against the palette in
/// its fixed order (red, yellow, black, blue, green); the first hit wins.
/// Names without a colour word get `default`.
pub fn team_colors(team_name: &str, default: TeamColors) -> TeamColors {
    let lowered = team_name.to_lowercase();
    ENTRIES
        .iter()
        .find(|&&(keyword, _, _)| lowered.contains(keyword))
        .map_or(default, |&(_, background, foreground)| TeamColors {
            background,
            foreground,
        })
}
