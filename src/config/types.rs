//! Configuration type definitions.

use crate::constants::DEFAULT_HIGHLIGHT_DURATION;
use crate::constants::overlay::{DEFAULT_FONT_SIZE, DEFAULT_PADDING};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default highlight settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// External video tools.
    #[serde(default)]
    pub video: VideoConfig,

    /// Scoreboard caption settings.
    #[serde(default)]
    pub overlay: OverlayConfig,
}

/// Default highlight settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Seconds of footage kept before each scoring event.
    pub duration: u32,

    /// Burn scoreboard captions into clips.
    pub overlays: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_HIGHLIGHT_DURATION,
            overlays: true,
        }
    }
}

/// Locations of the ffmpeg tools.
///
/// Bare names are looked up on `PATH`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// ffmpeg executable.
    pub ffmpeg: PathBuf,

    /// ffprobe executable.
    pub ffprobe: PathBuf,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        }
    }
}

/// Caption rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// TrueType/OpenType font file; system fonts are searched if unset.
    pub font: Option<PathBuf>,

    /// Font size in pixels.
    pub font_size: f32,

    /// Padding around caption text in pixels.
    pub padding: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            font: None,
            font_size: DEFAULT_FONT_SIZE,
            padding: DEFAULT_PADDING,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.defaults.duration, 10);
        assert!(config.defaults.overlays);
        assert_eq!(config.video.ffmpeg, PathBuf::from("ffmpeg"));
        assert_eq!(config.overlay.padding, 10);
        assert!(config.overlay.font.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[defaults]
duration = 15

[overlay]
font_size = 40.0
"#,
        )
        .unwrap();
        assert_eq!(config.defaults.duration, 15);
        assert!(config.defaults.overlays);
        assert_eq!(config.overlay.font_size, 40.0);
        assert_eq!(config.video.ffprobe, PathBuf::from("ffprobe"));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = Config::default();
        config.overlay.font = Some(PathBuf::from("/fonts/Bold.ttf"));
        config.defaults.overlays = false;
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.overlay.font, config.overlay.font);
        assert!(!parsed.defaults.overlays);
    }
}
