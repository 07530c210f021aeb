//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "scorereel";

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "SCOREREEL_CONFIG";

/// Default highlight length in seconds (time kept before each scoring event).
pub const DEFAULT_HIGHLIGHT_DURATION: u32 = 10;

/// Longest highlight window accepted from the CLI or config, in seconds.
pub const MAX_HIGHLIGHT_DURATION: u32 = 600;

/// Number of header rows at the top of a score file.
///
/// Row 1 holds the source video path, row 2 the team names and
/// row 3 the starting scores.
pub const SCORE_FILE_HEADER_ROWS: usize = 3;

/// Strict timestamp format of event rows.
pub const EVENT_TIME_FORMAT: &str = "%H:%M:%S";

/// Output file naming.
pub mod output_names {
    /// Suffix appended to the source video stem for per-match reels.
    pub const HIGHLIGHTS_SUFFIX: &str = "_highlights.mp4";
    /// File name of the reel merging every per-match output.
    pub const COMBINED: &str = "combined_highlights.mp4";
    /// Prefix of scratch directories created next to the output file.
    pub const SCRATCH_PREFIX: &str = ".scorereel-";
}

/// Encoder settings used for every written file.
pub mod encoding {
    /// Video codec passed to ffmpeg.
    pub const VIDEO_CODEC: &str = "libx264";
    /// Audio codec passed to ffmpeg.
    pub const AUDIO_CODEC: &str = "aac";
    /// Pixel format of encoded output (widest player compatibility).
    pub const OUTPUT_PIX_FMT: &str = "yuv420p";
    /// Raw pixel format exchanged with ffmpeg when transforming frames.
    pub const RAW_PIX_FMT: &str = "rgb24";
    /// Bytes per pixel of [`RAW_PIX_FMT`].
    pub const RAW_BYTES_PER_PIXEL: usize = 3;
}

/// Scoreboard overlay layout.
pub mod overlay {
    /// Baseline y offset of the team one caption.
    pub const TEAM_ONE_Y: i64 = 50;
    /// Baseline y offset of the team two caption.
    pub const TEAM_TWO_Y: i64 = 100;
    /// Horizontal shift from the centred position.
    pub const X_OFFSET: i64 = 0;
    /// Default padding around caption text in pixels.
    pub const DEFAULT_PADDING: u32 = 10;
    /// Default font size in pixels.
    pub const DEFAULT_FONT_SIZE: f32 = 28.0;
    /// Smallest accepted font size.
    pub const MIN_FONT_SIZE: f32 = 6.0;
    /// Largest accepted font size.
    pub const MAX_FONT_SIZE: f32 = 200.0;

    /// Fonts tried in order when none is configured.
    pub const FONT_CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
        "/Library/Fonts/Arial Bold.ttf",
        "C:\\Windows\\Fonts\\arialbd.ttf",
    ];
}

/// Team colour palette, matched as substrings of team names in this order.
pub mod palette {
    /// RGB colour triple.
    pub type Rgb = [u8; 3];

    /// Pure white.
    pub const WHITE: Rgb = [255, 255, 255];
    /// Pure black.
    pub const BLACK: Rgb = [0, 0, 0];
    /// Pure red.
    pub const RED: Rgb = [255, 0, 0];
    /// Pure yellow.
    pub const YELLOW: Rgb = [255, 255, 0];
    /// Pure blue.
    pub const BLUE: Rgb = [0, 0, 255];
    /// Pure green.
    pub const GREEN: Rgb = [0, 255, 0];

    /// `(keyword, background, foreground)` entries.
    pub const ENTRIES: &[(&str, Rgb, Rgb)] = &[
        ("red", RED, WHITE),
        ("yellow", YELLOW, BLACK),
        ("black", BLACK, WHITE),
        ("blue", BLUE, WHITE),
        ("green", GREEN, WHITE),
    ];

    /// Team one fallback: yellow box, black text.
    pub const TEAM_ONE_DEFAULT: (Rgb, Rgb) = (YELLOW, BLACK);
    /// Team two fallback: blue box, white text.
    pub const TEAM_TWO_DEFAULT: (Rgb, Rgb) = (BLUE, WHITE);
}
