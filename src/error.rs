//! Error types for scorereel.

use std::path::PathBuf;

/// Result type alias for scorereel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for scorereel.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    // Score file errors
    /// Score file does not exist.
    #[error("score file does not exist: {path}")]
    ScoreFileNotFound {
        /// Path to the missing score file.
        path: PathBuf,
    },

    /// Source video referenced by a score file does not exist.
    #[error("video file '{video_path}' referenced by '{score_path}' does not exist")]
    SourceVideoNotFound {
        /// Path to the score file.
        score_path: PathBuf,
        /// Video path as written in the score file.
        video_path: PathBuf,
    },

    /// Score file header is missing or unreadable.
    #[error("malformed score file '{path}': {message}")]
    MalformedScoreFile {
        /// Path to the score file.
        path: PathBuf,
        /// Description of the format problem.
        message: String,
    },

    /// Score file contained no usable event rows.
    #[error("no valid score events found in '{path}'")]
    NoScoreEvents {
        /// Path to the score file.
        path: PathBuf,
    },

    // Highlight errors
    /// A single highlight clip could not be cut.
    #[error("cannot cut clip for event at {event_time}s: {reason}")]
    ClipExtraction {
        /// Event time in seconds.
        event_time: u32,
        /// Description of the failure.
        reason: String,
    },

    /// Every event of a score file failed to produce a clip.
    #[error("no highlight clips were created for '{path}'")]
    NoHighlightClips {
        /// Source video the clips were cut from.
        path: PathBuf,
    },

    /// Concatenating or encoding an output failed.
    #[error("failed to assemble '{path}'")]
    AssemblyFailed {
        /// Output path that could not be written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<Self>,
    },

    /// No score file produced a highlight video.
    #[error("no valid highlight videos created")]
    NoSuccessfulOutputs,

    // Video tooling errors
    /// Required executable was not found.
    #[error("'{program}' was not found on PATH; install ffmpeg or set its path in the config")]
    ToolNotFound {
        /// Executable name.
        program: String,
    },

    /// Failed to start an external process.
    #[error("failed to spawn '{program}'")]
    ToolSpawn {
        /// Executable path.
        program: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// External process exited unsuccessfully.
    #[error("{program} failed ({status}): {stderr}")]
    ToolFailed {
        /// Executable name.
        program: String,
        /// Exit status description.
        status: String,
        /// Captured diagnostic output.
        stderr: String,
    },

    /// Failed to open or probe a video.
    #[error("failed to load video '{path}': {reason}")]
    VideoProbe {
        /// Path to the video file.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Streaming raw frames between ffmpeg processes failed.
    #[error("frame pipe error: {message}")]
    FramePipe {
        /// Description of the failure.
        message: String,
    },

    // Overlay errors
    /// No usable font could be located.
    #[error("no overlay font found; pass --font or set overlay.font in the config")]
    FontNotFound,

    /// Failed to read or parse a font file.
    #[error("failed to load font '{path}': {reason}")]
    FontLoad {
        /// Path to the font file.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// A frame buffer had the wrong size.
    #[error("frame buffer of {actual} bytes does not match {width}x{height}")]
    FrameSize {
        /// Frame width.
        width: u32,
        /// Frame height.
        height: u32,
        /// Actual buffer length.
        actual: usize,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}
