//! Video collaborator: probing, cutting, frame transforms and concatenation.
//!
//! Decoding and encoding are delegated to an external backend through the
//! [`VideoBackend`] trait; the shipped implementation drives `ffmpeg`.

mod assembler;
mod ffmpeg;
mod process;

pub use assembler::{Assembler, Segment};
pub use ffmpeg::{FfmpegBackend, parse_frame_rate, parse_probe_output};

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::overlay::Frame;

/// Per-frame image transform applied while a segment is rendered.
pub trait FrameTransform {
    /// Produce the transformed frame; the input is left untouched.
    fn apply(&self, frame: &Frame) -> Frame;
}

/// Stream properties of a source video.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    /// Container duration in seconds.
    pub duration_secs: f64,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frame rate as reported by the prober, e.g. `30000/1001`.
    pub frame_rate: String,
    /// Whether the file carries an audio stream.
    pub has_audio: bool,
}

/// Time range of a clip, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipWindow {
    /// Inclusive start.
    pub start_secs: u32,
    /// Exclusive end.
    pub end_secs: u32,
}

impl ClipWindow {
    /// Window length in seconds.
    pub fn duration_secs(self) -> u32 {
        self.end_secs.saturating_sub(self.start_secs)
    }
}

/// Operations the pipeline needs from a video toolkit.
pub trait VideoBackend {
    /// Open a video and read its stream properties.
    fn probe(&self, path: &Path) -> Result<VideoInfo>;

    /// Write `source` (optionally trimmed to `window`, optionally passed
    /// frame by frame through `transform`) to `output`.
    fn render_segment(
        &self,
        source: &Path,
        info: &VideoInfo,
        window: Option<ClipWindow>,
        transform: Option<&dyn FrameTransform>,
        output: &Path,
    ) -> Result<()>;

    /// Join `inputs` in order into `output` with no transitions.
    fn concat(&self, inputs: &[PathBuf], output: &Path) -> Result<()>;
}
