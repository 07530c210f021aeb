//! Highlight reel assembly.
//!
//! Renders each segment into a scratch directory and concatenates the
//! results, in order, into a single output file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use tracing::{debug, info};

use super::{ClipWindow, FrameTransform, VideoBackend, VideoInfo};
use crate::cleanup::{PartialOutput, ScratchDir};
use crate::error::{Error, Result};
use crate::output::progress;
use crate::overlay::{Scoreboard, ScoreboardOverlay, TextPainter};

/// One piece of an output reel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Video to take frames from.
    pub source: PathBuf,
    /// Time range to keep; `None` keeps the whole file.
    pub window: Option<ClipWindow>,
    /// Scoreboard burned into every frame.
    pub scoreboard: Option<Scoreboard>,
}

impl Segment {
    /// A whole video, used as-is.
    pub fn whole(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            window: None,
            scoreboard: None,
        }
    }

    /// A trimmed clip with an optional scoreboard.
    pub fn clip(source: &Path, window: ClipWindow, scoreboard: Option<Scoreboard>) -> Self {
        Self {
            source: source.to_path_buf(),
            window: Some(window),
            scoreboard,
        }
    }

    fn needs_render(&self) -> bool {
        self.window.is_some() || self.scoreboard.is_some()
    }
}

/// Concatenates segments into an output video through a [`VideoBackend`].
pub struct Assembler<'a, B: VideoBackend + ?Sized> {
    backend: &'a B,
    painter: Option<&'a TextPainter>,
    padding: u32,
    progress_enabled: bool,
}

impl<'a, B: VideoBackend + ?Sized> Assembler<'a, B> {
    /// Create an assembler; `painter` is required for segments with scoreboards.
    pub fn new(backend: &'a B, painter: Option<&'a TextPainter>, padding: u32) -> Self {
        Self {
            backend,
            painter,
            padding,
            progress_enabled: false,
        }
    }

    /// Show a progress bar while rendering segments.
    #[must_use]
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress_enabled = enabled;
        self
    }

    /// Render and join `segments` into `output`.
    ///
    /// # Errors
    ///
    /// Any rendering, concatenation or encoding failure is returned as
    /// [`Error::AssemblyFailed`]; no partial output file is left behind.
    pub fn assemble(&self, segments: &[Segment], output: &Path) -> Result<PathBuf> {
        self.try_assemble(segments, output)
            .map_err(|e| Error::AssemblyFailed {
                path: output.to_path_buf(),
                source: Box::new(e),
            })
    }

    fn try_assemble(&self, segments: &[Segment], output: &Path) -> Result<PathBuf> {
        if segments.is_empty() {
            return Err(Error::Internal {
                message: "nothing to assemble".to_string(),
            });
        }

        let parent = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let scratch = ScratchDir::create_in(parent)?;
        let mut probes: HashMap<PathBuf, VideoInfo> = HashMap::new();
        let mut inputs = Vec::with_capacity(segments.len());

        let rendered = segments.iter().filter(|s| s.needs_render()).count();
        let pb = if self.progress_enabled {
            progress::create_clip_progress(rendered)
        } else {
            ProgressBar::hidden()
        };

        for (index, segment) in segments.iter().enumerate() {
            if !segment.needs_render() {
                inputs.push(segment.source.clone());
                continue;
            }

            let info = match probes.get(&segment.source) {
                Some(info) => info.clone(),
                None => {
                    let info = self.backend.probe(&segment.source)?;
                    probes.insert(segment.source.clone(), info.clone());
                    info
                }
            };

            let overlay = segment
                .scoreboard
                .as_ref()
                .map(|board| self.overlay_for(board))
                .transpose()?;
            let transform = overlay.as_ref().map(|o| o as &dyn FrameTransform);

            let segment_path = scratch.path().join(format!("segment_{index:04}.mp4"));
            debug!(
                "Rendering segment {} of {} from {}",
                index + 1,
                segments.len(),
                segment.source.display()
            );
            pb.set_message(describe(segment));
            self.backend.render_segment(
                &segment.source,
                &info,
                segment.window,
                transform,
                &segment_path,
            )?;
            pb.inc(1);
            inputs.push(segment_path);
        }
        pb.finish_and_clear();

        info!("Writing {}", output.display());
        let partial = PartialOutput::begin(output);
        self.backend.concat(&inputs, output)?;
        Ok(partial.commit())
    }

    fn overlay_for(&self, scoreboard: &Scoreboard) -> Result<ScoreboardOverlay> {
        let painter = self.painter.ok_or(Error::FontNotFound)?;
        Ok(ScoreboardOverlay::new(scoreboard, painter, self.padding))
    }
}

fn describe(segment: &Segment) -> String {
    match segment.window {
        Some(window) => format!("{}s-{}s", window.start_secs, window.end_secs),
        None => segment
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}
