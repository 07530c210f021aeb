//! Single score file pipeline.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use crate::error::Result;
use crate::highlights::{ExtractOptions, extract_highlights};
use crate::output::highlight_output_path;
use crate::overlay::TextPainter;
use crate::scoresheet::parse_score_file;
use crate::video::{Assembler, VideoBackend};

/// Settings shared by every score file of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightOptions {
    /// Seconds kept before each event.
    pub duration: u32,
    /// Burn scoreboards into clips.
    pub overlays: bool,
    /// Padding around caption text in pixels.
    pub padding: u32,
}

impl HighlightOptions {
    fn extract(&self) -> ExtractOptions {
        ExtractOptions {
            duration: self.duration,
            overlays: self.overlays,
        }
    }
}

/// Build the highlight reel for one score file.
///
/// Parses the score file, probes its source video, plans one clip per event
/// and writes `<video stem>_highlights.mp4` next to the score file.
///
/// # Errors
///
/// Returns the first fatal error of the parse, probe, plan or assembly step.
pub fn create_highlight_video<B: VideoBackend + ?Sized>(
    score_file: &Path,
    options: &HighlightOptions,
    backend: &B,
    painter: Option<&TextPainter>,
) -> Result<PathBuf> {
    build_highlight_video(score_file, options, backend, painter, false)
}

pub(super) fn build_highlight_video<B: VideoBackend + ?Sized>(
    score_file: &Path,
    options: &HighlightOptions,
    backend: &B,
    painter: Option<&TextPainter>,
    progress_enabled: bool,
) -> Result<PathBuf> {
    let start_time = Instant::now();
    info!("Processing: {}", score_file.display());

    let sheet = parse_score_file(score_file)?;
    let metadata = &sheet.metadata;
    info!(
        "{} vs {}: {} event(s), source {}",
        metadata.team_one,
        metadata.team_two,
        sheet.events.len(),
        metadata.video_path.display()
    );

    let video = backend.probe(&metadata.video_path)?;
    let plan = extract_highlights(&sheet, &video, &options.extract())?;
    info!(
        "Planned {} clip(s), {} skipped, final score {}",
        plan.clips.len(),
        plan.skipped,
        plan.final_score
    );

    let output = highlight_output_path(score_file, &metadata.video_path);
    let written = Assembler::new(backend, painter, options.padding)
        .with_progress(progress_enabled)
        .assemble(&plan.segments(), &output)?;

    info!(
        "Wrote {} in {:.2}s",
        written.display(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(written)
}
