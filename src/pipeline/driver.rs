//! Multi-file run: per-match reels followed by one combined reel.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use super::processor::{HighlightOptions, build_highlight_video};
use crate::error::{Error, Result};
use crate::output::{combined_output_path, progress};
use crate::overlay::TextPainter;
use crate::video::{Assembler, Segment, VideoBackend};

/// Outcome of [`process_score_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Per-match reels, in input order.
    pub outputs: Vec<PathBuf>,
    /// Score files that produced no reel.
    pub failed: Vec<PathBuf>,
    /// The combined reel.
    pub combined: PathBuf,
}

/// Process every score file independently, then merge the successful reels.
///
/// A failing score file is logged and skipped. The combined reel goes next
/// to the first listed score file, whether or not that file succeeded.
///
/// # Errors
///
/// Returns [`Error::NoSuccessfulOutputs`] when no score file produced a reel,
/// or [`Error::AssemblyFailed`] when the final merge fails.
pub fn process_score_files<B: VideoBackend + ?Sized>(
    files: &[PathBuf],
    options: &HighlightOptions,
    backend: &B,
    painter: Option<&TextPainter>,
    progress_enabled: bool,
) -> Result<RunSummary> {
    let Some(first) = files.first() else {
        return Err(Error::NoSuccessfulOutputs);
    };

    let file_progress = progress::create_file_progress(files.len(), progress_enabled);
    let mut outputs = Vec::with_capacity(files.len());
    let mut failed = Vec::new();

    for file in files {
        match build_highlight_video(file, options, backend, painter, progress_enabled) {
            Ok(output) => outputs.push(output),
            Err(e) => {
                error!("Failed to process {}: {}", file.display(), error_chain(&e));
                failed.push(file.clone());
            }
        }
        progress::inc_progress(file_progress.as_ref());
    }

    if outputs.is_empty() {
        progress::finish_progress(file_progress, "Failed");
        error!("No valid highlight videos created");
        return Err(Error::NoSuccessfulOutputs);
    }
    progress::finish_progress(file_progress, "Complete");

    if !failed.is_empty() {
        warn!("{} score file(s) had errors", failed.len());
    }

    let combined = merge_outputs(&outputs, &combined_output_path(first), backend)?;
    info!(
        "Complete: {} reel(s) written, {} failed, combined reel {}",
        outputs.len(),
        failed.len(),
        combined.display()
    );

    Ok(RunSummary {
        outputs,
        failed,
        combined,
    })
}

fn merge_outputs<B: VideoBackend + ?Sized>(
    outputs: &[PathBuf],
    destination: &Path,
    backend: &B,
) -> Result<PathBuf> {
    info!("Merging {} highlight reel(s)", outputs.len());
    let segments: Vec<Segment> = outputs.iter().map(|p| Segment::whole(p)).collect();
    Assembler::new(backend, None, 0)
        .assemble(&segments, destination)
        .inspect_err(|e| error!("{}", error_chain(e)))
}

/// Render an error with its causes, e.g. `failed to assemble 'x': ffmpeg exited ...`.
pub(crate) fn error_chain(error: &Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
