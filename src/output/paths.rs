//! Output path computation.

use std::path::{Path, PathBuf};

use crate::constants::output_names::{COMBINED, HIGHLIGHTS_SUFFIX};

/// Directory a score file's outputs are written to: the score file's own directory.
pub fn output_dir_for(score_file: &Path) -> PathBuf {
    score_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Per-match reel: `<score dir>/<video stem>_highlights.mp4`.
pub fn highlight_output_path(score_file: &Path, video: &Path) -> PathBuf {
    // Use to_string_lossy() to handle non-UTF-8 filenames gracefully
    let stem = video.file_stem().map_or_else(
        || std::borrow::Cow::Borrowed("video"),
        |s| s.to_string_lossy(),
    );
    output_dir_for(score_file).join(format!("{stem}{HIGHLIGHTS_SUFFIX}"))
}

/// Merged reel: `combined_highlights.mp4` beside the first score file.
pub fn combined_output_path(first_score_file: &Path) -> PathBuf {
    output_dir_for(first_score_file).join(COMBINED)
}
