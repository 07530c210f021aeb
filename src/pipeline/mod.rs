//! Highlight pipeline: score file to per-match reel, then the combined reel.

mod driver;
mod processor;

pub use driver::{RunSummary, process_score_files};
pub use processor::{HighlightOptions, create_highlight_video};
