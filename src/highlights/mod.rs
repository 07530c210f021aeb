//! Highlight planning: one clip per scoring event.

mod extractor;

pub use extractor::{
    ExtractOptions, HighlightClip, HighlightPlan, clip_window, extract_highlights,
    plan_highlights,
};
