//! Output naming and progress reporting.

mod paths;
pub mod progress;

pub use paths::{combined_output_path, highlight_output_path, output_dir_for};
