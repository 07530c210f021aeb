//! CLI argument parsing and command handling.

mod args;
pub mod help;
mod validators;

pub use args::{Cli, Command, ConfigAction, HighlightArgs};
pub use validators::parse_duration;
