//! Help message display for CLI.

#![allow(clippy::print_stdout)]

use crate::config::config_file_path;

/// Print a short usage guide when no score files are given.
pub fn print_usage_help() {
    println!("Usage: scorereel [OPTIONS] <SCORE_FILES>...");
    println!();
    println!("Each score file is a CSV laid out as:");
    println!("{}", score_file_layout());
    println!();
    println!("Example: scorereel week1/game.csv week2/game.csv -d 12");
    println!();
    if let Ok(path) = config_file_path()
        && !path.exists()
    {
        println!("Run 'scorereel config init' to create {}", path.display());
    }
    println!("Run 'scorereel -h' for all options.");
}

/// Score file layout shown in help output.
pub fn score_file_layout() -> &'static str {
    "  <source video path>\n  \
     <ignored>,<team one>,<team two>\n  \
     <ignored>,<team one start>,<team two start>\n  \
     <HH:MM:SS>,<team one delta>,<team two delta>,<extra>   (one row per scoring event)"
}
