//! CLI argument definitions.

use super::validators::parse_duration;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Cut scoring highlights from match videos and merge them into one reel.
#[derive(Debug, Parser)]
#[command(name = "scorereel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Score files (CSV) to turn into highlight reels, in output order.
    pub inputs: Vec<PathBuf>,

    /// Common options for highlight generation.
    #[command(flatten)]
    pub highlight: HighlightArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show what a score file would produce without touching the video.
    Inspect {
        /// Score file to read.
        file: PathBuf,
        /// Seconds kept before each event (overrides config).
        #[arg(short, long, value_parser = parse_duration)]
        duration: Option<u32>,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for highlight generation.
#[derive(Debug, Args)]
pub struct HighlightArgs {
    /// Seconds kept before each scoring event.
    #[arg(short, long, value_parser = parse_duration, env = "SCOREREEL_DURATION")]
    pub duration: Option<u32>,

    /// Do not burn scoreboards into clips.
    #[arg(long, env = "SCOREREEL_NO_OVERLAYS")]
    pub no_overlays: bool,

    /// Font file used for scoreboard captions.
    #[arg(long, env = "SCOREREEL_FONT")]
    pub font: Option<PathBuf>,

    /// Disable progress bars.
    #[arg(long)]
    pub no_progress: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v for debug, -vv for trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
