//! Scorereel - sports highlight reels from scoring event sheets.
//!
//! This crate cuts a clip before every scoring event listed in a score file,
//! optionally burns a running scoreboard into each clip, writes one reel per
//! match and merges all reels into a combined video.

#![warn(missing_docs)]

pub mod cleanup;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod highlights;
pub mod output;
pub mod overlay;
pub mod pipeline;
pub mod scoresheet;
pub mod video;

use clap::Parser;
use cli::{Cli, Command, HighlightArgs};
use config::{Config, config_file_path, load_default_config, save_default_config, validate_config};
use highlights::{ExtractOptions, plan_highlights};
use overlay::{Scoreboard, TextPainter};
use pipeline::{HighlightOptions, process_score_files};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use video::FfmpegBackend;

pub use error::{Error, Result};

/// Main entry point for the scorereel CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.highlight.verbose, cli.highlight.quiet);

    // Install Ctrl+C handler to remove scratch segments and partial reels
    if let Err(e) = ctrlc::set_handler(|| {
        cleanup::cleanup_all();
        std::process::exit(130); // 128 + SIGINT(2)
    }) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }

    // Load configuration
    let config = load_default_config()?;

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    // Show help if no inputs provided
    if cli.inputs.is_empty() {
        cli::help::print_usage_help();
        return Ok(());
    }

    build_reels(&cli.inputs, &cli.highlight, &config)
}

/// Build per-match reels and the combined reel.
fn build_reels(inputs: &[PathBuf], args: &HighlightArgs, config: &Config) -> Result<()> {
    let config = apply_overrides(args, config);
    validate_config(&config)?;

    let options = HighlightOptions {
        duration: config.defaults.duration,
        overlays: config.defaults.overlays,
        padding: config.overlay.padding,
    };

    // The font is only needed when captions are drawn
    let painter = if options.overlays {
        let painter = TextPainter::discover(config.overlay.font.as_deref(), config.overlay.font_size)?;
        info!("Caption font: {}", painter.path().display());
        Some(painter)
    } else {
        None
    };

    let backend = FfmpegBackend::locate(&config.video)?;

    info!(
        "Building highlights from {} score file(s), {}s per clip{}",
        inputs.len(),
        options.duration,
        if options.overlays { ", with scoreboards" } else { "" }
    );

    let progress_enabled = !args.quiet && !args.no_progress;
    let summary = process_score_files(inputs, &options, &backend, painter.as_ref(), progress_enabled)?;

    for output in &summary.outputs {
        info!("Highlight reel: {}", output.display());
    }
    info!("Combined reel: {}", summary.combined.display());

    Ok(())
}

/// Layer CLI flags over file configuration.
fn apply_overrides(args: &HighlightArgs, config: &Config) -> Config {
    let mut merged = config.clone();
    if let Some(duration) = args.duration {
        merged.defaults.duration = duration;
    }
    if args.no_overlays {
        merged.defaults.overlays = false;
    }
    if let Some(ref font) = args.font {
        merged.overlay.font = Some(font.clone());
    }
    merged
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn handle_command(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
        Command::Inspect { file, duration } => {
            let duration = duration.unwrap_or(config.defaults.duration);
            handle_inspect_command(&file, duration)
        }
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nEdit it to set the default clip duration, caption font or ffmpeg paths.");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Print the parsed match and the clips it would produce.
#[allow(clippy::print_stdout)]
fn handle_inspect_command(file: &Path, duration: u32) -> Result<()> {
    let sheet = scoresheet::parse_score_file(file)?;
    let metadata = &sheet.metadata;

    println!("Score file: {}", file.display());
    println!("Video:      {}", metadata.video_path.display());
    println!(
        "Teams:      {} vs {} (starting {})",
        metadata.team_one,
        metadata.team_two,
        metadata.starting_score()
    );
    println!("Events:     {}", sheet.events.len());
    println!();

    let options = ExtractOptions {
        duration,
        overlays: true,
    };
    let plan = plan_highlights(&sheet, None, &options)?;

    for clip in &plan.clips {
        let caption = clip
            .scoreboard
            .as_ref()
            .map(format_caption)
            .unwrap_or_default();
        println!(
            "  #{:<3} {:>6}s  clip {:>6}s - {:<6}s  {}",
            clip.index + 1,
            clip.event.time_secs,
            clip.window.start_secs,
            clip.window.end_secs,
            caption
        );
    }

    println!();
    println!(
        "{} clip(s), {} skipped, final score {}",
        plan.clips.len(),
        plan.skipped,
        plan.final_score
    );
    println!(
        "Output:     {}",
        output::highlight_output_path(file, &metadata.video_path).display()
    );

    Ok(())
}

fn format_caption(board: &Scoreboard) -> String {
    format!("{} | {}", board.team_one.text(), board.team_two.text())
}
