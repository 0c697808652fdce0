//! Kino Touch CLI - Headless Gesture Replay Tool
//!
//! Features:
//! - Trace replay through the gesture engine
//! - Player command preview for every notification
//! - Resolved settings inspection
//! - Zone map rendering for a surface size

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod adapter;
mod commands;
mod output;
mod trace;

/// Kino Touch CLI - Gesture engine toolkit
#[derive(Parser)]
#[command(name = "kino-touch")]
#[command(author = "Purple Squirrel Media")]
#[command(version)]
#[command(about = "Replay and inspect touch gestures for the Kino player", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json, table)
    #[arg(short, long, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded gesture trace
    Replay {
        /// Path to trace JSON
        trace: PathBuf,

        /// Settings JSON overriding the trace's settings
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },

    /// Show the resolved gesture configuration
    Config {
        /// Settings JSON (defaults if omitted)
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },

    /// Render the zone map for a surface size
    Zones {
        /// Surface width in pixels
        #[arg(long, default_value = "1920")]
        width: f32,

        /// Surface height in pixels
        #[arg(long, default_value = "1080")]
        height: f32,

        /// Settings JSON (defaults if omitted)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Grid spacing in pixels
        #[arg(long, default_value = "60")]
        step: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr)
        .init();

    kino_touch::init();

    match cli.command {
        Commands::Replay { trace, settings } => {
            commands::replay(&trace, settings, &cli.format)?;
        }
        Commands::Config { settings } => {
            commands::config(settings, &cli.format)?;
        }
        Commands::Zones {
            width,
            height,
            settings,
            step,
        } => {
            commands::zones(width, height, settings, step, &cli.format)?;
        }
    }

    Ok(())
}
