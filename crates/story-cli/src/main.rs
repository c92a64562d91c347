//! CLI frontend for Story Mode.

mod commands;
mod render;
mod session;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use story_engine::DEFAULT_STORAGE_KEY;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "story",
    about = "Story Mode: play through the history of computing",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a story file and print a summary
    Check {
        /// Story content file (JSON)
        #[arg(short, long)]
        story: PathBuf,
    },

    /// Play a story interactively, resuming saved progress
    Play {
        /// Story content file (JSON)
        #[arg(short, long)]
        story: PathBuf,

        /// Directory where progress is saved
        #[arg(long, default_value = ".story")]
        save_dir: PathBuf,

        /// Save slot name
        #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
        slot: String,

        /// Ignore saved progress and start from the beginning
        #[arg(long)]
        new: bool,
    },

    /// Show the saved position for a story
    Status {
        /// Story content file (JSON)
        #[arg(short, long)]
        story: PathBuf,

        /// Directory where progress is saved
        #[arg(long, default_value = ".story")]
        save_dir: PathBuf,

        /// Save slot name
        #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
        slot: String,
    },

    /// Delete saved progress
    Reset {
        /// Directory where progress is saved
        #[arg(long, default_value = ".story")]
        save_dir: PathBuf,

        /// Save slot name
        #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
        slot: String,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check { story } => commands::check::run(&story),
        Commands::Play {
            story,
            save_dir,
            slot,
            new,
        } => commands::play::run(&story, &save_dir, &slot, new),
        Commands::Status {
            story,
            save_dir,
            slot,
        } => commands::status::run(&story, &save_dir, &slot),
        Commands::Reset { save_dir, slot } => commands::reset::run(&save_dir, &slot),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
