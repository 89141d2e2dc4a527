//! Terrachess CLI - self-play, tournaments and position analysis.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use terrachess::{Coord, Seat};

/// Terrachess - four-player terrain chess engine
#[derive(Parser, Debug)]
#[command(name = "terrachess")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one computer-vs-computer match
    Play {
        /// Game mode
        #[arg(short, long, value_enum, default_value = "free-for-all")]
        mode: cli::ModeArg,

        /// Random seed for the terrain (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum seat turns (default: 400)
        #[arg(short, long, default_value = "400")]
        turns: u32,

        /// Start from a saved position instead of generated terrain
        #[arg(long)]
        position: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress move-by-move output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run mass parallel matches and aggregate statistics
    Tournament {
        /// Game mode
        #[arg(short, long, value_enum, default_value = "free-for-all")]
        mode: cli::ModeArg,

        /// Number of matches to run (default: 100)
        #[arg(short, long, default_value = "100")]
        games: u64,

        /// Starting seed (increments for each match)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum seat turns per match (default: 400)
        #[arg(short = 't', long)]
        max_turns: Option<u32>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Write a standard starting position as JSON
    Setup {
        /// Game mode
        #[arg(short, long, value_enum, default_value = "free-for-all")]
        mode: cli::ModeArg,

        /// Terrain seed (default: flat board)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect a saved position
    Analyze {
        /// Position file (.json)
        #[arg(required = true)]
        position: PathBuf,

        /// List legal moves of the unit on this cell ("row,col")
        #[arg(short, long)]
        cell: Option<Coord>,

        /// Seat to analyze (default: every seat of the mode)
        #[arg(long)]
        seat: Option<Seat>,

        /// How many ranked computer moves to show
        #[arg(long, default_value = "3")]
        top: usize,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            mode,
            seed,
            turns,
            position,
            format,
            quiet,
        } => cli::play::execute(mode.into(), seed, turns, position, format, quiet),

        Commands::Tournament {
            mode,
            games,
            seed,
            threads,
            max_turns,
            format,
            progress,
        } => cli::tournament::execute(mode.into(), games, seed, threads, max_turns, format, progress),

        Commands::Setup { mode, seed, output } => cli::setup::execute(mode.into(), seed, output),

        Commands::Analyze {
            position,
            cell,
            seat,
            top,
        } => cli::analyze::execute(&position, cell, seat, top),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
