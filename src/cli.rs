//! CLI command implementations for Terrachess.

pub(crate) mod analyze;
pub(crate) mod play;
pub(crate) mod setup;
pub(crate) mod tournament;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use terrachess::Mode;

/// Game mode as a command-line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ModeArg {
    /// North against South.
    NorthSouth,
    /// East against West.
    EastWest,
    /// Four players, everyone for themselves.
    FreeForAll,
    /// North and South against East and West.
    Teams,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::NorthSouth => Mode::NorthSouth,
            ModeArg::EastWest => Mode::EastWest,
            ModeArg::FreeForAll => Mode::FreeForAll,
            ModeArg::Teams => Mode::Teams,
        }
    }
}

/// Output format for the `play` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `tournament` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TournamentFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<terrachess::tournament::TournamentError> for CliError {
    fn from(e: terrachess::tournament::TournamentError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<terrachess::tournament::TerrainGenError> for CliError {
    fn from(e: terrachess::tournament::TerrainGenError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<terrachess::position::PositionError> for CliError {
    fn from(e: terrachess::position::PositionError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<terrachess::IllegalMove> for CliError {
    fn from(e: terrachess::IllegalMove) -> Self {
        Self::new(e.to_string())
    }
}

/// Seed from the clock when none was given.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn seed_or_clock(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}
