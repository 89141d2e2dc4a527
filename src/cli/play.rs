//! Play command implementation.

use super::output::{format_board, format_match_text, format_turn};
use super::{CliError, OutputFormat, seed_or_clock};
use std::path::PathBuf;
use terrachess::position::Position;
use terrachess::tournament::{TerrainDensity, generate_terrain, play_out_with};
use terrachess::{Battle, Mode};

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the position cannot be loaded or the match fails.
pub(crate) fn execute(
    mode: Mode,
    seed: Option<u64>,
    turns: u32,
    position: Option<PathBuf>,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    if turns == 0 {
        return Err(CliError::new("--turns must be at least 1"));
    }

    let seed = seed_or_clock(seed);
    let battle = match &position {
        Some(path) => Position::load(path)?.into_battle(),
        None => Battle::new(mode, generate_terrain(seed, mode, &TerrainDensity::default())?),
    };
    let Some(&first) = battle.active().first() else {
        return Err(CliError::new("position has no active seat"));
    };

    let verbose = !quiet && format == OutputFormat::Text;
    if verbose {
        match &position {
            Some(path) => println!("Playing {} from {}...", battle.mode, path.display()),
            None => println!("Playing {mode} with seed {seed}..."),
        }
        println!();
    }

    let terrain = battle.terrain.clone();
    let mut final_board = battle.board.clone();
    let mut result = play_out_with(battle, first, turns, |event, now| {
        if verbose {
            println!("{}", format_turn(event));
        }
        final_board.clone_from(&now.board);
    })?;
    if position.is_none() {
        result.seed = seed;
    }

    match format {
        OutputFormat::Text => {
            if verbose {
                println!();
            }
            print!("{}", format_match_text(&result));
            if !quiet {
                println!();
                print!("{}", format_board(&final_board, &terrain));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
