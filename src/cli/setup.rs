//! Setup command implementation.

use super::CliError;
use std::path::PathBuf;
use terrachess::Mode;
use terrachess::game::TerrainGrid;
use terrachess::position::Position;
use terrachess::tournament::{TerrainDensity, generate_terrain};

/// Execute the setup command.
///
/// Without a seed the board is flat; with one, terrain is generated the
/// same way self-play matches generate it.
///
/// # Errors
///
/// Returns an error if terrain generation or writing the file fails.
pub(crate) fn execute(mode: Mode, seed: Option<u64>, output: Option<PathBuf>) -> Result<(), CliError> {
    let terrain = match seed {
        Some(seed) => generate_terrain(seed, mode, &TerrainDensity::default())?,
        None => TerrainGrid::flat(),
    };
    let position = Position::standard(mode, terrain);

    match output {
        Some(path) => {
            position.save(&path)?;
            eprintln!("Position written to {}", path.display());
        }
        None => println!("{}", position.to_json()?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_loadable_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("start.json");
        execute(Mode::Teams, Some(9), Some(path.clone())).unwrap();

        let loaded = Position::load(&path).unwrap();
        assert_eq!(loaded.mode, Mode::Teams);
        assert_eq!(loaded.board.pieces().count(), 64);
    }
}
