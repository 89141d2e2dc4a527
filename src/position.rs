//! JSON exchange format for positions.
//!
//! A position is everything the engine needs to answer queries: the mode,
//! the board and the terrain. Board and terrain are validated for shape on
//! load.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::{Battle, Board, Mode, TerrainGrid, standard_deployment};

/// A self-contained position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Game mode.
    pub mode: Mode,
    /// Units, row-major, `null` for empty cells.
    pub board: Board,
    /// Terrain, row-major.
    pub terrain: TerrainGrid,
}

/// Error loading or saving a position.
#[derive(Debug)]
pub enum PositionError {
    /// Reading or writing the file failed.
    Io(std::io::Error),
    /// The JSON was malformed or had the wrong shape.
    Json(serde_json::Error),
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "position I/O failed: {e}"),
            Self::Json(e) => write!(f, "invalid position: {e}"),
        }
    }
}

impl std::error::Error for PositionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for PositionError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PositionError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl Position {
    /// The standard deployment of `mode` on the given terrain.
    #[must_use]
    pub fn standard(mode: Mode, terrain: TerrainGrid) -> Self {
        Self {
            mode,
            board: standard_deployment(mode),
            terrain,
        }
    }

    /// Capture the position of a running battle.
    #[must_use]
    pub fn of_battle(battle: &Battle) -> Self {
        Self {
            mode: battle.mode,
            board: battle.board.clone(),
            terrain: battle.terrain.clone(),
        }
    }

    /// Start a battle from this position.
    #[must_use]
    pub fn into_battle(self) -> Battle {
        Battle::from_position(self.mode, self.board, self.terrain)
    }

    /// Parse a position from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or a grid that is not 12x12.
    pub fn from_json(text: &str) -> Result<Self, PositionError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, PositionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a position from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, PositionError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Write the position to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), PositionError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
