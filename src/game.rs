//! Rules layer for Terrachess.
//!
//! Implements the legality and battlefield engine:
//! - Board, terrain grid and the terrain rule table
//! - Move patterns and cell resolution
//! - Legal move generation and check detection
//! - Capture, elimination and army absorption
//! - Desert attrition, deployment and the battle state

mod attrition;
mod board;
mod cell;
mod check;
mod deploy;
pub mod invariants;
mod mode;
pub mod movegen;
pub mod patterns;
mod resolve;
mod seat;
mod state;
mod terrain;
mod unit;

pub use attrition::{Attrition, apply_desert_attrition};
pub use board::{BOARD_SIZE, Board, CELL_COUNT, Coord, ParseCoordError, ShapeError};
pub use cell::{CellResolution, resolve_cell};
pub use check::{is_attacked, is_in_check, is_in_check_at};
pub use deploy::{PlacementError, PlacementReason, place_unit, placement_cells, standard_deployment};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use mode::{Edge, Mode, standard_army};
pub use movegen::{Move, all_legal_moves, has_any_legal_move, is_promotion_move, legal_moves};
pub use resolve::{Captured, MoveOutcome, Relocation, absorb_army, apply_legal_move, apply_move, relocate};
pub use seat::{ParseSeatError, Seat};
pub use state::{Battle, LastMove, TurnReport};
pub use terrain::{TERRAIN_RULES, TerrainGrid, TerrainKind, TerrainRule};
pub use unit::{Piece, UnitKind, UnitSet};
