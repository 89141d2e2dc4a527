// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Terrachess: move legality and battlefield resolution for four-player
//! terrain chess on a 12x12 board.
//!
//! This crate provides:
//! - Legal move generation that honours terrain, jousts and self-check
//! - Check detection with a bounded recursion depth
//! - Capture resolution with elimination and army absorption
//! - Desert attrition and deployment
//! - A single-ply heuristic opponent and a parallel self-play harness
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Self-play harness (tournament)    │
//! ├─────────────────────────────────────┤
//! │   Heuristic opponent (ai)           │
//! ├─────────────────────────────────────┤
//! │   Battle state, resolver, attrition │
//! ├─────────────────────────────────────┤
//! │   Move generator <-> check detector │
//! ├─────────────────────────────────────┤
//! │   Patterns, terrain rules, cells    │
//! └─────────────────────────────────────┘
//! ```

pub mod ai;
pub mod error;
pub mod game;
pub mod position;
pub mod tournament;

pub use error::{IllegalMove, IllegalReason, MoveResult};

// Re-export key game types at crate root for convenience
pub use game::{
    Battle, Board, Coord, Mode, Move, MoveOutcome, Piece, Seat, TerrainGrid, TerrainKind, UnitKind,
    apply_desert_attrition, apply_move, has_any_legal_move, is_in_check, legal_moves,
};

pub use ai::{evaluate_board, select_computer_move};
pub use position::Position;
