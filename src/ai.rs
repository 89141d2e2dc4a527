//! Heuristic opponent for computer-controlled seats.
//!
//! The search is a single ply: every legal move is committed on a scratch
//! board (including desert attrition) and the resulting position is scored
//! by a static evaluator. No lookahead beyond the check test built into
//! move generation.

mod eval;
mod select;

pub use eval::{
    CHECK_PENALTY, KING_HUNT_THRESHOLD, LOSS_SCORE, WIN_SCORE, center_distance, evaluate_board,
    material, piece_value,
};
pub use select::{MoveOracle, ScoredMove, rank_moves, score_move, select_computer_move, select_with_oracle};
