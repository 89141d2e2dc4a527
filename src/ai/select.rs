//! Single-ply move selection.

use log::{debug, trace};
use serde::Serialize;

use crate::ai::eval::evaluate_board;
use crate::game::{
    Board, Mode, Move, Seat, TerrainGrid, all_legal_moves, apply_desert_attrition, apply_move,
};

/// A legal move with the evaluation of the position it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredMove {
    /// The move.
    pub mv: Move,
    /// Evaluation after the move and attrition, from the mover's side.
    pub score: i32,
}

/// An outside move source, such as a generic chess engine.
///
/// Proposals are only suggestions: an oracle knows nothing of terrain,
/// jousts or attrition, so every proposal is checked against the legal
/// move list before use.
pub trait MoveOracle {
    /// Suggest a move for `seat`, or `None` to defer.
    fn propose(&self, board: &Board, mode: Mode, seat: Seat) -> Option<Move>;
}

/// Score one legal move by committing it on a scratch board.
///
/// Returns `None` if the move cannot be applied.
#[must_use]
pub fn score_move(board: &Board, terrain: &TerrainGrid, mode: Mode, seat: Seat, mv: Move) -> Option<i32> {
    let mut scratch = board.clone();
    apply_move(&mut scratch, mode, mv.from, mv.to).ok()?;
    apply_desert_attrition(&mut scratch, terrain, seat, mv.to);
    Some(evaluate_board(&scratch, terrain, mode, seat))
}

/// Every legal move of `seat`, best first. Ties keep generation order.
#[must_use]
pub fn rank_moves(board: &Board, terrain: &TerrainGrid, mode: Mode, seat: Seat) -> Vec<ScoredMove> {
    let mut ranked: Vec<ScoredMove> = all_legal_moves(board, terrain, mode, seat)
        .into_iter()
        .filter_map(|mv| score_move(board, terrain, mode, seat, mv).map(|score| ScoredMove { mv, score }))
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Best legal move for a computer-controlled seat.
///
/// Returns `None` when the seat has no legal move.
#[must_use]
pub fn select_computer_move(board: &Board, terrain: &TerrainGrid, mode: Mode, seat: Seat) -> Option<Move> {
    let mut best: Option<ScoredMove> = None;
    for mv in all_legal_moves(board, terrain, mode, seat) {
        let Some(score) = score_move(board, terrain, mode, seat, mv) else {
            continue;
        };
        if best.is_none_or(|b| score > b.score) {
            best = Some(ScoredMove { mv, score });
        }
    }
    if let Some(choice) = best {
        trace!("{seat} picks {} (score {})", choice.mv, choice.score);
    }
    best.map(|b| b.mv)
}

/// Ask `oracle` first, falling back to the built-in search when it defers
/// or proposes a move that is not legal here.
#[must_use]
pub fn select_with_oracle(
    board: &Board,
    terrain: &TerrainGrid,
    mode: Mode,
    seat: Seat,
    oracle: &dyn MoveOracle,
) -> Option<Move> {
    if let Some(proposal) = oracle.propose(board, mode, seat) {
        if all_legal_moves(board, terrain, mode, seat).contains(&proposal) {
            return Some(proposal);
        }
        debug!("{seat}: oracle proposed illegal move {proposal}, falling back");
    }
    select_computer_move(board, terrain, mode, seat)
}
