//! Static board evaluation.

use crate::game::{BOARD_SIZE, Board, Coord, Mode, Seat, TerrainGrid, UnitKind, is_in_check};

/// Score of a position where every hostile commander is gone.
pub const WIN_SCORE: i32 = 1_000_000;

/// Score of a position without the evaluating seat's commander.
pub const LOSS_SCORE: i32 = -WIN_SCORE;

/// Material lead above which the king hunt term switches on.
pub const KING_HUNT_THRESHOLD: i32 = 500;

/// Flat penalty for being in check.
pub const CHECK_PENALTY: i32 = 150;

const CENTER_WEIGHT: i32 = 4;
const EDGE_PUSH_WEIGHT: i32 = 12;
const CLOSE_IN_WEIGHT: i32 = 3;

/// Material value of a unit kind.
#[must_use]
pub const fn piece_value(kind: UnitKind) -> i32 {
    match kind {
        UnitKind::Pawn => 100,
        UnitKind::Knight => 300,
        UnitKind::Bishop => 320,
        UnitKind::Rook => 500,
        UnitKind::Queen => 900,
        UnitKind::Commander => 20_000,
    }
}

/// Total material value owned by a seat.
#[must_use]
pub fn material(board: &Board, seat: Seat) -> i32 {
    board.pieces_of(seat).map(|(_, p)| piece_value(p.kind)).sum()
}

/// Steps from `cell` to the nearest of the four centre cells, 0..=5.
#[must_use]
pub const fn center_distance(cell: Coord) -> u8 {
    let half = BOARD_SIZE / 2;
    let d_row = if cell.row < half { half - 1 - cell.row } else { cell.row - half };
    let d_col = if cell.col < half { half - 1 - cell.col } else { cell.col - half };
    if d_row > d_col { d_row } else { d_col }
}

/// Evaluate the board from `seat`'s point of view. Higher is better.
///
/// Returns `LOSS_SCORE` without a commander of our own and `WIN_SCORE`
/// when no hostile commander is left.
#[must_use]
pub fn evaluate_board(board: &Board, terrain: &TerrainGrid, mode: Mode, seat: Seat) -> i32 {
    let Some(own_commander) = board.commander_of(seat) else {
        return LOSS_SCORE;
    };
    let hostile: Vec<Seat> = mode
        .seats()
        .iter()
        .copied()
        .filter(|&s| mode.are_hostile(seat, s))
        .collect();
    let hostile_commanders: Vec<Coord> = hostile.iter().filter_map(|&s| board.commander_of(s)).collect();
    if hostile_commanders.is_empty() {
        return WIN_SCORE;
    }

    let own_material = material(board, seat);
    let hostile_material: Vec<i32> = hostile.iter().map(|&s| material(board, s)).collect();
    let mut score = own_material - hostile_material.iter().sum::<i32>();

    let max_distance = i32::from(BOARD_SIZE / 2 - 1);
    score += board
        .pieces_of(seat)
        .map(|(cell, _)| (max_distance - i32::from(center_distance(cell))) * CENTER_WEIGHT)
        .sum::<i32>();

    let strongest = hostile_material.iter().copied().max().unwrap_or(0);
    if own_material - strongest > KING_HUNT_THRESHOLD {
        score += king_hunt(board, seat, own_commander, &hostile_commanders);
    }

    if is_in_check(board, terrain, mode, seat) {
        score -= CHECK_PENALTY;
    }

    score
}

/// Reward pushing the nearest hostile commander to the edge and closing in on it.
fn king_hunt(board: &Board, seat: Seat, own_commander: Coord, targets: &[Coord]) -> i32 {
    let Some(&target) = targets.iter().min_by_key(|&&t| own_commander.chebyshev(t)) else {
        return 0;
    };
    let span = i32::from(BOARD_SIZE - 1);
    let edge_push = (i32::from(BOARD_SIZE / 2 - 1) - i32::from(target.edge_distance())) * EDGE_PUSH_WEIGHT;
    let close_in: i32 = board
        .pieces_of(seat)
        .map(|(cell, _)| (span - i32::from(cell.chebyshev(target))) * CLOSE_IN_WEIGHT)
        .sum();
    edge_push + close_in
}
