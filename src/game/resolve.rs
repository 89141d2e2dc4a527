//! Capture and elimination resolution.
//!
//! Committing a move happens in two visibly separate steps:
//! 1. `relocate` computes the new board: the piece moves, a joust
//!    midpoint victim is removed, promotion happens, the occupant of the
//!    destination is captured.
//! 2. For every captured commander, `absorb_army` scans the whole board
//!    and hands the loser's remaining pieces to the capturer.

use log::{debug, trace};

use crate::error::{IllegalMove, IllegalReason, MoveResult};
use crate::game::movegen::{Move, legal_moves};
use crate::game::patterns::joust_midpoint;
use crate::game::{Board, Coord, Mode, Piece, Seat, TerrainGrid, UnitKind};

/// A piece taken off the board by a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Captured {
    /// Where it stood.
    pub at: Coord,
    /// The piece as it stood there.
    pub piece: Piece,
}

/// Result of the board step of a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    /// The moving piece before any promotion.
    pub mover: Piece,
    /// Whether the mover was promoted.
    pub promoted: bool,
    /// Captured pieces, joust midpoint first.
    pub captured: Vec<Captured>,
}

/// Full result of applying a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The move applied.
    pub mv: Move,
    /// The moving piece before any promotion.
    pub mover: Piece,
    /// Whether the mover was promoted to a queen.
    pub promoted: bool,
    /// Captured pieces, joust midpoint first.
    pub captured: Vec<Captured>,
    /// Seats whose commander was captured.
    pub eliminated: Vec<Seat>,
    /// Pieces that changed hands through army absorption.
    pub absorbed: usize,
}

/// Move a piece, resolving joust capture, promotion and ordinary capture.
///
/// Validates coordinates and ownership before touching the board; on error
/// the board is unchanged. Movement geometry is not checked here, see
/// `apply_legal_move`.
///
/// # Errors
///
/// Returns `IllegalMove` for off-board coordinates, an empty origin, a null
/// move, or a destination held by the mover's own side.
pub fn relocate(board: &mut Board, mode: Mode, from: Coord, to: Coord) -> MoveResult<Relocation> {
    let illegal = |reason| IllegalMove::new(from, to, reason);

    if !from.in_bounds() || !to.in_bounds() {
        return Err(illegal(IllegalReason::OutOfBounds));
    }
    if from == to {
        return Err(illegal(IllegalReason::NullMove));
    }
    let mover = board.get(from).ok_or(illegal(IllegalReason::EmptyOrigin))?;
    if board
        .get(to)
        .is_some_and(|target| mode.are_allied(target.owner, mover.owner))
    {
        return Err(illegal(IllegalReason::OwnCapture));
    }

    let mut captured = Vec::with_capacity(2);

    if mover.is_commander()
        && let Some(midpoint) = joust_midpoint(from, to)
        && let Some(victim) = board.get(midpoint)
        && mode.are_hostile(victim.owner, mover.owner)
    {
        board.take(midpoint);
        captured.push(Captured {
            at: midpoint,
            piece: victim,
        });
    }

    let promoted = mover.kind == UnitKind::Pawn && mode.is_promotion_cell(mover.owner, to);
    let placed = if promoted {
        Piece::new(UnitKind::Queen, mover.owner)
    } else {
        mover
    };

    board.take(from);
    if let Some(victim) = board.put(to, placed) {
        captured.push(Captured { at: to, piece: victim });
    }

    Ok(Relocation {
        mover,
        promoted,
        captured,
    })
}

/// Hand every remaining piece of `loser` to `capturer`.
///
/// Returns how many pieces changed hands.
pub fn absorb_army(board: &mut Board, loser: Seat, capturer: Seat) -> usize {
    board.reassign_owner(loser, capturer)
}

/// Apply a move: relocate, then absorb the army of any captured commander.
///
/// # Errors
///
/// See `relocate`.
pub fn apply_move(board: &mut Board, mode: Mode, from: Coord, to: Coord) -> MoveResult<MoveOutcome> {
    let step = relocate(board, mode, from, to)?;
    let capturer = step.mover.owner;

    let mut eliminated = Vec::new();
    let mut absorbed = 0;
    for fallen in step.captured.iter().filter(|c| c.piece.is_commander()) {
        let loser = fallen.piece.owner;
        let count = absorb_army(board, loser, capturer);
        debug!("{loser} commander captured at {} by {capturer}; {count} pieces absorbed", fallen.at);
        absorbed += count;
        eliminated.push(loser);
    }

    if step.promoted {
        debug!("{capturer} pawn promoted at {to}");
    }
    trace!("{capturer} {:?} {from} -> {to}, {} captured", step.mover.kind, step.captured.len());

    Ok(MoveOutcome {
        mv: Move::new(from, to),
        mover: step.mover,
        promoted: step.promoted,
        captured: step.captured,
        eliminated,
        absorbed,
    })
}

/// Apply a move only if it is in the generated legal list.
///
/// # Errors
///
/// Returns `IllegalMove` if the move is not legal on this board.
pub fn apply_legal_move(
    board: &mut Board,
    terrain: &TerrainGrid,
    mode: Mode,
    from: Coord,
    to: Coord,
) -> MoveResult<MoveOutcome> {
    if !from.in_bounds() || !to.in_bounds() {
        return Err(IllegalMove::new(from, to, IllegalReason::OutOfBounds));
    }
    if board.get(from).is_none() {
        return Err(IllegalMove::new(from, to, IllegalReason::EmptyOrigin));
    }
    if !legal_moves(board, terrain, mode, from).contains(&to) {
        return Err(IllegalMove::new(from, to, IllegalReason::NotInLegalMoves));
    }
    apply_move(board, mode, from, to)
}
