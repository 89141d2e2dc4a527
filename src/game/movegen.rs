//! Per-piece legal destination generation.
//!
//! Generation and check detection recurse into each other: filtering out
//! self-check needs the opponents' replies, and those replies are
//! generated here too. The recursion is bounded by an explicit `depth`
//! argument. At `TOP_LEVEL` destinations are filtered for self-check and
//! joust midpoints must be safe; at any deeper level neither test runs, so
//! the check detector's probe never recurses again.

use serde::{Deserialize, Serialize};

use crate::game::cell::{CellResolution, resolve_cell};
use crate::game::check::{is_attacked, is_in_check_at};
use crate::game::patterns::{
    Ray, bishop_rays, commander_jousts, commander_steps, knight_pattern, pawn_advance,
    pawn_captures, queen_rays, rook_rays,
};
use crate::game::resolve::{absorb_army, relocate};
use crate::game::{Board, Coord, Mode, Piece, Seat, TerrainGrid, UnitKind};

/// Depth of a top-level legality query.
pub const TOP_LEVEL: u8 = 0;

/// Depth used by the check detector when probing opponent replies.
pub const CHECK_PROBE: u8 = 1;

/// A move from one cell to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Origin cell.
    pub from: Coord,
    /// Destination cell.
    pub to: Coord,
}

impl Move {
    /// Create a new move.
    #[must_use]
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// Every legal destination for the piece on `from`.
///
/// Empty if the cell is empty or off the board.
#[must_use]
pub fn legal_moves(board: &Board, terrain: &TerrainGrid, mode: Mode, from: Coord) -> Vec<Coord> {
    destinations(board, terrain, mode, from, TOP_LEVEL)
}

/// Destinations for the piece on `from` at a given recursion depth.
///
/// Above `TOP_LEVEL` the result is the raw destination list: no
/// self-check filtering and no joust midpoint safety test.
#[must_use]
pub fn destinations(
    board: &Board,
    terrain: &TerrainGrid,
    mode: Mode,
    from: Coord,
    depth: u8,
) -> Vec<Coord> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };

    let raw = match piece.kind {
        UnitKind::Commander => commander_destinations(board, terrain, mode, from, piece, depth),
        UnitKind::Queen => slide(board, terrain, mode, piece, queen_rays(from)),
        UnitKind::Rook => slide(board, terrain, mode, piece, rook_rays(from)),
        UnitKind::Bishop => slide(board, terrain, mode, piece, bishop_rays(from)),
        UnitKind::Knight => knight_pattern(from)
            .into_iter()
            .filter(|&to| resolve_cell(board, terrain, mode, piece, to).is_legal())
            .collect(),
        UnitKind::Pawn => pawn_destinations(board, terrain, mode, from, piece),
    };

    if depth > TOP_LEVEL {
        return raw;
    }

    raw.into_iter()
        .filter(|&to| !exposes_own_commander(board, terrain, mode, Move::new(from, to)))
        .collect()
}

/// Every legal move of a seat, origins in row-major order.
#[must_use]
pub fn all_legal_moves(board: &Board, terrain: &TerrainGrid, mode: Mode, seat: Seat) -> Vec<Move> {
    board
        .pieces_of(seat)
        .flat_map(|(from, _)| {
            legal_moves(board, terrain, mode, from)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

/// Whether a seat has at least one legal move.
#[must_use]
pub fn has_any_legal_move(board: &Board, terrain: &TerrainGrid, mode: Mode, seat: Seat) -> bool {
    board
        .pieces_of(seat)
        .any(|(from, _)| !legal_moves(board, terrain, mode, from).is_empty())
}

/// Whether moving the piece on `from` to `to` promotes it.
#[must_use]
pub fn is_promotion_move(board: &Board, mode: Mode, from: Coord, to: Coord) -> bool {
    board
        .get(from)
        .is_some_and(|p| p.kind == UnitKind::Pawn && mode.is_promotion_cell(p.owner, to))
}

/// Walk each ray until blocked, capturing, or halted by desert.
fn slide(
    board: &Board,
    terrain: &TerrainGrid,
    mode: Mode,
    piece: Piece,
    rays: Vec<Ray>,
) -> Vec<Coord> {
    let mut out = Vec::new();
    for ray in rays {
        for cell in ray {
            let resolution = resolve_cell(board, terrain, mode, piece, cell);
            if resolution.is_legal() {
                out.push(cell);
            }
            if !resolution.continues() {
                break;
            }
        }
    }
    out
}

fn pawn_destinations(
    board: &Board,
    terrain: &TerrainGrid,
    mode: Mode,
    from: Coord,
    piece: Piece,
) -> Vec<Coord> {
    let mut out = Vec::with_capacity(5);

    if let Some(ahead) = pawn_advance(from, piece.owner)
        && board.is_empty_at(ahead)
        && resolve_cell(board, terrain, mode, piece, ahead).is_legal()
    {
        out.push(ahead);
    }

    out.extend(
        pawn_captures(from, piece.owner)
            .into_iter()
            .filter(|&to| resolve_cell(board, terrain, mode, piece, to) == CellResolution::Capture),
    );

    out
}

fn commander_destinations(
    board: &Board,
    terrain: &TerrainGrid,
    mode: Mode,
    from: Coord,
    piece: Piece,
    depth: u8,
) -> Vec<Coord> {
    let mut out: Vec<Coord> = commander_steps(from)
        .into_iter()
        .filter(|&to| resolve_cell(board, terrain, mode, piece, to).is_legal())
        .collect();

    for joust in commander_jousts(from) {
        // An occupied midpoint must hold an enemy the commander could reach.
        let midpoint_ok = match board.get(joust.midpoint) {
            None => true,
            Some(occupant) => {
                mode.are_hostile(occupant.owner, piece.owner)
                    && terrain.rule_at(joust.midpoint).permits(UnitKind::Commander)
            }
        };
        if !midpoint_ok
            || !resolve_cell(board, terrain, mode, piece, joust.landing).is_legal()
        {
            continue;
        }
        if depth == TOP_LEVEL && midpoint_under_attack(board, terrain, mode, from, joust.midpoint) {
            continue;
        }
        out.push(joust.landing);
    }

    out
}

/// Whether the commander would be attacked while standing on the joust midpoint.
fn midpoint_under_attack(
    board: &Board,
    terrain: &TerrainGrid,
    mode: Mode,
    from: Coord,
    midpoint: Coord,
) -> bool {
    let mut scratch = board.clone();
    let Some(commander) = scratch.take(from) else {
        return true;
    };
    scratch.put(midpoint, commander);
    is_attacked(&scratch, terrain, mode, midpoint, commander.owner)
}

/// Simulate the move on a scratch board and test the mover's own commander.
///
/// The simulation includes army absorption: pieces of a commander captured
/// by this move change sides and no longer threaten the mover.
fn exposes_own_commander(board: &Board, terrain: &TerrainGrid, mode: Mode, mv: Move) -> bool {
    let Some(piece) = board.get(mv.from) else {
        return true;
    };
    let mut scratch = board.clone();
    let Ok(step) = relocate(&mut scratch, mode, mv.from, mv.to) else {
        return true;
    };
    for fallen in step.captured.iter().filter(|c| c.piece.is_commander()) {
        absorb_army(&mut scratch, fallen.piece.owner, piece.owner);
    }
    is_in_check_at(&scratch, terrain, mode, piece.owner, CHECK_PROBE)
}
