//! Cell resolution: can a given mover enter a given cell, and what happens
//! to its path if it does.

use crate::game::{Board, Coord, Mode, Piece, TerrainGrid};

/// Outcome of a mover trying to enter one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellResolution {
    /// Off the board, terrain forbids the kind, or a friendly unit stands there.
    Blocked,
    /// Empty and enterable; a slide may carry on past it.
    Open,
    /// Empty desert: the mover may stop here but never transit it.
    Halt,
    /// Hostile unit present: legal capture, the path ends here.
    Capture,
}

impl CellResolution {
    /// Whether the mover may end its move on the cell.
    #[must_use]
    #[inline]
    pub const fn is_legal(self) -> bool {
        !matches!(self, CellResolution::Blocked)
    }

    /// Whether a sliding path continues past the cell.
    #[must_use]
    #[inline]
    pub const fn continues(self) -> bool {
        matches!(self, CellResolution::Open)
    }
}

/// Resolve `mover` entering `target`.
///
/// Terrain that blocks the mover's kind rejects the cell outright.
/// Desert stops a path whether or not it is occupied. Sanctuary needs no
/// special case: a defender sheltered from an attacker kind stands on
/// terrain that blocks that kind.
#[must_use]
pub fn resolve_cell(
    board: &Board,
    terrain: &TerrainGrid,
    mode: Mode,
    mover: Piece,
    target: Coord,
) -> CellResolution {
    if !target.in_bounds() {
        return CellResolution::Blocked;
    }

    let kind = terrain.get(target);
    if !kind.rule().permits(mover.kind) {
        return CellResolution::Blocked;
    }

    match board.get(target) {
        Some(occupant) if mode.are_allied(occupant.owner, mover.owner) => CellResolution::Blocked,
        Some(_) => CellResolution::Capture,
        None if kind.halts_sliding() => CellResolution::Halt,
        None => CellResolution::Open,
    }
}
