//! Deployment: placing units into starting territory before play begins.

use std::fmt;

use crate::game::{Board, Coord, Mode, Piece, Seat, TerrainGrid, UnitKind, standard_army};

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementReason {
    /// The seat does not play in this mode.
    SeatNotInMode,
    /// The cell is outside the seat's starting territory.
    OutsideTerritory,
    /// Another unit already stands there.
    Occupied,
    /// The terrain does not allow this kind.
    TerrainForbids,
    /// The seat already fields the full strength of this kind.
    StrengthExhausted,
}

impl fmt::Display for PlacementReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PlacementReason::SeatNotInMode => "seat does not play in this mode",
            PlacementReason::OutsideTerritory => "cell outside starting territory",
            PlacementReason::Occupied => "cell already occupied",
            PlacementReason::TerrainForbids => "terrain does not allow this unit",
            PlacementReason::StrengthExhausted => "no more units of this kind to place",
        };
        f.write_str(text)
    }
}

/// A rejected placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementError {
    /// Seat placing the unit.
    pub seat: Seat,
    /// Kind being placed.
    pub kind: UnitKind,
    /// Target cell.
    pub cell: Coord,
    /// What was wrong.
    pub reason: PlacementReason,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot place {} {:?} at {}: {}",
            self.seat, self.kind, self.cell, self.reason
        )
    }
}

impl std::error::Error for PlacementError {}

/// Empty starting-territory cells where `seat` may still place units.
#[must_use]
pub fn placement_cells(board: &Board, mode: Mode, seat: Seat) -> Vec<Coord> {
    mode.territory(seat)
        .into_iter()
        .filter(|&cell| board.is_empty_at(cell))
        .collect()
}

/// Place one unit during deployment.
///
/// # Errors
///
/// Returns `PlacementError` if the seat is not playing, the cell is outside
/// its territory or occupied, the terrain forbids the kind, or the seat has
/// already placed its full strength of that kind.
pub fn place_unit(
    board: &mut Board,
    terrain: &TerrainGrid,
    mode: Mode,
    seat: Seat,
    kind: UnitKind,
    cell: Coord,
) -> Result<(), PlacementError> {
    let reject = |reason| PlacementError {
        seat,
        kind,
        cell,
        reason,
    };

    if !mode.has_seat(seat) {
        return Err(reject(PlacementReason::SeatNotInMode));
    }
    if !mode.in_territory(seat, cell) {
        return Err(reject(PlacementReason::OutsideTerritory));
    }
    if !board.is_empty_at(cell) {
        return Err(reject(PlacementReason::Occupied));
    }
    if !terrain.rule_at(cell).permits(kind) {
        return Err(reject(PlacementReason::TerrainForbids));
    }
    let fielded = board
        .pieces_of(seat)
        .filter(|(_, piece)| piece.kind == kind)
        .count();
    if fielded >= usize::from(kind.full_strength()) {
        return Err(reject(PlacementReason::StrengthExhausted));
    }

    board.put(cell, Piece::new(kind, seat));
    Ok(())
}

/// Board with every seat of `mode` deployed in the standard layout.
#[must_use]
pub fn standard_deployment(mode: Mode) -> Board {
    let mut board = Board::new();
    for &seat in mode.seats() {
        for (cell, kind) in standard_army(seat) {
            board.put(cell, Piece::new(kind, seat));
        }
    }
    board
}
