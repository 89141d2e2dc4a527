//! Desert attrition.
//!
//! Deserts cannot sustain an army. At the end of every committed move the
//! mover's units left standing on desert are lost, except the unit that
//! has just arrived.

use log::debug;

use crate::game::{Board, Coord, Seat, TerrainGrid};

/// What the attrition pass removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrition {
    /// Cells whose unit was lost to the desert.
    pub removed: Vec<Coord>,
    /// Set when the owner's commander was among the losses.
    pub eliminated: Option<Seat>,
}

impl Attrition {
    /// Whether nothing happened.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.eliminated.is_none()
    }
}

/// Remove every unit of `owner` standing on desert, other than the one on
/// `just_moved`.
///
/// If the commander is lost, the owner is eliminated and every remaining
/// unit it owns is cleared from the board. Nobody absorbs that army.
pub fn apply_desert_attrition(
    board: &mut Board,
    terrain: &TerrainGrid,
    owner: Seat,
    just_moved: Coord,
) -> Attrition {
    let doomed: Vec<Coord> = board
        .pieces_of(owner)
        .filter(|&(cell, _)| cell != just_moved && terrain.get(cell).attrits())
        .map(|(cell, _)| cell)
        .collect();

    let mut outcome = Attrition::default();
    for cell in doomed {
        if let Some(piece) = board.take(cell) {
            if piece.is_commander() {
                outcome.eliminated = Some(owner);
            }
            outcome.removed.push(cell);
        }
    }

    if outcome.eliminated.is_some() {
        let cleared = board.clear_owner(owner);
        debug!("{owner} commander lost to the desert; {cleared} units cleared");
    } else if !outcome.removed.is_empty() {
        debug!("{owner} lost {} units to the desert", outcome.removed.len());
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Piece, TerrainKind, UnitKind};

    fn desert_at(cells: &[(u8, u8)]) -> TerrainGrid {
        let mut terrain = TerrainGrid::flat();
        for &(r, c) in cells {
            terrain.set(Coord::new(r, c), TerrainKind::Desert);
        }
        terrain
    }

    #[test]
    fn test_just_moved_unit_survives() {
        let mut board = Board::new();
        board.put(Coord::new(4, 4), Piece::new(UnitKind::Rook, Seat::North));
        let terrain = desert_at(&[(4, 4)]);

        let outcome = apply_desert_attrition(&mut board, &terrain, Seat::North, Coord::new(4, 4));
        assert!(outcome.is_empty());
        assert!(board.get(Coord::new(4, 4)).is_some());
    }

    #[test]
    fn test_units_left_on_desert_are_removed() {
        let mut board = Board::new();
        board.put(Coord::new(4, 4), Piece::new(UnitKind::Rook, Seat::North));
        board.put(Coord::new(5, 5), Piece::new(UnitKind::Knight, Seat::North));
        board.put(Coord::new(0, 0), Piece::new(UnitKind::Commander, Seat::North));
        let terrain = desert_at(&[(4, 4)]);

        let outcome = apply_desert_attrition(&mut board, &terrain, Seat::North, Coord::new(5, 5));
        assert_eq!(outcome.removed, vec![Coord::new(4, 4)]);
        assert_eq!(outcome.eliminated, None);
        assert!(board.get(Coord::new(4, 4)).is_none());
        assert!(board.get(Coord::new(0, 0)).is_some());
    }

    #[test]
    fn test_other_owners_untouched() {
        let mut board = Board::new();
        board.put(Coord::new(4, 4), Piece::new(UnitKind::Rook, Seat::South));
        let terrain = desert_at(&[(4, 4)]);

        let outcome = apply_desert_attrition(&mut board, &terrain, Seat::North, Coord::new(0, 0));
        assert!(outcome.is_empty());
        assert!(board.get(Coord::new(4, 4)).is_some());
    }

    #[test]
    fn test_commander_on_desert_eliminates_without_absorption() {
        let mut board = Board::new();
        board.put(Coord::new(2, 2), Piece::new(UnitKind::Commander, Seat::East));
        board.put(Coord::new(8, 8), Piece::new(UnitKind::Queen, Seat::East));
        board.put(Coord::new(9, 9), Piece::new(UnitKind::Pawn, Seat::East));
        board.put(Coord::new(6, 6), Piece::new(UnitKind::Rook, Seat::West));
        let terrain = desert_at(&[(2, 2)]);

        let outcome = apply_desert_attrition(&mut board, &terrain, Seat::East, Coord::new(8, 8));
        assert_eq!(outcome.eliminated, Some(Seat::East));
        assert_eq!(board.count_of(Seat::East), 0);
        assert_eq!(board.count_of(Seat::West), 1);
    }
}
