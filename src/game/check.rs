//! Check detection.

use crate::game::movegen::{CHECK_PROBE, TOP_LEVEL, destinations};
use crate::game::{Board, Coord, Mode, Seat, TerrainGrid};

/// Whether a seat's commander is attacked.
///
/// A seat without a commander has already lost and always reads as in check.
#[must_use]
pub fn is_in_check(board: &Board, terrain: &TerrainGrid, mode: Mode, seat: Seat) -> bool {
    is_in_check_at(board, terrain, mode, seat, CHECK_PROBE)
}

/// `is_in_check` with an explicit probe depth for the opponents' replies.
///
/// The probe never runs at `TOP_LEVEL`; shallower depths are raised to
/// `CHECK_PROBE` so the self-check filter cannot re-enter itself.
#[must_use]
pub fn is_in_check_at(
    board: &Board,
    terrain: &TerrainGrid,
    mode: Mode,
    seat: Seat,
    depth: u8,
) -> bool {
    match board.commander_of(seat) {
        None => true,
        Some(cell) => is_attacked_at(board, terrain, mode, cell, seat, depth),
    }
}

/// Whether any piece hostile to `defender` could move onto `target`.
#[must_use]
pub fn is_attacked(
    board: &Board,
    terrain: &TerrainGrid,
    mode: Mode,
    target: Coord,
    defender: Seat,
) -> bool {
    is_attacked_at(board, terrain, mode, target, defender, CHECK_PROBE)
}

fn is_attacked_at(
    board: &Board,
    terrain: &TerrainGrid,
    mode: Mode,
    target: Coord,
    defender: Seat,
    depth: u8,
) -> bool {
    let depth = depth.max(TOP_LEVEL + 1);
    let occupant = board.get(target).filter(|p| p.owner == defender);
    let rule = terrain.rule_at(target);

    board
        .pieces()
        .filter(|(_, attacker)| mode.are_hostile(attacker.owner, defender))
        // A sheltered defender cannot be threatened by kinds its terrain keeps out.
        .filter(|(_, attacker)| !occupant.is_some_and(|d| rule.shelters(d.kind, attacker.kind)))
        .any(|(from, _)| destinations(board, terrain, mode, from, depth).contains(&target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Piece, TerrainKind, UnitKind};

    fn place(board: &mut Board, row: u8, col: u8, kind: UnitKind, owner: Seat) {
        board.put(Coord::new(row, col), Piece::new(kind, owner));
    }

    #[test]
    fn test_rook_on_open_row_gives_check() {
        let mut board = Board::new();
        place(&mut board, 6, 6, UnitKind::Commander, Seat::South);
        place(&mut board, 6, 0, UnitKind::Rook, Seat::North);
        let terrain = TerrainGrid::flat();

        assert!(is_in_check(&board, &terrain, Mode::NorthSouth, Seat::South));
    }

    #[test]
    fn test_blocked_rook_gives_no_check() {
        let mut board = Board::new();
        place(&mut board, 6, 6, UnitKind::Commander, Seat::South);
        place(&mut board, 6, 0, UnitKind::Rook, Seat::North);
        place(&mut board, 6, 3, UnitKind::Pawn, Seat::South);
        let terrain = TerrainGrid::flat();

        assert!(!is_in_check(&board, &terrain, Mode::NorthSouth, Seat::South));
    }

    #[test]
    fn test_desert_shields_commander_from_slider() {
        let mut board = Board::new();
        place(&mut board, 6, 6, UnitKind::Commander, Seat::South);
        place(&mut board, 6, 0, UnitKind::Rook, Seat::North);
        let mut terrain = TerrainGrid::flat();
        terrain.set(Coord::new(6, 2), TerrainKind::Desert);

        assert!(!is_in_check(&board, &terrain, Mode::NorthSouth, Seat::South));
    }

    #[test]
    fn test_mountain_sanctuary_against_queen() {
        let mut board = Board::new();
        place(&mut board, 6, 6, UnitKind::Commander, Seat::South);
        place(&mut board, 6, 0, UnitKind::Queen, Seat::North);
        let mut terrain = TerrainGrid::flat();
        terrain.set(Coord::new(6, 6), TerrainKind::Mountain);

        assert!(!is_in_check(&board, &terrain, Mode::NorthSouth, Seat::South));

        // A rook can climb, so the mountain does not shelter against it.
        place(&mut board, 6, 0, UnitKind::Rook, Seat::North);
        assert!(is_in_check(&board, &terrain, Mode::NorthSouth, Seat::South));
    }

    #[test]
    fn test_missing_commander_reads_as_check() {
        let board = Board::new();
        let terrain = TerrainGrid::flat();
        assert!(is_in_check(&board, &terrain, Mode::FreeForAll, Seat::West));
    }

    #[test]
    fn test_allies_never_check() {
        let mut board = Board::new();
        place(&mut board, 6, 6, UnitKind::Commander, Seat::South);
        place(&mut board, 6, 0, UnitKind::Rook, Seat::North);
        let terrain = TerrainGrid::flat();

        assert!(!is_in_check(&board, &terrain, Mode::Teams, Seat::South));
        assert!(is_in_check(&board, &terrain, Mode::FreeForAll, Seat::South));
    }

    #[test]
    fn test_pawn_checks_diagonally_only() {
        let mut board = Board::new();
        place(&mut board, 6, 6, UnitKind::Commander, Seat::South);
        place(&mut board, 5, 6, UnitKind::Pawn, Seat::North);
        let terrain = TerrainGrid::flat();
        assert!(!is_in_check(&board, &terrain, Mode::NorthSouth, Seat::South));

        place(&mut board, 5, 5, UnitKind::Pawn, Seat::North);
        assert!(is_in_check(&board, &terrain, Mode::NorthSouth, Seat::South));
    }

    #[test]
    fn test_attacked_empty_cell() {
        let mut board = Board::new();
        place(&mut board, 0, 3, UnitKind::Bishop, Seat::East);
        let terrain = TerrainGrid::flat();
        assert!(is_attacked(&board, &terrain, Mode::FreeForAll, Coord::new(3, 6), Seat::North));
        assert!(!is_attacked(&board, &terrain, Mode::FreeForAll, Coord::new(3, 5), Seat::North));
        assert!(!is_attacked(&board, &terrain, Mode::FreeForAll, Coord::new(3, 6), Seat::East));
    }
}
