//! Board-independent movement geometry.
//!
//! Each function maps an origin cell to candidate cells for one archetype.
//! Nothing here looks at pieces or terrain: sliders get full-length rays
//! and leave truncation to cell resolution, jumpers ignore what lies in
//! between.

use crate::game::board::BOARD_SIZE;
use crate::game::{Coord, Seat};

/// Orthogonal unit steps.
pub const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Diagonal unit steps.
pub const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, 1), (1, -1)];

/// Knight jumps.
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
];

/// Cells along one direction, nearest first.
pub type Ray = Vec<Coord>;

/// A two-cell orthogonal commander jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joust {
    /// The cell jumped over.
    pub midpoint: Coord,
    /// The landing cell.
    pub landing: Coord,
}

/// Walk from `from` in one direction until the edge, at most board-size cells.
#[must_use]
pub fn ray(from: Coord, (d_row, d_col): (i8, i8)) -> Ray {
    let mut cells = Vec::with_capacity(usize::from(BOARD_SIZE) - 1);
    let mut cur = from;
    while let Some(next) = cur.offset(d_row, d_col) {
        cells.push(next);
        cur = next;
    }
    cells
}

/// Rays for a set of directions, skipping directions that leave the board immediately.
#[must_use]
pub fn rays(from: Coord, directions: &[(i8, i8)]) -> Vec<Ray> {
    directions
        .iter()
        .map(|&dir| ray(from, dir))
        .filter(|r| !r.is_empty())
        .collect()
}

/// Rook rays.
#[must_use]
pub fn rook_rays(from: Coord) -> Vec<Ray> {
    rays(from, &ORTHOGONAL)
}

/// Bishop rays.
#[must_use]
pub fn bishop_rays(from: Coord) -> Vec<Ray> {
    rays(from, &DIAGONAL)
}

/// Queen rays: rook and bishop combined.
#[must_use]
pub fn queen_rays(from: Coord) -> Vec<Ray> {
    let mut all = rook_rays(from);
    all.extend(bishop_rays(from));
    all
}

/// Flattened rook pattern.
#[must_use]
pub fn rook_pattern(from: Coord) -> Vec<Coord> {
    rook_rays(from).into_iter().flatten().collect()
}

/// Flattened bishop pattern.
#[must_use]
pub fn bishop_pattern(from: Coord) -> Vec<Coord> {
    bishop_rays(from).into_iter().flatten().collect()
}

/// Flattened queen pattern.
#[must_use]
pub fn queen_pattern(from: Coord) -> Vec<Coord> {
    queen_rays(from).into_iter().flatten().collect()
}

/// Apply a list of offsets, keeping on-board results.
fn offsets(from: Coord, deltas: &[(i8, i8)]) -> Vec<Coord> {
    deltas
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .collect()
}

/// Knight landing cells.
#[must_use]
pub fn knight_pattern(from: Coord) -> Vec<Coord> {
    offsets(from, &KNIGHT_JUMPS)
}

/// Commander single steps in all eight directions.
#[must_use]
pub fn commander_steps(from: Coord) -> Vec<Coord> {
    let mut cells = offsets(from, &ORTHOGONAL);
    cells.extend(offsets(from, &DIAGONAL));
    cells
}

/// Commander jousts: two cells orthogonally, with the cell jumped over.
#[must_use]
pub fn commander_jousts(from: Coord) -> Vec<Joust> {
    ORTHOGONAL
        .iter()
        .filter_map(|&(dr, dc)| {
            let midpoint = from.offset(dr, dc)?;
            let landing = midpoint.offset(dr, dc)?;
            Some(Joust { midpoint, landing })
        })
        .collect()
}

/// The midpoint if `from -> to` is a commander joust.
#[must_use]
pub fn joust_midpoint(from: Coord, to: Coord) -> Option<Coord> {
    commander_jousts(from)
        .into_iter()
        .find(|j| j.landing == to)
        .map(|j| j.midpoint)
}

/// Pawn move pattern: one cell straight ahead.
#[must_use]
pub fn pawn_advance(from: Coord, seat: Seat) -> Option<Coord> {
    let (dr, dc) = seat.forward();
    from.offset(dr, dc)
}

/// Pawn capture pattern: both forward diagonals, then both rear diagonals.
#[must_use]
pub fn pawn_captures(from: Coord, seat: Seat) -> Vec<Coord> {
    let (dr, dc) = seat.forward();
    // Sideways is perpendicular to forward.
    let (sr, sc) = (dc, dr);
    offsets(
        from,
        &[
            (dr + sr, dc + sc),
            (dr - sr, dc - sc),
            (-dr + sr, -dc + sc),
            (-dr - sr, -dc - sc),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rook_pattern_center_and_corner() {
        assert_eq!(rook_pattern(Coord::new(5, 5)).len(), 22);
        assert_eq!(rook_pattern(Coord::new(0, 0)).len(), 22);
    }

    #[test]
    fn test_bishop_pattern_corner() {
        let cells = bishop_pattern(Coord::new(0, 0));
        assert_eq!(cells.len(), 11);
        assert!(cells.iter().all(|c| c.row == c.col));
    }

    #[test]
    fn test_rays_are_ordered_outward() {
        let r = ray(Coord::new(6, 0), (0, 1));
        assert_eq!(r.len(), 11);
        assert_eq!(r[0], Coord::new(6, 1));
        assert_eq!(r[10], Coord::new(6, 11));
    }

    #[test]
    fn test_queen_is_rook_plus_bishop() {
        let from = Coord::new(3, 8);
        let queen = queen_pattern(from).len();
        assert_eq!(queen, rook_pattern(from).len() + bishop_pattern(from).len());
    }

    #[test]
    fn test_knight_pattern_edges() {
        assert_eq!(knight_pattern(Coord::new(6, 6)).len(), 8);
        assert_eq!(knight_pattern(Coord::new(0, 0)).len(), 2);
    }

    #[test]
    fn test_commander_steps_and_jousts() {
        assert_eq!(commander_steps(Coord::new(6, 6)).len(), 8);
        assert_eq!(commander_steps(Coord::new(0, 0)).len(), 3);

        let jousts = commander_jousts(Coord::new(6, 6));
        assert_eq!(jousts.len(), 4);
        assert!(jousts.contains(&Joust {
            midpoint: Coord::new(6, 7),
            landing: Coord::new(6, 8),
        }));
        assert_eq!(commander_jousts(Coord::new(0, 1)).len(), 2);
    }

    #[test]
    fn test_joust_midpoint_lookup() {
        assert_eq!(
            joust_midpoint(Coord::new(4, 4), Coord::new(2, 4)),
            Some(Coord::new(3, 4))
        );
        assert_eq!(joust_midpoint(Coord::new(4, 4), Coord::new(2, 2)), None);
    }

    #[test]
    fn test_pawn_patterns_by_seat() {
        let from = Coord::new(5, 5);
        assert_eq!(pawn_advance(from, Seat::North), Some(Coord::new(6, 5)));
        assert_eq!(pawn_advance(from, Seat::East), Some(Coord::new(5, 4)));

        let north = pawn_captures(from, Seat::North);
        assert_eq!(&north[..2], &[Coord::new(6, 5 + 1), Coord::new(6, 4)]);
        assert_eq!(north.len(), 4);

        let west = pawn_captures(from, Seat::West);
        assert!(west[..2].contains(&Coord::new(6, 6)));
        assert!(west[..2].contains(&Coord::new(4, 6)));
    }

    #[test]
    fn test_pawn_advance_off_board() {
        assert_eq!(pawn_advance(Coord::new(11, 3), Seat::North), None);
    }
}
