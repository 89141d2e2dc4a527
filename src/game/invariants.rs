//! Battle invariants: sanity checks that detect bugs.
//!
//! These should never trigger for a battle driven through `Battle::play`.
//! If they do, the resolver, attrition pass or purge has a bug.

use crate::game::{Battle, Seat, UnitKind};

/// Full strength of one army, in units.
pub const ARMY_SIZE: usize = 16;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all battle invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(battle: &Battle) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut report = |message: String| violations.push(InvariantViolation { message });

    for &seat in battle.active() {
        if !battle.mode.has_seat(seat) {
            report(format!("{seat} is active but does not play {}", battle.mode));
        }
        if battle.active().iter().filter(|&&s| s == seat).count() > 1 {
            report(format!("{seat} is listed as active more than once"));
        }
    }

    for seat in Seat::ALL {
        let commanders = battle
            .board
            .pieces_of(seat)
            .filter(|(_, p)| p.is_commander())
            .count();
        let units = battle.board.count_of(seat);

        if battle.is_active(seat) && commanders != 1 {
            report(format!("Active {seat} has {commanders} commanders"));
        }
        if !battle.is_active(seat) && units > 0 {
            report(format!("Eliminated {seat} still owns {units} units"));
        }
    }

    // Units never appear from nowhere: promotion swaps one for one,
    // absorption only changes owners.
    let on_board = battle.board.pieces().count();
    let taken: usize = Seat::ALL.iter().map(|&s| battle.captured(s).len()).sum();
    let fielded = ARMY_SIZE * battle.mode.seats().len();
    if on_board + taken > fielded {
        report(format!(
            "{on_board} units on board and {taken} captured exceed the {fielded} fielded"
        ));
    }

    // Only the cell just entered: absorbed pawns may already stand on their
    // new owner's promotion edge.
    if let Some(last) = battle.last_move()
        && let Some(piece) = battle.board.get(last.to)
        && piece.kind == UnitKind::Pawn
        && battle.mode.is_promotion_cell(piece.owner, last.to)
    {
        report(format!("Unpromoted {} pawn at {}", piece.owner, last.to));
    }

    violations
}

/// Assert all battle invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(battle: &Battle) {
    let violations = check_invariants(battle);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Battle invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_battle: &Battle) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Coord, LastMove, Mode, Piece, TerrainGrid};

    fn create_valid_battle() -> Battle {
        Battle::new(Mode::FreeForAll, TerrainGrid::flat())
    }

    #[test]
    fn test_valid_battle_passes() {
        let battle = create_valid_battle();
        assert!(check_invariants(&battle).is_empty());
    }

    #[test]
    fn test_missing_commander_detected() {
        let mut battle = create_valid_battle();
        battle.board.take(Coord::new(11, 6));

        let violations = check_invariants(&battle);
        assert!(!violations.is_empty());
        assert!(violations[0].message.contains("commanders"));
    }

    #[test]
    fn test_eliminated_seat_with_units_detected() {
        let mut battle = create_valid_battle();
        battle.active.retain(|&s| s != Seat::West);

        let violations = check_invariants(&battle);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Eliminated west"));
    }

    #[test]
    fn test_unpromoted_pawn_detected() {
        let mut battle = create_valid_battle();
        battle.board.take(Coord::new(0, 4));
        battle.board.put(Coord::new(0, 4), Piece::new(UnitKind::Pawn, Seat::South));
        battle.last_move = Some(LastMove {
            from: Coord::new(1, 4),
            to: Coord::new(0, 4),
            kind: UnitKind::Pawn,
            owner: Seat::South,
            computer: false,
        });

        let violations = check_invariants(&battle);
        assert!(violations.iter().any(|v| v.message.contains("pawn")));
    }

    #[test]
    fn test_absorbed_pawn_on_promotion_edge_is_fine() {
        let mut board = Board::new();
        board.put(Coord::new(0, 0), Piece::new(UnitKind::Rook, Seat::West));
        board.put(Coord::new(0, 5), Piece::new(UnitKind::Commander, Seat::North));
        board.put(Coord::new(0, 8), Piece::new(UnitKind::Pawn, Seat::North));
        board.put(Coord::new(11, 6), Piece::new(UnitKind::Commander, Seat::South));
        board.put(Coord::new(5, 11), Piece::new(UnitKind::Commander, Seat::East));
        board.put(Coord::new(6, 0), Piece::new(UnitKind::Commander, Seat::West));
        let mut battle = Battle::from_position(Mode::FreeForAll, board, TerrainGrid::flat());

        battle.play(Seat::West, Coord::new(0, 0), Coord::new(0, 5)).unwrap();

        assert_eq!(battle.board.get(Coord::new(0, 8)), Some(Piece::new(UnitKind::Pawn, Seat::West)));
        assert!(check_invariants(&battle).is_empty());
    }

    #[test]
    fn test_conjured_units_detected() {
        let mut battle = create_valid_battle();
        battle.captured[Seat::North.index()].push(Piece::new(UnitKind::Queen, Seat::East));

        let violations = check_invariants(&battle);
        assert!(violations.iter().any(|v| v.message.contains("exceed")));
    }

    #[test]
    #[should_panic(expected = "invariant violations")]
    #[cfg(debug_assertions)]
    fn test_assert_invariants_panics() {
        let mut battle = create_valid_battle();
        battle.active.clear();
        assert_invariants(&battle);
    }
}
