//! Error types for rejected transitions.

use std::fmt;

use crate::game::Coord;

/// Why a transition was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    /// A coordinate lies off the board.
    OutOfBounds,
    /// No piece on the origin cell.
    EmptyOrigin,
    /// Origin and destination are the same cell.
    NullMove,
    /// The piece belongs to someone other than the player moving.
    NotYourPiece,
    /// The moving player has been eliminated (or never played).
    InactivePlayer,
    /// The destination holds one of the mover's own (or allied) pieces.
    OwnCapture,
    /// The destination is not in the generated legal list.
    NotInLegalMoves,
    /// The match is already decided.
    GameOver,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IllegalReason::OutOfBounds => "coordinate out of bounds",
            IllegalReason::EmptyOrigin => "no piece on origin cell",
            IllegalReason::NullMove => "origin equals destination",
            IllegalReason::NotYourPiece => "piece belongs to another player",
            IllegalReason::InactivePlayer => "player is not active",
            IllegalReason::OwnCapture => "cannot capture own piece",
            IllegalReason::NotInLegalMoves => "destination is not a legal move",
            IllegalReason::GameOver => "game is over",
        };
        f.write_str(text)
    }
}

/// A rejected move. The board is never left partially updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalMove {
    /// Attempted origin.
    pub from: Coord,
    /// Attempted destination.
    pub to: Coord,
    /// What was wrong.
    pub reason: IllegalReason,
}

impl IllegalMove {
    /// Create a new error.
    #[must_use]
    pub const fn new(from: Coord, to: Coord, reason: IllegalReason) -> Self {
        Self { from, to, reason }
    }
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal move {} -> {}: {}", self.from, self.to, self.reason)
    }
}

impl std::error::Error for IllegalMove {}

/// Result type for move transitions.
pub type MoveResult<T> = Result<T, IllegalMove>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_move_display() {
        let err = IllegalMove::new(Coord::new(1, 2), Coord::new(3, 4), IllegalReason::OwnCapture);
        let text = err.to_string();
        assert!(text.contains("(1,2)"));
        assert!(text.contains("(3,4)"));
        assert!(text.contains("own piece"));
    }
}
