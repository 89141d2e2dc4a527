//! Unit kinds, pieces and unit-kind sets.

use serde::{Deserialize, Serialize};

use crate::game::Seat;

/// The six unit archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum UnitKind {
    /// The royal piece. Losing it eliminates the owner.
    Commander = 0,
    /// Slides orthogonally and diagonally.
    Queen = 1,
    /// Slides orthogonally.
    Rook = 2,
    /// Slides diagonally.
    Bishop = 3,
    /// Jumps in an L shape.
    Knight = 4,
    /// Steps forward, captures diagonally.
    Pawn = 5,
}

impl UnitKind {
    /// All kinds in declaration order.
    pub const ALL: [UnitKind; 6] = [
        UnitKind::Commander,
        UnitKind::Queen,
        UnitKind::Rook,
        UnitKind::Bishop,
        UnitKind::Knight,
        UnitKind::Pawn,
    ];

    /// Whether this kind slides along rays.
    #[must_use]
    pub const fn is_slider(self) -> bool {
        matches!(self, UnitKind::Queen | UnitKind::Rook | UnitKind::Bishop)
    }

    /// Single-letter symbol, uppercase.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            UnitKind::Commander => 'K',
            UnitKind::Queen => 'Q',
            UnitKind::Rook => 'R',
            UnitKind::Bishop => 'B',
            UnitKind::Knight => 'N',
            UnitKind::Pawn => 'P',
        }
    }

    /// Units of this kind in a full-strength army.
    #[must_use]
    pub const fn full_strength(self) -> u8 {
        match self {
            UnitKind::Commander | UnitKind::Queen => 1,
            UnitKind::Rook | UnitKind::Bishop | UnitKind::Knight => 2,
            UnitKind::Pawn => 8,
        }
    }
}

/// A unit on the board. Units have no identity beyond kind and owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Archetype.
    pub kind: UnitKind,
    /// Owning seat.
    pub owner: Seat,
}

impl Piece {
    /// Create a new piece.
    #[must_use]
    pub const fn new(kind: UnitKind, owner: Seat) -> Self {
        Self { kind, owner }
    }

    /// Whether this piece is a commander.
    #[must_use]
    pub const fn is_commander(&self) -> bool {
        matches!(self.kind, UnitKind::Commander)
    }
}

/// A set of unit kinds, stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct UnitSet(u8);

impl UnitSet {
    /// The empty set.
    pub const EMPTY: UnitSet = UnitSet(0);

    /// Every unit kind.
    pub const ALL: UnitSet = UnitSet(0b11_1111);

    /// Build a set from a slice of kinds.
    #[must_use]
    pub const fn of(kinds: &[UnitKind]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < kinds.len() {
            bits |= 1 << kinds[i] as u8;
            i += 1;
        }
        Self(bits)
    }

    /// Membership test.
    #[must_use]
    #[inline]
    pub const fn contains(self, kind: UnitKind) -> bool {
        self.0 & (1 << kind as u8) != 0
    }

    /// Set complement within the six kinds.
    #[must_use]
    pub const fn complement(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }

    /// Whether the set has no members.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = UnitKind> {
        UnitKind::ALL.into_iter().filter(move |&k| self.contains(k))
    }
}
