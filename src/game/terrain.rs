//! Terrain kinds, the terrain rule table and the terrain grid.

use serde::{Deserialize, Serialize};

use crate::game::board::{CELL_COUNT, ShapeError};
use crate::game::{Coord, UnitKind, UnitSet};

/// Type of terrain on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum TerrainKind {
    /// No effect.
    #[default]
    Flat = 0,
    /// Keeps rooks out; shelters pawns and knights.
    Forest = 1,
    /// Bogs down rooks and knights; shelters pawns and bishops.
    Swamp = 2,
    /// Only commanders, rooks and pawns climb it; they are sheltered there.
    Mountain = 3,
    /// Enterable by anyone, never transited; units left standing are lost.
    Desert = 4,
}

impl TerrainKind {
    /// All terrain kinds.
    pub const ALL: [TerrainKind; 5] = [
        TerrainKind::Flat,
        TerrainKind::Forest,
        TerrainKind::Swamp,
        TerrainKind::Mountain,
        TerrainKind::Desert,
    ];

    /// The movement rule for this terrain.
    #[must_use]
    #[inline]
    pub const fn rule(self) -> &'static TerrainRule {
        &TERRAIN_RULES[self as usize]
    }

    /// Whether sliding paths stop on this terrain.
    #[must_use]
    pub const fn halts_sliding(self) -> bool {
        matches!(self, TerrainKind::Desert)
    }

    /// Whether units standing here are lost at the end of their owner's move.
    #[must_use]
    pub const fn attrits(self) -> bool {
        matches!(self, TerrainKind::Desert)
    }

    /// Single-character symbol for text rendering.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            TerrainKind::Flat => '.',
            TerrainKind::Forest => 'f',
            TerrainKind::Swamp => 's',
            TerrainKind::Mountain => 'm',
            TerrainKind::Desert => 'd',
        }
    }
}

/// Which units a terrain admits, rejects and shelters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainRule {
    /// Kinds that may occupy or pass through.
    pub allowed: UnitSet,
    /// Kinds that can neither occupy nor pass through.
    pub blocked: UnitSet,
    /// Kinds immune here to every attacker kind in `blocked`.
    pub sanctuary: UnitSet,
}

impl TerrainRule {
    const fn new(blocked: UnitSet, sanctuary: UnitSet) -> Self {
        Self {
            allowed: blocked.complement(),
            blocked,
            sanctuary,
        }
    }

    /// Whether `kind` may enter (or pass through) this terrain.
    #[must_use]
    #[inline]
    pub const fn permits(&self, kind: UnitKind) -> bool {
        self.allowed.contains(kind) && !self.blocked.contains(kind)
    }

    /// Whether a `defender` standing here is immune to `attacker`.
    #[must_use]
    #[inline]
    pub const fn shelters(&self, defender: UnitKind, attacker: UnitKind) -> bool {
        self.sanctuary.contains(defender) && !self.permits(attacker)
    }
}

/// Static terrain rules, indexed by `TerrainKind`.
pub static TERRAIN_RULES: [TerrainRule; 5] = [
    // Flat
    TerrainRule::new(UnitSet::EMPTY, UnitSet::EMPTY),
    // Forest
    TerrainRule::new(
        UnitSet::of(&[UnitKind::Rook]),
        UnitSet::of(&[UnitKind::Pawn, UnitKind::Knight]),
    ),
    // Swamp
    TerrainRule::new(
        UnitSet::of(&[UnitKind::Rook, UnitKind::Knight]),
        UnitSet::of(&[UnitKind::Pawn, UnitKind::Bishop]),
    ),
    // Mountain
    TerrainRule::new(
        UnitSet::of(&[UnitKind::Queen, UnitKind::Bishop, UnitKind::Knight]),
        UnitSet::of(&[UnitKind::Commander, UnitKind::Rook, UnitKind::Pawn]),
    ),
    // Desert
    TerrainRule::new(UnitSet::EMPTY, UnitSet::EMPTY),
];

/// The 12x12 terrain layout. Spatially coupled to the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TerrainKind>", into = "Vec<TerrainKind>")]
pub struct TerrainGrid {
    /// Cells stored in row-major order.
    cells: Vec<TerrainKind>,
}

impl Default for TerrainGrid {
    fn default() -> Self {
        Self::flat()
    }
}

impl TryFrom<Vec<TerrainKind>> for TerrainGrid {
    type Error = ShapeError;

    fn try_from(cells: Vec<TerrainKind>) -> Result<Self, Self::Error> {
        if cells.len() == CELL_COUNT {
            Ok(Self { cells })
        } else {
            Err(ShapeError { found: cells.len() })
        }
    }
}

impl From<TerrainGrid> for Vec<TerrainKind> {
    fn from(grid: TerrainGrid) -> Self {
        grid.cells
    }
}

impl TerrainGrid {
    /// An all-flat grid.
    #[must_use]
    pub fn flat() -> Self {
        Self {
            cells: vec![TerrainKind::Flat; CELL_COUNT],
        }
    }

    /// Terrain at a coordinate. Off-board cells read as flat.
    #[must_use]
    #[inline]
    pub fn get(&self, coord: Coord) -> TerrainKind {
        coord
            .index()
            .map_or(TerrainKind::Flat, |idx| self.cells[idx])
    }

    /// Set the terrain at a coordinate.
    ///
    /// Returns `false` if the coordinate is out of bounds.
    pub fn set(&mut self, coord: Coord, kind: TerrainKind) -> bool {
        if let Some(idx) = coord.index() {
            self.cells[idx] = kind;
            true
        } else {
            false
        }
    }

    /// The rule in force at a coordinate.
    #[must_use]
    #[inline]
    pub fn rule_at(&self, coord: Coord) -> &'static TerrainRule {
        self.get(coord).rule()
    }

    /// Count cells of a given kind.
    #[must_use]
    pub fn count(&self, kind: TerrainKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    /// Iterate over all coordinates and their terrain.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, TerrainKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &kind)| (Coord::from_index(idx), kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_and_desert_permit_everything() {
        for kind in UnitKind::ALL {
            assert!(TerrainKind::Flat.rule().permits(kind));
            assert!(TerrainKind::Desert.rule().permits(kind));
        }
    }

    #[test]
    fn test_forest_blocks_rooks() {
        let rule = TerrainKind::Forest.rule();
        assert!(!rule.permits(UnitKind::Rook));
        assert!(rule.permits(UnitKind::Knight));
        assert!(rule.shelters(UnitKind::Pawn, UnitKind::Rook));
        assert!(!rule.shelters(UnitKind::Pawn, UnitKind::Bishop));
        assert!(!rule.shelters(UnitKind::Queen, UnitKind::Rook));
    }

    #[test]
    fn test_mountain_shelters_commander_from_queen() {
        let rule = TerrainKind::Mountain.rule();
        assert!(rule.permits(UnitKind::Commander));
        assert!(!rule.permits(UnitKind::Queen));
        assert!(rule.shelters(UnitKind::Commander, UnitKind::Queen));
        assert!(!rule.shelters(UnitKind::Commander, UnitKind::Rook));
    }

    #[test]
    fn test_allowed_and_blocked_are_disjoint() {
        for kind in TerrainKind::ALL {
            let rule = kind.rule();
            for unit in UnitKind::ALL {
                assert_ne!(rule.allowed.contains(unit), rule.blocked.contains(unit));
            }
        }
    }

    #[test]
    fn test_only_desert_halts_and_attrits() {
        for kind in TerrainKind::ALL {
            assert_eq!(kind.halts_sliding(), kind == TerrainKind::Desert);
            assert_eq!(kind.attrits(), kind == TerrainKind::Desert);
        }
    }

    #[test]
    fn test_grid_get_set() {
        let mut grid = TerrainGrid::flat();
        let coord = Coord::new(3, 7);
        assert_eq!(grid.get(coord), TerrainKind::Flat);
        assert!(grid.set(coord, TerrainKind::Swamp));
        assert_eq!(grid.get(coord), TerrainKind::Swamp);
        assert_eq!(grid.count(TerrainKind::Swamp), 1);
        assert!(!grid.set(Coord::new(0, 12), TerrainKind::Swamp));
    }
}
