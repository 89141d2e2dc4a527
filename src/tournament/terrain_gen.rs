//! Deterministic terrain generation for self-play.

// Terrain generation uses intentional casts for RNG operations
#![allow(clippy::cast_precision_loss)]

use serde::{Deserialize, Serialize};

use crate::game::{Coord, Mode, TerrainGrid, TerrainKind};

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate random f64 in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() as f64) / (u64::MAX as f64)
    }
}

/// Fraction of the open board covered by each terrain kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainDensity {
    /// Forest share.
    pub forest: f64,
    /// Swamp share.
    pub swamp: f64,
    /// Mountain share.
    pub mountain: f64,
    /// Desert share.
    pub desert: f64,
}

impl Default for TerrainDensity {
    fn default() -> Self {
        Self {
            forest: 0.08,
            swamp: 0.06,
            mountain: 0.06,
            desert: 0.06,
        }
    }
}

impl TerrainDensity {
    /// No terrain at all.
    #[must_use]
    pub const fn flat() -> Self {
        Self {
            forest: 0.0,
            swamp: 0.0,
            mountain: 0.0,
            desert: 0.0,
        }
    }

    fn shares(&self) -> [(TerrainKind, f64); 4] {
        [
            (TerrainKind::Forest, self.forest),
            (TerrainKind::Swamp, self.swamp),
            (TerrainKind::Mountain, self.mountain),
            (TerrainKind::Desert, self.desert),
        ]
    }

    /// Check that every share lies in [0, 1] and they sum to at most 1.
    ///
    /// # Errors
    ///
    /// Returns `TerrainGenError` describing the first bad share.
    pub fn validate(&self) -> Result<(), TerrainGenError> {
        for (kind, share) in self.shares() {
            if !(0.0..=1.0).contains(&share) {
                return Err(TerrainGenError {
                    reason: format!("{kind:?} share {share} outside [0, 1]"),
                });
            }
        }
        let total: f64 = self.shares().iter().map(|(_, s)| s).sum();
        if total > 1.0 {
            return Err(TerrainGenError {
                reason: format!("terrain shares sum to {total} > 1"),
            });
        }
        Ok(())
    }
}

/// Error type for terrain generation.
#[derive(Debug, Clone)]
pub struct TerrainGenError {
    /// Description of the error.
    pub reason: String,
}

impl std::fmt::Display for TerrainGenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Terrain generation error: {}", self.reason)
    }
}

impl std::error::Error for TerrainGenError {}

/// Generate a terrain layout for `mode`.
///
/// Starting territories stay flat so every standard army deploys legally.
/// The layout is symmetric under the seat rotation: quarter turns in
/// four-player modes, half turns in two-player modes, so no seat is
/// favoured by the dice.
///
/// # Errors
///
/// Returns an error if `density` is invalid.
pub fn generate_terrain(
    seed: u64,
    mode: Mode,
    density: &TerrainDensity,
) -> Result<TerrainGrid, TerrainGenError> {
    density.validate()?;

    let mut rng = Rng::new(seed);
    let mut terrain = TerrainGrid::flat();
    let turns: &[u8] = if mode.is_four_player() { &[1, 2, 3] } else { &[2] };

    for cell in Coord::all() {
        let orbit: Vec<Coord> = std::iter::once(cell)
            .chain(turns.iter().map(|&t| cell.rotated(t)))
            .collect();
        // Sample each orbit once, at its smallest member.
        if orbit.iter().any(|&c| c < cell) {
            continue;
        }
        if orbit.iter().any(|&c| mode.territory_owner(c).is_some()) {
            continue;
        }

        let kind = pick_kind(&mut rng, density);
        for c in orbit {
            terrain.set(c, kind);
        }
    }

    Ok(terrain)
}

fn pick_kind(rng: &mut Rng, density: &TerrainDensity) -> TerrainKind {
    let roll = rng.next_f64();
    let mut acc = 0.0;
    for (kind, share) in density.shares() {
        acc += share;
        if roll < acc {
            return kind;
        }
    }
    TerrainKind::Flat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let density = TerrainDensity::default();
        let a = generate_terrain(42, Mode::FreeForAll, &density).unwrap();
        let b = generate_terrain(42, Mode::FreeForAll, &density).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let density = TerrainDensity::default();
        let a = generate_terrain(1, Mode::NorthSouth, &density).unwrap();
        let b = generate_terrain(2, Mode::NorthSouth, &density).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_territories_stay_flat() {
        let density = TerrainDensity {
            forest: 0.25,
            swamp: 0.25,
            mountain: 0.25,
            desert: 0.25,
        };
        for mode in Mode::ALL {
            let terrain = generate_terrain(7, mode, &density).unwrap();
            for &seat in mode.seats() {
                for cell in mode.territory(seat) {
                    assert_eq!(terrain.get(cell), TerrainKind::Flat, "{mode} {cell}");
                }
            }
        }
    }

    #[test]
    fn test_four_player_layout_has_quarter_turn_symmetry() {
        let terrain = generate_terrain(99, Mode::FreeForAll, &TerrainDensity::default()).unwrap();
        for cell in Coord::all() {
            assert_eq!(terrain.get(cell), terrain.get(cell.rotate_cw()));
        }
    }

    #[test]
    fn test_flat_density_gives_flat_board() {
        let terrain = generate_terrain(5, Mode::Teams, &TerrainDensity::flat()).unwrap();
        assert_eq!(terrain, TerrainGrid::flat());
    }

    #[test]
    fn test_invalid_density_rejected() {
        let density = TerrainDensity {
            forest: 0.6,
            swamp: 0.6,
            ..TerrainDensity::flat()
        };
        assert!(generate_terrain(1, Mode::FreeForAll, &density).is_err());

        let negative = TerrainDensity {
            desert: -0.1,
            ..TerrainDensity::flat()
        };
        assert!(negative.validate().is_err());
    }
}
