#![no_main]

//! Move submission fuzzer.
//!
//! Feeds arbitrary, mostly illegal, moves through `Battle::play`:
//! 1. Rejected moves must leave the battle untouched
//! 2. Accepted moves must keep every battle invariant
//! 3. Legal-move picks keep the game moving past the opening

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use terrachess::game::{all_legal_moves, check_invariants};
use terrachess::tournament::{TerrainDensity, generate_terrain};
use terrachess::{Battle, Coord, Mode, Seat};

/// A fuzzer-generated action.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzAction {
    /// Submit raw coordinates, which may be off the board.
    Raw {
        seat: u8,
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    },
    /// Play the n-th legal move of a seat.
    Legal { seat: u8, pick: u16 },
}

/// Structured input for move fuzzing.
#[derive(Arbitrary, Debug)]
struct MoveInput {
    mode: u8,
    terrain_seed: u64,
    actions: Vec<FuzzAction>,
}

fuzz_target!(|input: MoveInput| {
    let mode = Mode::ALL[usize::from(input.mode) % Mode::ALL.len()];
    let Ok(terrain) = generate_terrain(input.terrain_seed, mode, &TerrainDensity::default()) else {
        return;
    };
    let mut battle = Battle::new(mode, terrain);

    for action in input.actions.into_iter().take(64) {
        let (seat, from, to) = match action {
            FuzzAction::Raw {
                seat,
                from_row,
                from_col,
                to_row,
                to_col,
            } => (
                Seat::ALL[usize::from(seat) % 4],
                Coord::new(from_row % 14, from_col % 14),
                Coord::new(to_row % 14, to_col % 14),
            ),
            FuzzAction::Legal { seat, pick } => {
                let seat = Seat::ALL[usize::from(seat) % 4];
                let moves = all_legal_moves(&battle.board, &battle.terrain, battle.mode, seat);
                if moves.is_empty() {
                    continue;
                }
                let mv = moves[usize::from(pick) % moves.len()];
                (seat, mv.from, mv.to)
            }
        };

        let before = battle.board.clone();
        let active_before = battle.active().to_vec();
        match battle.play(seat, from, to) {
            Ok(_) => {
                let violations = check_invariants(&battle);
                assert!(violations.is_empty(), "{violations:?} after {seat} {from} -> {to}");
            }
            Err(_) => {
                assert_eq!(battle.board, before, "rejected move changed the board");
                assert_eq!(battle.active(), active_before.as_slice());
            }
        }
        if battle.is_over() {
            break;
        }
    }
});
