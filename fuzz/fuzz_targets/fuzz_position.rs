#![no_main]

//! Position parser fuzzer.
//!
//! Arbitrary text must either be rejected or load into a battle whose
//! legality queries never panic.

use libfuzzer_sys::fuzz_target;
use terrachess::position::Position;
use terrachess::{has_any_legal_move, is_in_check};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(position) = Position::from_json(text) else {
        return;
    };
    let battle = position.into_battle();
    for &seat in battle.mode.seats() {
        let _ = is_in_check(&battle.board, &battle.terrain, battle.mode, seat);
        let _ = has_any_legal_move(&battle.board, &battle.terrain, battle.mode, seat);
    }
});
