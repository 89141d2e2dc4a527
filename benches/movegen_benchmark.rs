//! Benchmarks for move generation and the computer opponent.
//!
//! Legal move generation runs the check probe for every candidate, so it
//! dominates both the computer's move choice and self-play throughput.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use terrachess::ai::select_computer_move;
use terrachess::game::all_legal_moves;
use terrachess::tournament::{MatchConfig, TerrainDensity, generate_terrain, run_match};
use terrachess::{Battle, Mode, Seat, is_in_check};

fn opening(mode: Mode) -> Battle {
    let terrain = generate_terrain(42, mode, &TerrainDensity::default()).unwrap_or_default();
    Battle::new(mode, terrain)
}

fn bench_legal_moves(c: &mut Criterion) {
    let battle = opening(Mode::FreeForAll);

    c.bench_function("all_legal_moves_ffa_opening", |b| {
        b.iter(|| {
            let moves = all_legal_moves(
                black_box(&battle.board),
                black_box(&battle.terrain),
                battle.mode,
                Seat::South,
            );
            black_box(moves)
        });
    });
}

fn bench_check_detection(c: &mut Criterion) {
    let battle = opening(Mode::FreeForAll);

    c.bench_function("is_in_check_ffa_opening", |b| {
        b.iter(|| {
            black_box(is_in_check(
                black_box(&battle.board),
                black_box(&battle.terrain),
                battle.mode,
                Seat::North,
            ))
        });
    });
}

fn bench_computer_move(c: &mut Criterion) {
    let battle = opening(Mode::Teams);

    c.bench_function("select_computer_move_teams_opening", |b| {
        b.iter(|| {
            let mv = select_computer_move(
                black_box(&battle.board),
                black_box(&battle.terrain),
                battle.mode,
                Seat::East,
            );
            black_box(mv)
        });
    });
}

fn bench_short_match(c: &mut Criterion) {
    let config = MatchConfig {
        mode: Mode::NorthSouth,
        max_turns: 20,
        ..MatchConfig::default()
    };

    let mut group = c.benchmark_group("match");
    group.sample_size(10);
    group.bench_function("north_south_20_turns", |b| {
        b.iter(|| black_box(run_match(black_box(7), &config)));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_legal_moves,
    bench_check_detection,
    bench_computer_move,
    bench_short_match
);
criterion_main!(benches);
