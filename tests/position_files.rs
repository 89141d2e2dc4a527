//! Position file round trips through the filesystem.
//!
//! Run with: cargo test position_files

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::fs;

use terrachess::position::{Position, PositionError};
use terrachess::tournament::{TerrainDensity, generate_terrain};
use terrachess::{Coord, Mode, Seat, legal_moves};

#[test]
fn test_saved_position_reloads_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ffa.json");
    let terrain = generate_terrain(31, Mode::FreeForAll, &TerrainDensity::default()).unwrap();
    let position = Position::standard(Mode::FreeForAll, terrain);

    position.save(&path).unwrap();
    let loaded = Position::load(&path).unwrap();

    assert_eq!(loaded, position);
}

#[test]
fn test_reloaded_battle_answers_the_same_queries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mid.json");

    let mut battle = Position::standard(Mode::NorthSouth, Default::default()).into_battle();
    battle.play(Seat::South, Coord::new(10, 5), Coord::new(9, 5)).unwrap();
    Position::of_battle(&battle).save(&path).unwrap();

    let reloaded = Position::load(&path).unwrap().into_battle();
    assert_eq!(reloaded.active(), battle.active());
    for (cell, _) in battle.board.pieces() {
        assert_eq!(
            legal_moves(&reloaded.board, &reloaded.terrain, reloaded.mode, cell),
            legal_moves(&battle.board, &battle.terrain, battle.mode, cell),
        );
    }
}

#[test]
fn test_truncated_board_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    let json = Position::standard(Mode::EastWest, Default::default()).to_json().unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["board"].as_array_mut().unwrap().pop();
    fs::write(&path, value.to_string()).unwrap();

    assert!(matches!(Position::load(&path), Err(PositionError::Json(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Position::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, PositionError::Io(_)));
}
