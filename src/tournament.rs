//! Self-play harness for Terrachess.
//!
//! Provides a pure function interface: `(seed, config) -> MatchResult`
//!
//! The harness handles:
//! - Deterministic terrain generation from the seed
//! - Computer-vs-computer turns through the validated `Battle::play` path
//! - Checkmate and stalemate handling for seats with no legal move
//! - Parallel batches of independent matches with rayon

mod terrain_gen;

pub use terrain_gen::{TerrainDensity, TerrainGenError, generate_terrain};

use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::ai::{material, select_computer_move};
use crate::error::IllegalMove;
use crate::game::{Battle, Mode, Seat, TurnReport, is_in_check};

/// Configuration for self-play matches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    /// Game mode.
    pub mode: Mode,
    /// Maximum seat turns (moves and passes) before the match is stopped.
    pub max_turns: u32,
    /// Terrain mix for generated boards.
    pub terrain: TerrainDensity,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: Mode::FreeForAll,
            max_turns: 400,
            terrain: TerrainDensity::default(),
        }
    }
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchEnd {
    /// One player, or one team, is left.
    Decided,
    /// Every remaining seat had to pass in the same round.
    Stalemate,
    /// The turn limit was reached.
    TurnLimit,
}

/// Statistics for a single seat.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SeatStats {
    /// The seat.
    pub seat: Seat,
    /// Moves committed.
    pub moves: u32,
    /// Units captured, joust captures included.
    pub captures: u32,
    /// Turn the seat was eliminated (None if survived).
    pub eliminated_turn: Option<u32>,
    /// Material left on the board at the end.
    pub final_material: i32,
}

/// Final result of a match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    /// The seed used for this match.
    pub seed: u64,
    /// Mode played.
    pub mode: Mode,
    /// How the match ended.
    pub end: MatchEnd,
    /// Winning seats: the survivors of a decided match, otherwise the
    /// survivors with the most material. Empty if nobody survived.
    pub winners: Vec<Seat>,
    /// Seat turns taken, passes included.
    pub turns_played: u32,
    /// Per-seat statistics in turn order.
    pub seat_stats: Vec<SeatStats>,
    /// Elimination order (first eliminated is index 0).
    pub elimination_order: Vec<Seat>,
}

/// Error type for self-play operations.
#[derive(Debug)]
pub enum TournamentError {
    /// A match needs at least one turn.
    ZeroTurns,
    /// Terrain generation failed.
    TerrainGeneration(TerrainGenError),
    /// The computer chose a move the engine rejected.
    IllegalComputerMove(IllegalMove),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroTurns => write!(f, "Turn limit must be at least 1"),
            Self::TerrainGeneration(e) => write!(f, "Terrain generation failed: {e}"),
            Self::IllegalComputerMove(e) => write!(f, "Computer chose an illegal move: {e}"),
        }
    }
}

impl std::error::Error for TournamentError {}

impl From<TerrainGenError> for TournamentError {
    fn from(e: TerrainGenError) -> Self {
        Self::TerrainGeneration(e)
    }
}

/// Run a complete computer-vs-computer match.
///
/// # Determinism
///
/// Given the same seed and config, this function always produces the
/// same `MatchResult`.
///
/// # Errors
///
/// Returns an error if the config is invalid or the engine rejects a
/// computer move.
pub fn run_match(seed: u64, config: &MatchConfig) -> Result<MatchResult, TournamentError> {
    if config.max_turns == 0 {
        return Err(TournamentError::ZeroTurns);
    }
    let terrain = generate_terrain(seed, config.mode, &config.terrain)?;
    MatchRunner::new(seed, Battle::new(config.mode, terrain), config.max_turns).run(&mut |_, _| {})
}

/// Run a prepared battle to completion with the computer playing every seat.
///
/// `first` moves first; it must be active.
///
/// # Errors
///
/// Returns an error if the engine rejects a computer move.
pub fn play_out(
    battle: Battle,
    first: Seat,
    max_turns: u32,
) -> Result<MatchResult, TournamentError> {
    play_out_with(battle, first, max_turns, |_, _| {})
}

/// Something that happened during a self-play turn.
#[derive(Debug, Clone, Copy)]
pub enum TurnEvent<'a> {
    /// A seat committed a move.
    Moved {
        /// Seat turn index, passes included.
        turn: u32,
        /// Seat that moved.
        seat: Seat,
        /// What the move did.
        report: &'a TurnReport,
    },
    /// A seat had no legal move and was not in check.
    Passed {
        /// Seat turn index.
        turn: u32,
        /// Seat that passed.
        seat: Seat,
    },
    /// A seat had no legal move while in check and left the game.
    Checkmated {
        /// Seat turn index.
        turn: u32,
        /// Seat removed.
        seat: Seat,
    },
}

/// `play_out` reporting every turn to `on_turn` together with the battle
/// as it stands after that turn.
///
/// # Errors
///
/// Returns an error if the engine rejects a computer move.
pub fn play_out_with<F>(
    battle: Battle,
    first: Seat,
    max_turns: u32,
    mut on_turn: F,
) -> Result<MatchResult, TournamentError>
where
    F: FnMut(&TurnEvent<'_>, &Battle),
{
    let mut runner = MatchRunner::new(0, battle, max_turns);
    runner.to_move = Some(first);
    runner.run(&mut on_turn)
}

/// Aggregate statistics over many matches.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TournamentSummary {
    /// Matches completed.
    pub games_played: u64,
    /// Matches that failed with an error.
    pub errors: u64,
    /// Matches decided by elimination.
    pub decided: u64,
    /// Matches ending in a stalemate round.
    pub stalemates: u64,
    /// Matches stopped by the turn limit.
    pub turn_limited: u64,
    /// Wins per seat, indexed by `Seat::index`.
    pub wins: [u64; 4],
    /// Eliminations per seat, indexed by `Seat::index`.
    pub eliminations: [u64; 4],
    /// Sum of turns over all completed matches.
    pub total_turns: u64,
}

impl TournamentSummary {
    /// Fold one match result into the summary.
    pub fn add_result(&mut self, result: &MatchResult) {
        self.games_played += 1;
        match result.end {
            MatchEnd::Decided => self.decided += 1,
            MatchEnd::Stalemate => self.stalemates += 1,
            MatchEnd::TurnLimit => self.turn_limited += 1,
        }
        for seat in &result.winners {
            self.wins[seat.index()] += 1;
        }
        for seat in &result.elimination_order {
            self.eliminations[seat.index()] += 1;
        }
        self.total_turns += u64::from(result.turns_played);
    }

    /// Merge another summary into this one.
    pub fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.errors += other.errors;
        self.decided += other.decided;
        self.stalemates += other.stalemates;
        self.turn_limited += other.turn_limited;
        for i in 0..4 {
            self.wins[i] += other.wins[i];
            self.eliminations[i] += other.eliminations[i];
        }
        self.total_turns += other.total_turns;
    }

    /// Mean match length in turns.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_turns(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games_played as f64
        }
    }
}

/// Run `games` matches with consecutive seeds starting at `base_seed`.
///
/// Matches run in parallel on the rayon pool; each thread accumulates its
/// own summary and the summaries are merged at the end.
#[must_use]
pub fn run_tournament(base_seed: u64, games: u64, config: &MatchConfig) -> TournamentSummary {
    run_tournament_with(base_seed, games, config, |_| {})
}

/// `run_tournament` calling `on_match` with each finished match's seed.
#[must_use]
pub fn run_tournament_with<F>(base_seed: u64, games: u64, config: &MatchConfig, on_match: F) -> TournamentSummary
where
    F: Fn(u64) + Sync,
{
    (0..games)
        .into_par_iter()
        .fold(TournamentSummary::default, |mut local, i| {
            let seed = base_seed.wrapping_add(i);
            match run_match(seed, config) {
                Ok(result) => local.add_result(&result),
                Err(e) => {
                    warn!("match with seed {seed} failed: {e}");
                    local.errors += 1;
                }
            }
            on_match(seed);
            local
        })
        .reduce(TournamentSummary::default, |mut a, b| {
            a.merge(&b);
            a
        })
}

/// Drives one battle turn by turn.
struct MatchRunner {
    seed: u64,
    battle: Battle,
    max_turns: u32,
    to_move: Option<Seat>,
    turns: u32,
    stats: Vec<SeatStats>,
    elimination_order: Vec<Seat>,
}

impl MatchRunner {
    fn new(seed: u64, battle: Battle, max_turns: u32) -> Self {
        let stats = battle
            .mode
            .seats()
            .iter()
            .map(|&seat| SeatStats {
                seat,
                moves: 0,
                captures: 0,
                eliminated_turn: None,
                final_material: 0,
            })
            .collect();
        let to_move = battle.active().first().copied();
        Self {
            seed,
            battle,
            max_turns,
            to_move,
            turns: 0,
            stats,
            elimination_order: Vec::new(),
        }
    }

    fn run(mut self, on_turn: &mut dyn FnMut(&TurnEvent<'_>, &Battle)) -> Result<MatchResult, TournamentError> {
        let mut passes_in_a_row = 0;
        let end = loop {
            if self.battle.is_over() {
                break MatchEnd::Decided;
            }
            if self.turns >= self.max_turns {
                break MatchEnd::TurnLimit;
            }
            let Some(seat) = self.to_move.filter(|&s| self.battle.is_active(s)) else {
                break MatchEnd::Decided;
            };

            if self.take_turn(seat, on_turn)? {
                passes_in_a_row = 0;
            } else {
                passes_in_a_row += 1;
                if passes_in_a_row >= self.battle.active().len() {
                    break MatchEnd::Stalemate;
                }
            }
            self.turns += 1;
            self.to_move = self.battle.next_to_move(seat);
        };
        Ok(self.finish(end))
    }

    /// Play one seat's turn. Returns `false` if the seat passed.
    fn take_turn(
        &mut self,
        seat: Seat,
        on_turn: &mut dyn FnMut(&TurnEvent<'_>, &Battle),
    ) -> Result<bool, TournamentError> {
        let turn = self.turns;
        let battle = &self.battle;
        let Some(mv) = select_computer_move(&battle.board, &battle.terrain, battle.mode, seat) else {
            if is_in_check(&battle.board, &battle.terrain, battle.mode, seat) {
                debug!("{seat} is checkmated at turn {turn}");
                self.battle.concede(seat);
                self.record_elimination(seat);
                on_turn(&TurnEvent::Checkmated { turn, seat }, &self.battle);
                return Ok(true);
            }
            debug!("{seat} has no legal move and passes");
            on_turn(&TurnEvent::Passed { turn, seat }, &self.battle);
            return Ok(false);
        };

        let report = self
            .battle
            .play_computer(seat, mv.from, mv.to)
            .map_err(TournamentError::IllegalComputerMove)?;

        if let Some(stats) = self.stats_mut(seat) {
            stats.moves += 1;
            stats.captures += u32::try_from(report.outcome.captured.len()).unwrap_or(u32::MAX);
        }
        for &fallen in &report.eliminated {
            self.record_elimination(fallen);
        }
        on_turn(&TurnEvent::Moved { turn, seat, report: &report }, &self.battle);
        Ok(true)
    }

    fn stats_mut(&mut self, seat: Seat) -> Option<&mut SeatStats> {
        self.stats.iter_mut().find(|s| s.seat == seat)
    }

    fn record_elimination(&mut self, seat: Seat) {
        let turn = self.turns;
        if let Some(stats) = self.stats_mut(seat) {
            stats.eliminated_turn = Some(turn);
        }
        self.elimination_order.push(seat);
    }

    fn finish(mut self, end: MatchEnd) -> MatchResult {
        for stats in &mut self.stats {
            stats.final_material = material(&self.battle.board, stats.seat);
        }

        let survivors = self.battle.active().to_vec();
        let winners = if end == MatchEnd::Decided {
            survivors
        } else {
            let best = survivors
                .iter()
                .map(|&s| material(&self.battle.board, s))
                .max();
            survivors
                .into_iter()
                .filter(|&s| Some(material(&self.battle.board, s)) == best)
                .collect()
        };

        MatchResult {
            seed: self.seed,
            mode: self.battle.mode,
            end,
            winners,
            turns_played: self.turns,
            seat_stats: self.stats,
            elimination_order: self.elimination_order,
        }
    }
}
