//! Output formatting utilities for CLI.

use serde::Serialize;
use std::fmt::Write as _;
use terrachess::game::{BOARD_SIZE, Board, Coord, Mode, Seat, TerrainGrid};
use terrachess::tournament::{MatchEnd, MatchResult, TournamentSummary, TurnEvent};

/// Render board and terrain as a text grid.
///
/// Each cell shows the owner's initial and the unit symbol followed by the
/// terrain symbol, e.g. `SKd` for South's commander on desert.
pub(super) fn format_board(board: &Board, terrain: &TerrainGrid) -> String {
    let mut output = String::from("    ");
    for col in 0..BOARD_SIZE {
        let _ = write!(output, "{col:>3} ");
    }
    output.push('\n');

    for row in 0..BOARD_SIZE {
        let _ = write!(output, "{row:>3} ");
        for col in 0..BOARD_SIZE {
            let cell = Coord::new(row, col);
            let ground = terrain.get(cell).symbol();
            match board.get(cell) {
                Some(piece) => {
                    let _ = write!(output, " {}{}{ground}", seat_initial(piece.owner), piece.kind.symbol());
                }
                None => {
                    let _ = write!(output, "   {ground}");
                }
            }
        }
        output.push('\n');
    }
    output
}

fn seat_initial(seat: Seat) -> char {
    seat.name().chars().next().map_or('?', |c| c.to_ascii_uppercase())
}

fn end_label(end: MatchEnd) -> &'static str {
    match end {
        MatchEnd::Decided => "decided",
        MatchEnd::Stalemate => "stalemate",
        MatchEnd::TurnLimit => "turn limit",
    }
}

/// Format a match result as human-readable text.
pub(super) fn format_match_text(result: &MatchResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Match Result (seed: {}, mode: {})", result.seed, result.mode);
    if result.winners.is_empty() {
        output.push_str("  Winner: none\n");
    } else {
        let names: Vec<&str> = result.winners.iter().map(|s| s.name()).collect();
        let _ = writeln!(output, "  Winner: {}", names.join(" + "));
    }
    let _ = writeln!(output, "  Ended: {}", end_label(result.end));
    let _ = writeln!(output, "  Turns: {}\n", result.turns_played);

    for stats in &result.seat_stats {
        let _ = write!(
            output,
            "  {:<6} {:>3} moves, {:>2} captures, material {}",
            stats.seat.name(),
            stats.moves,
            stats.captures,
            stats.final_material
        );
        if let Some(turn) = stats.eliminated_turn {
            let _ = write!(output, " [eliminated turn {turn}]");
        }
        output.push('\n');
    }

    output
}

/// One line describing a self-play turn.
pub(super) fn format_turn(event: &TurnEvent<'_>) -> String {
    match *event {
        TurnEvent::Moved { turn, seat, report } => {
            let outcome = &report.outcome;
            let mut line = format!(
                "{turn:>4} {:<6} {}{}",
                seat.name(),
                outcome.mover.kind.symbol(),
                outcome.mv
            );
            for taken in &outcome.captured {
                let _ = write!(
                    line,
                    " x{}{}{}",
                    seat_initial(taken.piece.owner),
                    taken.piece.kind.symbol(),
                    taken.at
                );
            }
            if outcome.promoted {
                line.push_str(" =Q");
            }
            if !report.attrition.removed.is_empty() {
                let _ = write!(line, " (desert takes {})", report.attrition.removed.len());
            }
            for fallen in &report.eliminated {
                let _ = write!(line, " [{} out]", fallen.name());
            }
            line
        }
        TurnEvent::Passed { turn, seat } => format!("{turn:>4} {:<6} passes", seat.name()),
        TurnEvent::Checkmated { turn, seat } => format!("{turn:>4} {:<6} is checkmated", seat.name()),
    }
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Mode played.
    mode: Mode,
    /// Total games played.
    games_played: u64,
    /// Matches that failed with an error.
    errors: u64,
    /// Per-seat statistics.
    seats: Vec<JsonTournamentSeat>,
    /// Matches ending in a stalemate round.
    stalemates: u64,
    /// Matches stopped by the turn limit.
    turn_limited: u64,
    /// Average game length in turns.
    avg_turns: f64,
}

/// JSON-serializable per-seat tournament stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentSeat {
    /// Seat name.
    seat: Seat,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Number of times eliminated.
    eliminations: u64,
}

#[allow(clippy::cast_precision_loss)]
fn win_rate(summary: &TournamentSummary, seat: Seat) -> f64 {
    if summary.games_played == 0 {
        return 0.0;
    }
    summary.wins[seat.index()] as f64 / summary.games_played as f64
}

impl JsonTournamentResult {
    /// Create from a summary.
    pub(super) fn from_summary(summary: &TournamentSummary, mode: Mode) -> Self {
        let seats = mode
            .seats()
            .iter()
            .map(|&seat| JsonTournamentSeat {
                seat,
                wins: summary.wins[seat.index()],
                win_rate: win_rate(summary, seat),
                eliminations: summary.eliminations[seat.index()],
            })
            .collect();

        Self {
            mode,
            games_played: summary.games_played,
            errors: summary.errors,
            seats,
            stalemates: summary.stalemates,
            turn_limited: summary.turn_limited,
            avg_turns: summary.average_turns(),
        }
    }
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(summary: &TournamentSummary, mode: Mode) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Tournament Results ({} games, {mode})", summary.games_played);
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for &seat in mode.seats() {
        let _ = writeln!(
            output,
            "  {:<6} {:>5.1}% ({} wins, {} eliminations)",
            seat.name(),
            win_rate(summary, seat) * 100.0,
            summary.wins[seat.index()],
            summary.eliminations[seat.index()]
        );
    }

    let _ = writeln!(output, "\nDecided: {}", summary.decided);
    let _ = writeln!(output, "Stalemates: {}", summary.stalemates);
    let _ = writeln!(output, "Turn limit: {}", summary.turn_limited);
    if summary.errors > 0 {
        let _ = writeln!(output, "Errors: {}", summary.errors);
    }
    let _ = writeln!(output, "\nAverage Game Length: {:.0} turns", summary.average_turns());

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(summary: &TournamentSummary, mode: Mode) -> String {
    let mut output = String::from("seat,wins,win_rate,eliminations\n");
    for &seat in mode.seats() {
        let _ = writeln!(
            output,
            "{},{},{:.4},{}",
            seat.name(),
            summary.wins[seat.index()],
            win_rate(summary, seat),
            summary.eliminations[seat.index()]
        );
    }
    output
}
