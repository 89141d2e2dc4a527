//! Analyze command implementation.

use super::CliError;
use super::output::format_board;
use std::fmt::Write as _;
use std::path::Path;
use terrachess::ai::{evaluate_board, rank_moves};
use terrachess::position::Position;
use terrachess::{Coord, Seat, has_any_legal_move, is_in_check, legal_moves};

/// Execute the analyze command.
///
/// # Errors
///
/// Returns an error if the position cannot be loaded or a requested seat
/// is not part of its mode.
pub(crate) fn execute(path: &Path, cell: Option<Coord>, seat: Option<Seat>, top: usize) -> Result<(), CliError> {
    let position = Position::load(path)?;
    if let Some(seat) = seat
        && !position.mode.has_seat(seat)
    {
        return Err(CliError::new(format!("{seat} does not play in {}", position.mode)));
    }

    println!("Position: {} ({})", path.display(), position.mode);
    println!();
    print!("{}", format_board(&position.board, &position.terrain));
    println!();

    if let Some(cell) = cell {
        print!("{}", describe_cell(&position, cell)?);
        println!();
    }

    let seats: Vec<Seat> = match seat {
        Some(seat) => vec![seat],
        None => position.mode.seats().to_vec(),
    };
    for seat in seats {
        print!("{}", describe_seat(&position, seat, top));
    }
    Ok(())
}

fn describe_cell(position: &Position, cell: Coord) -> Result<String, CliError> {
    if !cell.in_bounds() {
        return Err(CliError::new(format!("{cell} is off the board")));
    }
    let mut output = String::new();
    let ground = position.terrain.get(cell);
    let Some(piece) = position.board.get(cell) else {
        let _ = writeln!(output, "{cell}: empty {ground:?}");
        return Ok(output);
    };

    let targets = legal_moves(&position.board, &position.terrain, position.mode, cell);
    let _ = writeln!(
        output,
        "{cell}: {} {:?} on {ground:?}, {} legal moves",
        piece.owner,
        piece.kind,
        targets.len()
    );
    for target in targets {
        let verb = if position.board.get(target).is_some() { "captures" } else { "to" };
        let _ = writeln!(output, "  {verb} {target}");
    }
    Ok(output)
}

fn describe_seat(position: &Position, seat: Seat, top: usize) -> String {
    let (board, terrain, mode) = (&position.board, &position.terrain, position.mode);
    let mut output = String::new();

    if board.commander_of(seat).is_none() {
        let _ = writeln!(output, "{seat}: eliminated");
        return output;
    }

    let check = is_in_check(board, terrain, mode, seat);
    let status = match (check, has_any_legal_move(board, terrain, mode, seat)) {
        (true, false) => "checkmated",
        (false, false) => "no legal move",
        (true, true) => "in check",
        (false, true) => "to move",
    };
    let _ = writeln!(
        output,
        "{seat}: {status}, {} units, eval {}",
        board.count_of(seat),
        evaluate_board(board, terrain, mode, seat)
    );
    for scored in rank_moves(board, terrain, mode, seat).into_iter().take(top) {
        let _ = writeln!(output, "  {:>8}  {}", scored.score, scored.mv);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrachess::Mode;
    use terrachess::game::TerrainGrid;

    fn start() -> Position {
        Position::standard(Mode::NorthSouth, TerrainGrid::flat())
    }

    #[test]
    fn test_describe_empty_cell() {
        let text = describe_cell(&start(), Coord::new(6, 6)).unwrap();
        assert!(text.contains("empty"));
    }

    #[test]
    fn test_describe_off_board_cell() {
        assert!(describe_cell(&start(), Coord::new(12, 0)).is_err());
    }

    #[test]
    fn test_describe_seat_lists_top_moves() {
        let text = describe_seat(&start(), Seat::South, 2);
        assert!(text.starts_with("south: to move"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_describe_absent_seat() {
        let text = describe_seat(&start(), Seat::East, 3);
        assert_eq!(text, "east: eliminated\n");
    }
}
