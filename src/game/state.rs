//! Battle state management.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{IllegalMove, IllegalReason, MoveResult};
use crate::game::{
    Attrition, Board, Coord, Mode, MoveOutcome, Piece, Seat, TerrainGrid, UnitKind,
    apply_desert_attrition, apply_legal_move, standard_deployment,
};

/// The most recent committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    /// Origin cell.
    pub from: Coord,
    /// Destination cell.
    pub to: Coord,
    /// Kind of the moved unit before any promotion.
    pub kind: UnitKind,
    /// Seat that moved.
    pub owner: Seat,
    /// Whether the computer chose the move.
    pub computer: bool,
}

/// Everything one committed move did to the battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Result of the board step and army absorption.
    pub outcome: MoveOutcome,
    /// Result of the attrition pass.
    pub attrition: Attrition,
    /// Seats that left the active list during this move.
    pub eliminated: Vec<Seat>,
}

/// Complete match state.
#[derive(Debug, Clone)]
pub struct Battle {
    /// Unit placement.
    pub board: Board,
    /// Terrain layout.
    pub terrain: TerrainGrid,
    /// Game mode.
    pub mode: Mode,
    /// Seats still playing, in turn order.
    pub(crate) active: Vec<Seat>,
    /// Pieces each seat has captured, indexed by `Seat::index`.
    pub(crate) captured: [Vec<Piece>; 4],
    pub(crate) last_move: Option<LastMove>,
    pub(crate) turn: u32,
}

impl Battle {
    /// A battle with the standard deployment on the given terrain.
    #[must_use]
    pub fn new(mode: Mode, terrain: TerrainGrid) -> Self {
        Self::from_position(mode, standard_deployment(mode), terrain)
    }

    /// A battle resuming from an arbitrary position.
    ///
    /// Seats of the mode without a commander on the board start eliminated.
    #[must_use]
    pub fn from_position(mode: Mode, board: Board, terrain: TerrainGrid) -> Self {
        let active = mode
            .seats()
            .iter()
            .copied()
            .filter(|&seat| board.commander_of(seat).is_some())
            .collect();
        Self {
            board,
            terrain,
            mode,
            active,
            captured: Default::default(),
            last_move: None,
            turn: 0,
        }
    }

    /// Seats still playing, in turn order.
    #[must_use]
    pub fn active(&self) -> &[Seat] {
        &self.active
    }

    /// Whether a seat is still playing.
    #[must_use]
    pub fn is_active(&self, seat: Seat) -> bool {
        self.active.contains(&seat)
    }

    /// Pieces captured by a seat, in capture order.
    #[must_use]
    pub fn captured(&self, seat: Seat) -> &[Piece] {
        &self.captured[seat.index()]
    }

    /// The most recent committed move.
    #[must_use]
    pub const fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// Number of committed moves.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Whether the match is decided.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.mode.is_decided(&self.active)
    }

    /// The active seat that moves after `seat`, wrapping around.
    ///
    /// `seat` itself need not be active.
    #[must_use]
    pub fn next_to_move(&self, seat: Seat) -> Option<Seat> {
        let order = self.mode.seats();
        let start = order.iter().position(|&s| s == seat)?;
        (1..=order.len())
            .map(|step| order[(start + step) % order.len()])
            .find(|&s| self.is_active(s))
    }

    /// Validate and commit a move chosen by a human player.
    ///
    /// # Errors
    ///
    /// Returns `IllegalMove` if the match is over, the seat is not active,
    /// the piece belongs to someone else, or the move is not legal. The
    /// battle is unchanged on error.
    pub fn play(&mut self, seat: Seat, from: Coord, to: Coord) -> MoveResult<TurnReport> {
        self.commit(seat, from, to, false)
    }

    /// Validate and commit a move chosen by the computer.
    ///
    /// # Errors
    ///
    /// See `play`.
    pub fn play_computer(&mut self, seat: Seat, from: Coord, to: Coord) -> MoveResult<TurnReport> {
        self.commit(seat, from, to, true)
    }

    /// Remove a seat that can no longer move, clearing its army.
    ///
    /// Returns `false` if the seat was not active.
    pub fn concede(&mut self, seat: Seat) -> bool {
        if !self.is_active(seat) {
            return false;
        }
        let cleared = self.board.clear_owner(seat);
        self.active.retain(|&s| s != seat);
        debug!("{seat} concedes; {cleared} units cleared");
        true
    }

    fn commit(&mut self, seat: Seat, from: Coord, to: Coord, computer: bool) -> MoveResult<TurnReport> {
        let illegal = |reason| IllegalMove::new(from, to, reason);

        if self.is_over() {
            return Err(illegal(IllegalReason::GameOver));
        }
        if !self.is_active(seat) {
            return Err(illegal(IllegalReason::InactivePlayer));
        }
        if !from.in_bounds() || !to.in_bounds() {
            return Err(illegal(IllegalReason::OutOfBounds));
        }
        let piece = self.board.get(from).ok_or(illegal(IllegalReason::EmptyOrigin))?;
        if piece.owner != seat {
            return Err(illegal(IllegalReason::NotYourPiece));
        }

        let outcome = apply_legal_move(&mut self.board, &self.terrain, self.mode, from, to)?;
        self.captured[seat.index()].extend(outcome.captured.iter().map(|c| c.piece));

        let attrition = apply_desert_attrition(&mut self.board, &self.terrain, seat, to);
        let eliminated = self.purge_fallen();

        self.last_move = Some(LastMove {
            from,
            to,
            kind: piece.kind,
            owner: seat,
            computer,
        });
        self.turn += 1;
        trace!("turn {}: {seat} {from} -> {to}", self.turn);

        Ok(TurnReport {
            outcome,
            attrition,
            eliminated,
        })
    }

    /// Drop every active seat whose commander is gone.
    fn purge_fallen(&mut self) -> Vec<Seat> {
        let (kept, fallen): (Vec<Seat>, Vec<Seat>) = self
            .active
            .iter()
            .partition(|&&seat| self.board.commander_of(seat).is_some());
        for &seat in &fallen {
            debug!("{seat} eliminated");
        }
        self.active = kept;
        fallen
    }
}
