//! Session controller for tic-tac-toe.

use super::ai::{MoveSelector, selector_for};
use super::types::{Board, Mark};
use crate::games::contract::{Difficulty, Outcome};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Errors reported when a move cannot be applied. The session state is
/// left untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Cell index outside 0..=8.
    #[display("cell index out of range")]
    OutOfRange,
    /// Cell already holds a mark.
    #[display("cell is already occupied")]
    CellOccupied,
    /// It is the AI's turn, not the human's.
    #[display("not your turn")]
    NotYourTurn,
    /// The game already ended.
    #[display("game is already over")]
    GameOver,
}

/// A tic-tac-toe game against the computer.
///
/// The session owns the board exclusively; the UI reads snapshots and
/// submits cell indices. When the human move leaves the game running,
/// the AI reply is computed and applied before `apply_move` returns, so
/// control always comes back with the human to move (or the game over).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicTacToeSession {
    board: Board,
    human: Mark,
    difficulty: Difficulty,
    to_move: Mark,
    outcome: Outcome<Mark>,
}

impl TicTacToeSession {
    /// Starts a new game. X always opens, so when the human picks O the
    /// AI makes its first move before the session is returned.
    #[instrument]
    pub fn new(human: Mark, difficulty: Difficulty) -> Self {
        info!(%human, %difficulty, "starting tic-tac-toe session");
        let mut session = Self {
            board: Board::new(),
            human,
            difficulty,
            to_move: Mark::X,
            outcome: Outcome::InProgress,
        };
        if human == Mark::O {
            session.ai_turn(&mut *selector_for(difficulty));
        }
        session
    }

    /// Applies the human move at `cell`, then the AI reply when the game
    /// continues. Rejected moves leave the session unchanged.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, cell: usize) -> Result<Outcome<Mark>, MoveError> {
        self.apply_move_with(cell, &mut *selector_for(self.difficulty))
    }

    /// Like [`apply_move`](Self::apply_move) with an explicit AI
    /// strategy, so tests can pin the opponent's behavior.
    pub fn apply_move_with(
        &mut self,
        cell: usize,
        selector: &mut dyn MoveSelector,
    ) -> Result<Outcome<Mark>, MoveError> {
        if self.outcome.is_over() {
            warn!(cell, "move on finished game rejected");
            return Err(MoveError::GameOver);
        }
        if cell > 8 {
            warn!(cell, "out-of-range move rejected");
            return Err(MoveError::OutOfRange);
        }
        if self.to_move != self.human {
            return Err(MoveError::NotYourTurn);
        }
        if !self.board.is_empty(cell) {
            debug!(cell, "occupied cell rejected");
            return Err(MoveError::CellOccupied);
        }

        self.place(cell);
        if !self.outcome.is_over() {
            self.ai_turn(selector);
        }
        Ok(self.outcome)
    }

    /// Places the mark of the side to move and re-evaluates the result.
    fn place(&mut self, cell: usize) {
        self.board.set(cell, self.to_move);
        if let Some(winner) = self.board.winner() {
            info!(%winner, "game won");
            self.outcome = Outcome::Won(winner);
        } else if self.board.is_full() {
            info!("game drawn");
            self.outcome = Outcome::Draw;
        } else {
            self.to_move = self.to_move.opponent();
        }
    }

    fn ai_turn(&mut self, selector: &mut dyn MoveSelector) {
        if let Some(cell) = selector.select(&self.board, self.to_move) {
            debug!(cell, mark = %self.to_move, "AI move");
            self.place(cell);
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the human's mark.
    pub fn human_mark(&self) -> Mark {
        self.human
    }

    /// Returns the session difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the mark to move. Meaningless once the game is over.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the game result so far.
    pub fn outcome(&self) -> Outcome<Mark> {
        self.outcome
    }

    /// Serializes the session for external persistence.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Restores a session previously produced by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
