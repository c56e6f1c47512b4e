//! Bridge between the authoritative chess board and the search worker.
//!
//! The rules engine (shakmaty) owns the position; the bridge never edits
//! squares, it only applies moves validated against the legal-move list.
//! AI moves are delegated to the background worker and raced against a
//! difficulty-scaled timeout, with a random-legal-move fallback so the
//! game always progresses.

use super::backend::MaterialSearch;
use super::engine::{EngineHandle, SearchCommand, SearchReply};
use crate::games::contract::{Difficulty, Outcome};
use derive_more::{Display, Error};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, File, Move, Position, Role, Square};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Errors reported when a human move cannot be applied. The position is
/// left untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The game already ended.
    #[display("game is already over")]
    GameOver,
    /// It is the AI's side to move (possibly with a search outstanding).
    #[display("not your turn")]
    NotYourTurn,
    /// The move is not legal in the current position.
    #[display("illegal move")]
    IllegalMove,
}

/// Where an AI move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiSource {
    /// The search worker answered in time.
    Engine,
    /// Timeout, worker error, or degraded mode: random legal move.
    Fallback,
}

/// An applied AI move, for the UI to animate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiMove {
    /// The move in coordinate notation.
    pub uci: String,
    /// Whether the engine or the fallback produced it.
    pub source: AiSource,
}

/// Serializable stand-in for `shakmaty::Color` in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideColor {
    /// The white pieces.
    White,
    /// The black pieces.
    Black,
}

impl From<Color> for SideColor {
    fn from(color: Color) -> Self {
        match color {
            Color::White => SideColor::White,
            Color::Black => SideColor::Black,
        }
    }
}

impl From<SideColor> for Color {
    fn from(color: SideColor) -> Self {
        match color {
            SideColor::White => Color::White,
            SideColor::Black => Color::Black,
        }
    }
}

/// Serializable snapshot of a chess session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChessSnapshot {
    /// Position as FEN.
    pub fen: String,
    /// The human's color.
    pub human: SideColor,
    /// Session difficulty.
    pub difficulty: Difficulty,
}

/// A chess game against the background engine.
pub struct ChessSession {
    pos: Chess,
    human: Color,
    difficulty: Difficulty,
    engine: Option<EngineHandle>,
    search_timeout: Duration,
    next_ticket: u64,
    outcome: Outcome<Color>,
}

impl std::fmt::Debug for ChessSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChessSession")
            .field("fen", &self.fen())
            .field("human", &self.human)
            .field("difficulty", &self.difficulty)
            .field("degraded", &self.engine.is_none())
            .finish()
    }
}

impl ChessSession {
    /// Starts a game from the standard initial position with the
    /// built-in search backend. If the worker cannot be spawned the
    /// session runs degraded: every AI move uses the random fallback.
    #[instrument]
    pub fn start(human: Color, difficulty: Difficulty) -> Self {
        let engine = match EngineHandle::spawn(MaterialSearch::new()) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "search worker unavailable, entering degraded mode");
                None
            }
        };
        Self::start_with_engine(engine, human, difficulty)
    }

    /// Starts a game with an explicit engine handle (or `None` for
    /// degraded mode). Used to inject scripted engines in tests.
    pub fn start_with_engine(
        engine: Option<EngineHandle>,
        human: Color,
        difficulty: Difficulty,
    ) -> Self {
        info!(?human, %difficulty, degraded = engine.is_none(), "starting chess session");
        Self {
            pos: Chess::default(),
            human,
            difficulty,
            engine,
            search_timeout: difficulty.search_timeout(),
            next_ticket: 0,
            outcome: Outcome::InProgress,
        }
    }

    /// Restores a session from a snapshot. Fails on malformed FEN.
    pub fn restore(
        snapshot: &ChessSnapshot,
        engine: Option<EngineHandle>,
    ) -> Result<Self, shakmaty::fen::ParseFenError> {
        let fen: Fen = snapshot.fen.parse()?;
        let mut session =
            Self::start_with_engine(engine, snapshot.human.into(), snapshot.difficulty);
        if let Ok(pos) = fen.into_position(CastlingMode::Standard) {
            session.pos = pos;
            session.refresh_outcome();
        }
        Ok(session)
    }

    /// Captures the session state for external persistence.
    pub fn snapshot(&self) -> ChessSnapshot {
        ChessSnapshot {
            fen: self.fen(),
            human: self.human.into(),
            difficulty: self.difficulty,
        }
    }

    /// Overrides the difficulty-derived search timeout.
    pub fn set_search_timeout(&mut self, timeout: Duration) {
        self.search_timeout = timeout;
    }

    /// Current position as FEN.
    pub fn fen(&self) -> String {
        Fen::from_position(self.pos.clone(), EnPassantMode::Legal).to_string()
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        self.pos.turn()
    }

    /// The human's color.
    pub fn human_color(&self) -> Color {
        self.human
    }

    /// Game result so far.
    pub fn outcome(&self) -> Outcome<Color> {
        self.outcome
    }

    /// True while the game runs and the engine side is to move.
    pub fn is_ai_turn(&self) -> bool {
        !self.outcome.is_over() && self.pos.turn() != self.human
    }

    /// True when the session runs without a search worker.
    pub fn is_degraded(&self) -> bool {
        self.engine.is_none()
    }

    /// Legal moves in coordinate notation, for UI eligibility display.
    pub fn legal_moves_uci(&self) -> Vec<String> {
        self.pos
            .legal_moves()
            .iter()
            .map(|m| m.to_uci(CastlingMode::Standard).to_string())
            .collect()
    }

    /// Applies a human move given as from/to squares plus an optional
    /// promotion piece. Rejected while it is the AI's side to move (a
    /// search may be outstanding), after the game ends, or when no legal
    /// move matches.
    #[instrument(skip(self), fields(fen = %self.fen()))]
    pub fn apply_human_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<Outcome<Color>, MoveError> {
        if self.outcome.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.pos.turn() != self.human {
            warn!("human move rejected while engine side to move");
            return Err(MoveError::NotYourTurn);
        }
        let m = find_legal(&self.pos, from, to, promotion).ok_or(MoveError::IllegalMove)?;
        self.apply_validated(&m)?;
        info!(uci = %m.to_uci(CastlingMode::Standard), "human move applied");
        Ok(self.outcome)
    }

    /// Computes and applies the AI move for the current position.
    ///
    /// Dispatches one `go` command to the worker and awaits the matching
    /// reply, the worker's error, or the timeout, whichever resolves
    /// first; stale replies from earlier tickets are discarded. Any
    /// failure path falls back to a uniform-random legal move, so the
    /// game never stalls.
    #[instrument(skip(self), fields(fen = %self.fen()))]
    pub async fn ai_move(&mut self) -> Result<AiMove, MoveError> {
        if self.outcome.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.pos.turn() == self.human {
            return Err(MoveError::NotYourTurn);
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let reply = match &mut self.engine {
            None => None,
            Some(engine) => {
                let sent = engine.submit(SearchCommand::Go {
                    fen: Fen::from_position(self.pos.clone(), EnPassantMode::Legal).to_string(),
                    difficulty: self.difficulty,
                    ticket,
                });
                if sent {
                    await_reply(engine, ticket, self.search_timeout).await
                } else {
                    warn!("search worker dead, using fallback");
                    None
                }
            }
        };

        if let Some(uci) = reply {
            match parse_coordinate(&self.pos, &uci) {
                Some(m) => {
                    self.apply_validated(&m)?;
                    info!(%uci, "engine move applied");
                    return Ok(AiMove {
                        uci,
                        source: AiSource::Engine,
                    });
                }
                None => {
                    warn!(%uci, "engine reply not legal in current position, using fallback");
                }
            }
        }

        self.fallback_move()
    }

    /// Applies a uniform-random legal move for the side to move.
    fn fallback_move(&mut self) -> Result<AiMove, MoveError> {
        let legal = self.pos.legal_moves();
        let m = legal.choose(&mut rand::rng()).cloned();
        match m {
            Some(m) => {
                let uci = m.to_uci(CastlingMode::Standard).to_string();
                self.apply_validated(&m)?;
                info!(%uci, "fallback move applied");
                Ok(AiMove {
                    uci,
                    source: AiSource::Fallback,
                })
            }
            // No legal move means the position was already terminal.
            None => {
                self.refresh_outcome();
                Err(MoveError::GameOver)
            }
        }
    }

    /// Applies a move known to come from the legal-move list.
    fn apply_validated(&mut self, m: &Move) -> Result<(), MoveError> {
        match self.pos.clone().play(m) {
            Ok(next) => {
                self.pos = next;
                self.refresh_outcome();
                Ok(())
            }
            Err(_) => Err(MoveError::IllegalMove),
        }
    }

    fn refresh_outcome(&mut self) {
        self.outcome = match self.pos.outcome() {
            Some(shakmaty::Outcome::Decisive { winner }) => {
                info!(?winner, "game over");
                Outcome::Won(winner)
            }
            Some(shakmaty::Outcome::Draw) => {
                info!("game drawn");
                Outcome::Draw
            }
            None => Outcome::InProgress,
        };
    }
}

/// Awaits the reply for `ticket`, discarding stale ones. `None` means
/// timeout, worker death, or an explicit backend failure.
async fn await_reply(
    engine: &mut EngineHandle,
    ticket: u64,
    timeout: Duration,
) -> Option<String> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        match tokio::time::timeout_at(deadline, engine.recv()).await {
            Ok(Some(reply)) if reply.ticket() == ticket => match reply {
                SearchReply::BestMove { uci, .. } => return Some(uci),
                SearchReply::Failed { message, .. } => {
                    warn!(%message, "engine reported failure");
                    return None;
                }
            },
            Ok(Some(stale)) => {
                debug!(stale_ticket = stale.ticket(), "discarding stale engine reply");
            }
            Ok(None) => {
                warn!("engine channel closed mid-search");
                return None;
            }
            Err(_) => {
                warn!(?timeout, "engine search timed out");
                return None;
            }
        }
    }
}

/// Parses coordinate notation (`e2e4`, `e7e8q`) against the current
/// legal moves. Returns `None` when the text is malformed or no legal
/// move matches.
fn parse_coordinate(pos: &Chess, text: &str) -> Option<Move> {
    let text = text.trim();
    let bytes = text.as_bytes();
    if !(4..=5).contains(&bytes.len()) {
        return None;
    }
    let from = Square::from_ascii(&bytes[0..2]).ok()?;
    let to = Square::from_ascii(&bytes[2..4]).ok()?;
    let promotion = if bytes.len() == 5 {
        Some(Role::from_char(bytes[4] as char)?)
    } else {
        None
    };
    find_legal(pos, from, to, promotion)
}

/// Finds the legal move matching from/to/promotion. Castling is matched
/// both by king-to-rook and by the conventional two-square king step.
fn find_legal(pos: &Chess, from: Square, to: Square, promotion: Option<Role>) -> Option<Move> {
    pos.legal_moves()
        .iter()
        .find(|m| match m {
            Move::Castle { king, rook } => {
                let file = if rook.file() > king.file() {
                    File::G
                } else {
                    File::C
                };
                let king_target = Square::from_coords(file, king.rank());
                *king == from && (to == king_target || to == *rook)
            }
            _ => m.from() == Some(from) && m.to() == to && m.promotion() == promotion,
        })
        .cloned()
}
