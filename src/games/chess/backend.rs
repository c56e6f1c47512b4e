//! Search backends for the chess worker.
//!
//! The worker thread drives a [`SearchBackend`]; the bridge only sees the
//! message protocol, so backends are swappable (the test suite injects
//! silent, erroring, and scripted ones).

use crate::games::contract::Difficulty;
use derive_more::{Display, Error};
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Move, Position, Role};
use tracing::debug;

/// Error reported by a backend that could not produce a move.
#[derive(Debug, Clone, Display, Error)]
#[display("search failed: {message}")]
pub struct SearchError {
    /// Human-readable failure description.
    pub message: String,
}

impl SearchError {
    /// Creates a new search error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Best-move computation service. Runs on the worker thread, so it may
/// block; the bridge enforces the timeout on its own side.
pub trait SearchBackend: Send + 'static {
    /// Returns the chosen move in coordinate notation (e.g. `e2e4`,
    /// `e7e8q`) for the position given as FEN.
    fn best_move(&mut self, fen: &str, difficulty: Difficulty) -> Result<String, SearchError>;
}

/// Built-in one-ply material search.
///
/// Prefers the highest-value capture or promotion; lower difficulties
/// replace the choice with a uniform-random legal move part of the time.
#[derive(Debug)]
pub struct MaterialSearch {
    rng: SmallRng,
}

impl MaterialSearch {
    /// Creates the default backend.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    fn random_chance(difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => 0.7,
            Difficulty::Medium => 0.3,
            Difficulty::Hard => 0.0,
        }
    }
}

impl Default for MaterialSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBackend for MaterialSearch {
    fn best_move(&mut self, fen: &str, difficulty: Difficulty) -> Result<String, SearchError> {
        let parsed: Fen = fen
            .parse()
            .map_err(|e| SearchError::new(format!("bad FEN: {e}")))?;
        let pos: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| SearchError::new(format!("illegal position: {e}")))?;

        let legal = pos.legal_moves();
        if legal.is_empty() {
            return Err(SearchError::new("no legal moves"));
        }

        let chosen = if self.rng.random_bool(Self::random_chance(difficulty)) {
            legal
                .choose(&mut self.rng)
                .cloned()
                .ok_or_else(|| SearchError::new("no legal moves"))?
        } else {
            let mut best: Option<(&Move, i32)> = None;
            for m in &legal {
                let score = move_score(m);
                if best.is_none_or(|(_, s)| score > s) {
                    best = Some((m, score));
                }
            }
            best.map(|(m, _)| m.clone())
                .ok_or_else(|| SearchError::new("no legal moves"))?
        };

        let uci = chosen.to_uci(CastlingMode::Standard).to_string();
        debug!(%uci, %difficulty, "material search picked move");
        Ok(uci)
    }
}

fn move_score(m: &Move) -> i32 {
    let capture = m.capture().map_or(0, role_value);
    let promotion = m.promotion().map_or(0, |r| role_value(r) - 1);
    capture + promotion
}

fn role_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 1,
        Role::Knight | Role::Bishop => 3,
        Role::Rook => 5,
        Role::Queen => 9,
        // Kings are never captured; scored for promotion symmetry only.
        Role::King => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn produces_legal_uci_from_start() {
        let mut backend = MaterialSearch::new();
        let uci = backend.best_move(START_FEN, Difficulty::Hard).unwrap();
        assert!(uci.len() == 4 || uci.len() == 5, "unexpected uci: {uci}");
    }

    #[test]
    fn prefers_the_hanging_queen() {
        // White pawn on d4 can take the queen on e5.
        let fen = "k7/8/8/4q3/3P4/8/8/K7 w - - 0 1";
        let mut backend = MaterialSearch::new();
        let uci = backend.best_move(fen, Difficulty::Hard).unwrap();
        assert_eq!(uci, "d4e5");
    }

    #[test]
    fn rejects_malformed_fen() {
        let mut backend = MaterialSearch::new();
        assert!(backend.best_move("not a fen", Difficulty::Easy).is_err());
    }
}
