//! Shared turn and game-result contract for all Game Mode engines.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// AI difficulty tier, fixed for the lifetime of a session.
///
/// Each engine maps the tier onto its own strategy: tic-tac-toe scales
/// the chance of playing the heuristic ladder (and switches to full
/// minimax on `Hard`), while chess scales the search timeout granted to
/// the background engine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Weak play, short search budget.
    Easy,
    /// Mostly-optimal play, medium search budget.
    Medium,
    /// Optimal play where the engine supports it, longest search budget.
    Hard,
}

impl Difficulty {
    /// How long the chess bridge waits for the background engine before
    /// falling back to a random legal move.
    pub fn search_timeout(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(2500),
            Difficulty::Medium => Duration::from_millis(3500),
            Difficulty::Hard => Duration::from_millis(4500),
        }
    }

    /// Probability that the tic-tac-toe AI plays its heuristic ladder
    /// instead of a uniform-random legal move. `Hard` does not use this
    /// path; it always runs minimax.
    pub fn optimal_chance(self) -> f64 {
        match self {
            Difficulty::Easy => 0.3,
            Difficulty::Medium => 0.8,
            Difficulty::Hard => 1.0,
        }
    }
}

/// Result of a game from any engine, generic over the player identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome<P> {
    /// Game is ongoing.
    InProgress,
    /// Game ended with a winner.
    Won(P),
    /// Game ended with no winner.
    Draw,
}

impl<P: Copy> Outcome<P> {
    /// Returns true once the game has reached a terminal state.
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner, if the game ended decisively.
    pub fn winner(&self) -> Option<P> {
        match self {
            Outcome::Won(p) => Some(*p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_scale_with_difficulty() {
        assert!(Difficulty::Easy.search_timeout() < Difficulty::Medium.search_timeout());
        assert!(Difficulty::Medium.search_timeout() < Difficulty::Hard.search_timeout());
    }

    #[test]
    fn outcome_accessors() {
        assert!(!Outcome::<u8>::InProgress.is_over());
        assert!(Outcome::<u8>::Draw.is_over());
        assert_eq!(Outcome::Won(3u8).winner(), Some(3));
        assert_eq!(Outcome::<u8>::Draw.winner(), None);
    }
}
