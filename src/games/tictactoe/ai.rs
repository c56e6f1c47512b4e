//! Move-selection strategies for the tic-tac-toe AI.
//!
//! Each difficulty tier is a [`MoveSelector`] implementation so the tiers
//! can be unit-tested in isolation and swapped without touching the
//! session controller.

use super::types::{Board, Mark};
use crate::games::contract::Difficulty;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::instrument;

/// Strategy interface: given a board, pick a cell for `mark`.
pub trait MoveSelector {
    /// Returns the chosen cell index, or `None` when the board is full.
    fn select(&mut self, board: &Board, mark: Mark) -> Option<usize>;
}

/// Builds the selector for a difficulty tier.
pub fn selector_for(difficulty: Difficulty) -> Box<dyn MoveSelector> {
    match difficulty {
        Difficulty::Hard => Box::new(MinimaxSelector),
        tier => Box::new(HeuristicSelector::new(tier.optimal_chance())),
    }
}

/// Exhaustive minimax with alpha-beta pruning. Never loses.
///
/// Scores are depth-weighted: a win at depth `d` is worth `10 - d`, a
/// loss `d - 10`, so the search prefers fast wins and slow losses.
#[derive(Debug, Clone, Copy)]
pub struct MinimaxSelector;

impl MoveSelector for MinimaxSelector {
    #[instrument(skip(self, board))]
    fn select(&mut self, board: &Board, mark: Mark) -> Option<usize> {
        let mut scratch = board.clone();
        let mut best: Option<(usize, i32)> = None;
        for pos in board.empty_cells() {
            scratch.set(pos, mark);
            let score = minimax(&mut scratch, mark, mark.opponent(), 1, i32::MIN, i32::MAX);
            scratch.clear(pos);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((pos, score));
            }
        }
        best.map(|(pos, _)| pos)
    }
}

fn minimax(board: &mut Board, ai: Mark, to_move: Mark, depth: i32, mut alpha: i32, mut beta: i32) -> i32 {
    if let Some(winner) = board.winner() {
        return if winner == ai { 10 - depth } else { depth - 10 };
    }
    if board.is_full() {
        return 0;
    }

    let maximizing = to_move == ai;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for pos in board.empty_cells() {
        board.set(pos, to_move);
        let score = minimax(board, ai, to_move.opponent(), depth + 1, alpha, beta);
        board.clear(pos);
        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if beta <= alpha {
            break;
        }
    }
    best
}

/// Probabilistic heuristic ladder: win if possible, block if needed,
/// take the center, take a corner, otherwise play at random. With
/// probability `1 - optimal_chance` the ladder is skipped entirely and
/// a uniform-random legal move is played instead.
#[derive(Debug)]
pub struct HeuristicSelector<R: Rng = rand::rngs::ThreadRng> {
    optimal_chance: f64,
    rng: R,
}

impl HeuristicSelector {
    /// Creates a selector playing the ladder with the given probability.
    pub fn new(optimal_chance: f64) -> Self {
        Self {
            optimal_chance,
            rng: rand::rng(),
        }
    }
}

impl<R: Rng> HeuristicSelector<R> {
    /// Creates a selector with an explicit RNG, for deterministic tests.
    pub fn with_rng(optimal_chance: f64, rng: R) -> Self {
        Self {
            optimal_chance,
            rng,
        }
    }
}

impl<R: Rng> MoveSelector for HeuristicSelector<R> {
    #[instrument(skip(self, board))]
    fn select(&mut self, board: &Board, mark: Mark) -> Option<usize> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return None;
        }
        if self.rng.random_bool(self.optimal_chance)
            && let Some(pos) = ladder_move(board, mark, &mut self.rng)
        {
            return Some(pos);
        }
        empty.choose(&mut self.rng).copied()
    }
}

/// The deterministic part of the heuristic: win, block, center, corner.
fn ladder_move<R: Rng>(board: &Board, mark: Mark, rng: &mut R) -> Option<usize> {
    if let Some(pos) = winning_cell(board, mark) {
        return Some(pos);
    }
    if let Some(pos) = winning_cell(board, mark.opponent()) {
        return Some(pos);
    }
    if board.is_empty(4) {
        return Some(4);
    }
    let corners: Vec<usize> = [0, 2, 6, 8]
        .into_iter()
        .filter(|&pos| board.is_empty(pos))
        .collect();
    corners.choose(rng).copied()
}

/// Finds a cell that completes a line for `mark`, if one exists.
fn winning_cell(board: &Board, mark: Mark) -> Option<usize> {
    let mut scratch = board.clone();
    for pos in board.empty_cells() {
        scratch.set(pos, mark);
        let wins = scratch.winner() == Some(mark);
        scratch.clear(pos);
        if wins {
            return Some(pos);
        }
    }
    None
}
