//! Tic-tac-toe engine: board, win detection, and a tiered AI.

mod ai;
mod engine;
mod types;

pub use ai::{HeuristicSelector, MinimaxSelector, MoveSelector, selector_for};
pub use engine::{MoveError, TicTacToeSession};
pub use types::{Board, Cell, LINES, Mark};
