//! WAKTI Game Mode engines.
//!
//! Self-contained turn-based game logic for the Game Mode drawer:
//!
//! - **Tic-tac-toe**: win detection plus a tiered AI (heuristic ladder
//!   at lower difficulties, minimax with alpha-beta pruning on hard).
//! - **Chess**: an authoritative rules-engine position bridged to a
//!   background search worker, with a timeout race and a random-move
//!   fallback so the game never stalls.
//! - **Ludo**: four-color board simulation with dice-driven zone
//!   transitions, capture rules, and a greedy AI for computer seats.
//!
//! The engines never talk to each other. Each exposes a session object
//! that owns its state; the UI reads snapshots and submits move intents.
//!
//! # Example
//!
//! ```
//! use wakti_games::{Difficulty, Outcome};
//! use wakti_games::games::tictactoe::{Mark, TicTacToeSession};
//!
//! let mut game = TicTacToeSession::new(Mark::X, Difficulty::Hard);
//! let outcome = game.apply_move(4).expect("center is free");
//! assert_eq!(outcome, Outcome::InProgress);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod games;

pub use games::GameKind;
pub use games::contract::{Difficulty, Outcome};
