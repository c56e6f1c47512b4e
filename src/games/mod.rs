//! The Game Mode engines.
//!
//! Three independent turn-based engines behind one selector. Each owns
//! its session state exclusively; the presentational layer reads
//! snapshots and submits move intents.

pub mod chess;
pub mod contract;
pub mod ludo;
pub mod tictactoe;

use serde::{Deserialize, Serialize};

/// The game chosen in the Game Mode drawer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameKind {
    /// 3x3 tic-tac-toe against a tiered AI.
    Tictactoe,
    /// Chess against the background search engine.
    Chess,
    /// Four-color ludo with computer seats.
    Ludo,
}
