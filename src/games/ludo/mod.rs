//! Ludo engine: four-color board simulation, dice-driven movement, and
//! a greedy AI for computer seats.

mod ai;
mod engine;
mod types;

pub use ai::{AiError, AiTurnReport, ai_take_turn, greedy_choice};
pub use engine::{
    LudoSession, MoveError, MoveReport, RollError, RollReport, Seat, TurnPhase,
};
pub use types::{
    ConfigError, Controller, LudoColor, LudoConfig, Pawn, PawnId, PawnZone, SAFE_CELLS,
    STRETCH_LEN, TRACK_LEN,
};
