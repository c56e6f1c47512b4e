//! Chess engine bridge: authoritative board state plus worker-based
//! search orchestration with timeout and fallback.

mod backend;
mod bridge;
mod engine;

pub use backend::{MaterialSearch, SearchBackend, SearchError};
pub use bridge::{AiMove, AiSource, ChessSession, ChessSnapshot, MoveError, SideColor};
pub use engine::{EngineError, EngineHandle, SearchCommand, SearchReply};

// Rules-engine vocabulary the UI needs for move intents.
pub use shakmaty::{Color, Role, Square};
