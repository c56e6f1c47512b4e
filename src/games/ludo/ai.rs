//! Greedy move selection for computer-controlled ludo colors.
//!
//! No lookahead: bring a pawn out on a 6, otherwise push the stretch
//! pawn closest to home, otherwise the track pawn that has traveled
//! furthest.

use super::engine::{LudoSession, MoveError, MoveReport, RollError, RollReport, TurnPhase};
use super::types::{Controller, PawnId, PawnZone};
use derive_more::{Display, Error};
use rand::Rng;
use tracing::instrument;

/// Errors from driving an AI turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum AiError {
    /// The active seat is human-controlled.
    #[display("active seat is not computer-controlled")]
    NotComputerTurn,
    /// The roll was rejected.
    #[display("roll rejected: {_0}")]
    Roll(RollError),
    /// The chosen move was rejected.
    #[display("move rejected: {_0}")]
    Move(MoveError),
}

/// One completed AI turn: the roll, and the move when one was possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiTurnReport {
    /// The dice roll.
    pub roll: RollReport,
    /// The applied move, absent on a forced skip.
    pub moved: Option<MoveReport>,
}

/// Picks the greedy pawn for the pending roll, if a move is pending.
pub fn greedy_choice(session: &LudoSession) -> Option<PawnId> {
    let TurnPhase::AwaitingMove { value, eligible } = session.phase() else {
        return None;
    };

    // (1) A 6 brings a pawn out of the private yard.
    if *value == 6
        && let Some(id) = eligible.iter().find(|id| {
            matches!(session.pawn(**id).map(|p| p.zone), Some(PawnZone::Private))
        })
    {
        return Some(*id);
    }

    // (2) The stretch pawn closest to home.
    let stretch = eligible
        .iter()
        .filter_map(|id| match session.pawn(*id).map(|p| p.zone) {
            Some(PawnZone::Stretch { slot }) => Some((*id, slot)),
            _ => None,
        })
        .max_by_key(|&(_, slot)| slot);
    if let Some((id, _)) = stretch {
        return Some(id);
    }

    // (3) The track pawn with the greatest distance already traveled.
    let track = eligible
        .iter()
        .filter_map(|id| match session.pawn(*id).map(|p| p.zone) {
            Some(PawnZone::Track { traveled }) => Some((*id, traveled)),
            _ => None,
        })
        .max_by_key(|&(_, traveled)| traveled);
    if let Some((id, _)) = track {
        return Some(id);
    }

    eligible.first().copied()
}

/// Rolls and moves for the active computer seat. One call handles one
/// roll; on a 6 the same color stays active and the caller loops.
#[instrument(skip(session, rng))]
pub fn ai_take_turn<R: Rng>(
    session: &mut LudoSession,
    rng: &mut R,
) -> Result<AiTurnReport, AiError> {
    if session.active_controller() != Controller::Computer {
        return Err(AiError::NotComputerTurn);
    }
    let roll = session.roll_dice(rng).map_err(AiError::Roll)?;
    if roll.turn_passed {
        return Ok(AiTurnReport { roll, moved: None });
    }
    let pawn = greedy_choice(session).ok_or(AiError::Move(MoveError::NoPendingRoll))?;
    let moved = session.apply_move(pawn).map_err(AiError::Move)?;
    Ok(AiTurnReport {
        roll,
        moved: Some(moved),
    })
}
