//! Session controller and turn state machine for ludo.

use super::types::{
    ConfigError, Controller, HOME_TRAVEL, LAST_TRACK_TRAVEL, LudoColor, LudoConfig, Pawn, PawnId,
    PawnZone, SAFE_CELLS,
};
use crate::games::contract::Outcome;
use derive_more::{Display, Error};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Errors reported when a dice roll is not allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum RollError {
    /// The game already ended.
    #[display("game is already over")]
    GameOver,
    /// The previous roll has not been consumed by a move yet.
    #[display("a move is still pending for the last roll")]
    MoveAwaited,
    /// Die value outside 1..=6 (deterministic variant only).
    #[display("die value must be between 1 and 6")]
    InvalidDie,
}

/// Errors reported when a pawn move cannot be applied. The board is left
/// untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The game already ended.
    #[display("game is already over")]
    GameOver,
    /// No roll is pending; roll the dice first.
    #[display("roll the dice before moving")]
    NoPendingRoll,
    /// The pawn does not belong to this game.
    #[display("unknown pawn")]
    UnknownPawn,
    /// The pawn is not in the eligible set for the pending roll.
    #[display("pawn is not eligible for this roll")]
    NotEligible,
}

/// Phase of the active color's turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnPhase {
    /// Waiting for the active color to roll.
    AwaitingRoll,
    /// A roll happened and a pawn must be chosen from the eligible set.
    AwaitingMove {
        /// The rolled die value.
        value: u8,
        /// Pawns that may legally move with this value.
        eligible: Vec<PawnId>,
    },
}

/// Result of a dice roll, for the UI to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollReport {
    /// The color that rolled.
    pub color: LudoColor,
    /// The die value, always shown even on a forced skip.
    pub value: u8,
    /// Pawns that may move with this roll.
    pub eligible: Vec<PawnId>,
    /// True when no pawn was eligible and the turn passed on.
    pub turn_passed: bool,
}

/// Result of an applied pawn move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// The pawn that moved.
    pub pawn: PawnId,
    /// Where the pawn ended up.
    pub zone: PawnZone,
    /// Opposing pawns captured by the landing, sent back to private.
    pub captured: Vec<PawnId>,
    /// True when the mover rolled a 6 and rolls again.
    pub extra_turn: bool,
    /// Game result after the move.
    pub outcome: Outcome<LudoColor>,
}

/// A seat at the board: a color and who controls it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// The seat's color.
    pub color: LudoColor,
    /// The seat's controller.
    pub controller: Controller,
}

/// A four-color ludo game.
///
/// The session owns the board exclusively. Pawns live in one of four
/// zones; the turn state machine alternates between awaiting a roll and
/// awaiting a move, rotating seats unless a 6 grants an extra turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LudoSession {
    seats: Vec<Seat>,
    pawns: Vec<Pawn>,
    turn: usize,
    phase: TurnPhase,
    outcome: Outcome<LudoColor>,
}

impl LudoSession {
    /// Starts a game with all pawns in their private yards. Rejects
    /// configurations with fewer than two colors or duplicate seats.
    #[instrument(skip(config))]
    pub fn new(config: LudoConfig) -> Result<Self, ConfigError> {
        if config.seats.len() < 2 {
            warn!(seats = config.seats.len(), "rejecting ludo config");
            return Err(ConfigError::TooFewColors);
        }
        let mut seen = HashSet::new();
        if !config.seats.iter().all(|(color, _)| seen.insert(*color)) {
            return Err(ConfigError::DuplicateColor);
        }

        let seats: Vec<Seat> = config
            .seats
            .into_iter()
            .map(|(color, controller)| Seat { color, controller })
            .collect();
        let pawns = seats
            .iter()
            .flat_map(|seat| {
                (1..=4).map(|index| Pawn {
                    id: PawnId {
                        color: seat.color,
                        index,
                    },
                    zone: PawnZone::Private,
                })
            })
            .collect();

        info!(seats = seats.len(), "starting ludo session");
        Ok(Self {
            seats,
            pawns,
            turn: 0,
            phase: TurnPhase::AwaitingRoll,
            outcome: Outcome::InProgress,
        })
    }

    /// Rolls the dice for the active color.
    pub fn roll_dice<R: Rng>(&mut self, rng: &mut R) -> Result<RollReport, RollError> {
        if self.outcome.is_over() {
            return Err(RollError::GameOver);
        }
        if !matches!(self.phase, TurnPhase::AwaitingRoll) {
            return Err(RollError::MoveAwaited);
        }
        let value = rng.random_range(1..=6);
        self.roll_with(value)
    }

    /// Deterministic roll with a known die value, for replays and tests.
    #[instrument(skip(self))]
    pub fn roll_with(&mut self, value: u8) -> Result<RollReport, RollError> {
        if self.outcome.is_over() {
            return Err(RollError::GameOver);
        }
        if !matches!(self.phase, TurnPhase::AwaitingRoll) {
            return Err(RollError::MoveAwaited);
        }
        if !(1..=6).contains(&value) {
            return Err(RollError::InvalidDie);
        }

        let color = self.active_color();
        let eligible: Vec<PawnId> = self
            .pawns
            .iter()
            .filter(|p| p.id.color == color && zone_eligible(p.zone, value))
            .map(|p| p.id)
            .collect();

        let turn_passed = eligible.is_empty();
        if turn_passed {
            debug!(%color, value, "no eligible pawn, turn passes");
            // A 6 still grants the extra roll even when nothing can move.
            self.advance_turn(value == 6);
        } else {
            self.phase = TurnPhase::AwaitingMove {
                value,
                eligible: eligible.clone(),
            };
        }
        Ok(RollReport {
            color,
            value,
            eligible,
            turn_passed,
        })
    }

    /// Moves a pawn using the pending roll. The pawn must be in the
    /// eligible set; rejections leave the board untouched.
    #[instrument(skip(self), fields(pawn = %pawn_id))]
    pub fn apply_move(&mut self, pawn_id: PawnId) -> Result<MoveReport, MoveError> {
        if self.outcome.is_over() {
            return Err(MoveError::GameOver);
        }
        let (value, eligible) = match &self.phase {
            TurnPhase::AwaitingMove { value, eligible } => (*value, eligible),
            TurnPhase::AwaitingRoll => return Err(MoveError::NoPendingRoll),
        };
        if !self.pawns.iter().any(|p| p.id == pawn_id) {
            return Err(MoveError::UnknownPawn);
        }
        if !eligible.contains(&pawn_id) {
            debug!(value, "ineligible pawn rejected");
            return Err(MoveError::NotEligible);
        }

        let index = self
            .pawns
            .iter()
            .position(|p| p.id == pawn_id)
            .ok_or(MoveError::UnknownPawn)?;
        let zone = advance_zone(self.pawns[index].zone, value);
        self.pawns[index].zone = zone;
        debug!(?zone, value, "pawn moved");

        let captured = self.capture_at(index);
        let outcome = self.check_win(pawn_id.color);
        let extra_turn = value == 6 && !outcome.is_over();
        if !outcome.is_over() {
            self.advance_turn(value == 6);
        } else {
            self.phase = TurnPhase::AwaitingRoll;
        }

        Ok(MoveReport {
            pawn: pawn_id,
            zone,
            captured,
            extra_turn,
            outcome,
        })
    }

    /// Sends opposing pawns sharing the moved pawn's non-safe track cell
    /// back to their private yards.
    fn capture_at(&mut self, mover: usize) -> Vec<PawnId> {
        let Some(cell) = self.pawns[mover].track_cell() else {
            return Vec::new();
        };
        if SAFE_CELLS.contains(&cell) {
            return Vec::new();
        }
        let mover_color = self.pawns[mover].id.color;
        let mut captured = Vec::new();
        for pawn in &mut self.pawns {
            if pawn.id.color != mover_color && pawn.track_cell() == Some(cell) {
                info!(victim = %pawn.id, cell, "pawn captured");
                pawn.zone = PawnZone::Private;
                captured.push(pawn.id);
            }
        }
        captured
    }

    fn check_win(&mut self, color: LudoColor) -> Outcome<LudoColor> {
        let all_home = self
            .pawns
            .iter()
            .filter(|p| p.id.color == color)
            .all(|p| p.zone == PawnZone::Home);
        if all_home {
            info!(winner = %color, "ludo game won");
            self.outcome = Outcome::Won(color);
        }
        self.outcome
    }

    fn advance_turn(&mut self, rolled_six: bool) {
        if !rolled_six {
            self.turn = (self.turn + 1) % self.seats.len();
        }
        self.phase = TurnPhase::AwaitingRoll;
    }

    /// The color whose turn it is.
    pub fn active_color(&self) -> LudoColor {
        self.seats[self.turn].color
    }

    /// The controller of the active seat.
    pub fn active_controller(&self) -> Controller {
        self.seats[self.turn].controller
    }

    /// All seats in turn order.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Current phase of the active turn.
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    /// All pawns on the board.
    pub fn pawns(&self) -> &[Pawn] {
        &self.pawns
    }

    /// Looks up a single pawn.
    pub fn pawn(&self, id: PawnId) -> Option<&Pawn> {
        self.pawns.iter().find(|p| p.id == id)
    }

    /// Game result so far.
    pub fn outcome(&self) -> Outcome<LudoColor> {
        self.outcome
    }

    /// Serializes the session for external persistence.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Restores a session previously produced by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Overrides a pawn's zone. Test scaffolding for reaching deep board
    /// states without replaying whole games.
    #[doc(hidden)]
    pub fn set_pawn_zone(&mut self, id: PawnId, zone: PawnZone) {
        if let Some(pawn) = self.pawns.iter_mut().find(|p| p.id == id) {
            pawn.zone = zone;
        }
    }
}

/// Whether a pawn in `zone` may move with die value `value`.
fn zone_eligible(zone: PawnZone, value: u8) -> bool {
    match zone {
        PawnZone::Private => value == 6,
        // Track pawns can always move: the furthest cell plus a 6 lands
        // exactly home, so overshoot is impossible on the track.
        PawnZone::Track { .. } => true,
        PawnZone::Stretch { slot } => slot + value <= 6,
        PawnZone::Home => false,
    }
}

/// Advances a zone by a die value. Callers check eligibility first.
fn advance_zone(zone: PawnZone, value: u8) -> PawnZone {
    match zone {
        PawnZone::Private => PawnZone::Track { traveled: 0 },
        PawnZone::Track { traveled } => {
            let next = traveled + value;
            if next <= LAST_TRACK_TRAVEL {
                PawnZone::Track { traveled: next }
            } else if next == HOME_TRAVEL {
                PawnZone::Home
            } else {
                PawnZone::Stretch {
                    slot: next - LAST_TRACK_TRAVEL,
                }
            }
        }
        PawnZone::Stretch { slot } => {
            if slot + value == 6 {
                PawnZone::Home
            } else {
                PawnZone::Stretch { slot: slot + value }
            }
        }
        PawnZone::Home => PawnZone::Home,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_advance_stays_on_track() {
        assert_eq!(
            advance_zone(PawnZone::Track { traveled: 10 }, 4),
            PawnZone::Track { traveled: 14 }
        );
    }

    #[test]
    fn overflow_boundary_lands_home() {
        // Last track cell plus a 6 crosses the whole stretch exactly.
        assert_eq!(advance_zone(PawnZone::Track { traveled: 51 }, 6), PawnZone::Home);
        assert_eq!(
            advance_zone(PawnZone::Track { traveled: 51 }, 4),
            PawnZone::Stretch { slot: 4 }
        );
        assert_eq!(
            advance_zone(PawnZone::Track { traveled: 50 }, 6),
            PawnZone::Stretch { slot: 5 }
        );
    }

    #[test]
    fn stretch_needs_exact_landing() {
        assert_eq!(advance_zone(PawnZone::Stretch { slot: 2 }, 4), PawnZone::Home);
        assert_eq!(
            advance_zone(PawnZone::Stretch { slot: 2 }, 3),
            PawnZone::Stretch { slot: 5 }
        );
        assert!(!zone_eligible(PawnZone::Stretch { slot: 3 }, 4));
        assert!(zone_eligible(PawnZone::Stretch { slot: 3 }, 3));
    }
}
