//! Core domain types for the ludo board.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Number of cells on the shared outer track.
pub const TRACK_LEN: u8 = 52;

/// Number of slots in each color's home stretch.
pub const STRETCH_LEN: u8 = 5;

/// Traveled count of the last outer-track cell (the cell just before
/// the color's own entry). One more step crosses into the stretch.
pub(crate) const LAST_TRACK_TRAVEL: u8 = 51;

/// Traveled count that lands a pawn exactly home.
pub(crate) const HOME_TRAVEL: u8 = LAST_TRACK_TRAVEL + STRETCH_LEN + 1;

/// Outer-track cells where captures cannot occur: the four entry cells
/// plus the four star cells.
pub const SAFE_CELLS: [u8; 8] = [1, 9, 14, 22, 27, 35, 40, 48];

/// The four pawn colors, in canonical board order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LudoColor {
    /// Red, entering the track at cell 1.
    Red,
    /// Green, entering at cell 14.
    Green,
    /// Yellow, entering at cell 27.
    Yellow,
    /// Blue, entering at cell 40.
    Blue,
}

impl LudoColor {
    /// The fixed outer-track cell where this color's pawns enter.
    pub fn entry_cell(self) -> u8 {
        match self {
            LudoColor::Red => 1,
            LudoColor::Green => 14,
            LudoColor::Yellow => 27,
            LudoColor::Blue => 40,
        }
    }
}

/// Identity of one of a color's four pawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{color}-{index}")]
pub struct PawnId {
    /// The pawn's color.
    pub color: LudoColor,
    /// Index within the color, 1 through 4.
    pub index: u8,
}

/// A pawn's coarse location plus position within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PawnZone {
    /// Waiting in the color's private yard. Leaves only on a 6.
    Private,
    /// On the shared outer track, `traveled` cells past the entry
    /// (0 through 51).
    Track {
        /// Cells traveled since entering, 0..=51.
        traveled: u8,
    },
    /// In the color's private home stretch, slot 1 through 5.
    Stretch {
        /// Stretch slot, 1..=5.
        slot: u8,
    },
    /// Finished. Terminal for the pawn.
    Home,
}

/// A pawn and where it stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pawn {
    /// The pawn's identity.
    pub id: PawnId,
    /// The pawn's current zone.
    pub zone: PawnZone,
}

impl Pawn {
    /// Absolute outer-track cell (1..=52), when the pawn is on the track.
    pub fn track_cell(&self) -> Option<u8> {
        match self.zone {
            PawnZone::Track { traveled } => {
                Some((self.id.color.entry_cell() - 1 + traveled) % TRACK_LEN + 1)
            }
            _ => None,
        }
    }
}

/// Who drives a color's moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Controller {
    /// Moves submitted by the UI.
    Human,
    /// Moves chosen by the greedy AI.
    Computer,
}

/// Game configuration: participating colors in turn order, each mapped
/// to its controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LudoConfig {
    /// Seats in turn order.
    pub seats: Vec<(LudoColor, Controller)>,
}

impl LudoConfig {
    /// Convenience: one human color, the remaining three computer-driven,
    /// in canonical order starting from the human.
    pub fn one_vs_three(human: LudoColor) -> Self {
        use strum::IntoEnumIterator;
        let mut seats: Vec<(LudoColor, Controller)> = vec![(human, Controller::Human)];
        seats.extend(
            LudoColor::iter()
                .filter(|&c| c != human)
                .map(|c| (c, Controller::Computer)),
        );
        Self { seats }
    }
}

/// Rejected configuration at game initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    /// A game needs at least two participating colors.
    #[display("at least two colors must participate")]
    TooFewColors,
    /// A color may occupy at most one seat.
    #[display("duplicate color in seat list")]
    DuplicateColor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_cell_wraps_past_fifty_two() {
        let pawn = Pawn {
            id: PawnId {
                color: LudoColor::Blue,
                index: 1,
            },
            zone: PawnZone::Track { traveled: 20 },
        };
        // Blue enters at 40; 20 cells later it has wrapped to cell 8.
        assert_eq!(pawn.track_cell(), Some(8));
    }

    #[test]
    fn entry_cells_are_safe() {
        use strum::IntoEnumIterator;
        for color in LudoColor::iter() {
            assert!(SAFE_CELLS.contains(&color.entry_cell()));
        }
    }
}
