//! Command-line interface for the Game Mode demo binary.

use clap::{Parser, Subcommand, ValueEnum};
use wakti_games::Difficulty;
use wakti_games::games::chess::Color;
use wakti_games::games::ludo::LudoColor;
use wakti_games::games::tictactoe::Mark;

/// WAKTI Game Mode - play the embedded engines in a terminal
#[derive(Parser, Debug)]
#[command(name = "wakti_games")]
#[command(about = "Terminal front-end for the Game Mode engines", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available games
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play tic-tac-toe against the AI
    Tictactoe {
        /// AI difficulty
        #[arg(short, long, default_value = "medium")]
        difficulty: DifficultyArg,

        /// Your mark (X moves first)
        #[arg(short, long, default_value = "x")]
        mark: MarkArg,
    },

    /// Play chess against the background search engine
    Chess {
        /// AI difficulty (scales the search timeout)
        #[arg(short, long, default_value = "medium")]
        difficulty: DifficultyArg,

        /// Your color
        #[arg(short, long, default_value = "white")]
        color: ColorArg,
    },

    /// Play ludo against three computer seats
    Ludo {
        /// Your color
        #[arg(short, long, default_value = "red")]
        color: LudoColorArg,
    },
}

/// Difficulty tier flag.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DifficultyArg {
    /// Weak play.
    Easy,
    /// Mostly-optimal play.
    Medium,
    /// Strongest play.
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

/// Tic-tac-toe mark flag.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MarkArg {
    /// Play X (first move).
    X,
    /// Play O (second move).
    O,
}

impl From<MarkArg> for Mark {
    fn from(arg: MarkArg) -> Self {
        match arg {
            MarkArg::X => Mark::X,
            MarkArg::O => Mark::O,
        }
    }
}

/// Chess color flag.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorArg {
    /// Play the white pieces.
    White,
    /// Play the black pieces.
    Black,
}

impl From<ColorArg> for Color {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::White => Color::White,
            ColorArg::Black => Color::Black,
        }
    }
}

/// Ludo color flag.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LudoColorArg {
    /// Red seat.
    Red,
    /// Green seat.
    Green,
    /// Yellow seat.
    Yellow,
    /// Blue seat.
    Blue,
}

impl From<LudoColorArg> for LudoColor {
    fn from(arg: LudoColorArg) -> Self {
        match arg {
            LudoColorArg::Red => LudoColor::Red,
            LudoColorArg::Green => LudoColor::Green,
            LudoColorArg::Yellow => LudoColor::Yellow,
            LudoColorArg::Blue => LudoColor::Blue,
        }
    }
}
