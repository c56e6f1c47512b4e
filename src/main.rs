//! WAKTI Game Mode - terminal demo.
//!
//! Thin presentational loop over the game engines: prints snapshots,
//! reads move intents from stdin, and never touches engine internals.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wakti_games::games::chess::{ChessSession, Role, Square};
use wakti_games::games::ludo::{self, Controller, LudoConfig, LudoSession, TurnPhase};
use wakti_games::games::tictactoe::TicTacToeSession;
use wakti_games::{Difficulty, Outcome};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Tictactoe { difficulty, mark } => run_tictactoe(mark.into(), difficulty.into()),
        Command::Chess { difficulty, color } => run_chess(color.into(), difficulty.into()).await,
        Command::Ludo { color } => run_ludo(color.into()),
    }
}

fn run_tictactoe(mark: wakti_games::games::tictactoe::Mark, difficulty: Difficulty) -> Result<()> {
    info!(%mark, %difficulty, "tic-tac-toe demo starting");
    let mut game = TicTacToeSession::new(mark, difficulty);

    loop {
        println!("\n{}\n", game.board().display());
        if game.outcome().is_over() {
            break;
        }
        let line = read_line("your cell (0-8): ")?;
        let Ok(cell) = line.trim().parse::<usize>() else {
            println!("enter a number between 0 and 8");
            continue;
        };
        if let Err(e) = game.apply_move(cell) {
            println!("move rejected: {e}");
        }
    }

    match game.outcome() {
        Outcome::Won(winner) => println!("{winner} wins!"),
        Outcome::Draw => println!("draw."),
        Outcome::InProgress => unreachable!("loop exits only on terminal outcome"),
    }
    Ok(())
}

async fn run_chess(color: wakti_games::games::chess::Color, difficulty: Difficulty) -> Result<()> {
    info!(?color, %difficulty, "chess demo starting");
    let mut game = ChessSession::start(color, difficulty);
    if game.is_degraded() {
        println!("(search engine unavailable - playing against random moves)");
    }

    loop {
        if game.outcome().is_over() {
            break;
        }
        if game.is_ai_turn() {
            let mv = game.ai_move().await?;
            println!("engine plays {} ({:?})", mv.uci, mv.source);
            continue;
        }
        println!("position: {}", game.fen());
        let line = read_line("your move (e.g. e2e4, e7e8q): ")?;
        match parse_intent(line.trim()) {
            Some((from, to, promotion)) => {
                if let Err(e) = game.apply_human_move(from, to, promotion) {
                    println!("move rejected: {e}");
                }
            }
            None => println!("moves look like e2e4 or e7e8q"),
        }
    }

    match game.outcome() {
        Outcome::Won(winner) => println!("{winner:?} wins!"),
        Outcome::Draw => println!("draw."),
        Outcome::InProgress => unreachable!("loop exits only on terminal outcome"),
    }
    Ok(())
}

/// Splits coordinate text into the from/to/promotion move intent.
fn parse_intent(text: &str) -> Option<(Square, Square, Option<Role>)> {
    let bytes = text.as_bytes();
    if !(4..=5).contains(&bytes.len()) {
        return None;
    }
    let from = Square::from_ascii(&bytes[0..2]).ok()?;
    let to = Square::from_ascii(&bytes[2..4]).ok()?;
    let promotion = if bytes.len() == 5 {
        Some(Role::from_char(bytes[4] as char)?)
    } else {
        None
    };
    Some((from, to, promotion))
}

fn run_ludo(color: ludo::LudoColor) -> Result<()> {
    info!(%color, "ludo demo starting");
    let mut game = LudoSession::new(LudoConfig::one_vs_three(color))?;
    let mut rng = rand::rng();

    while !game.outcome().is_over() {
        if game.active_controller() == Controller::Computer {
            let turn = ludo::ai_take_turn(&mut game, &mut rng)?;
            match &turn.moved {
                Some(m) => println!(
                    "{} rolled {} and moved {} to {:?}",
                    turn.roll.color, turn.roll.value, m.pawn, m.zone
                ),
                None => println!("{} rolled {} - no move", turn.roll.color, turn.roll.value),
            }
            continue;
        }

        read_line("press enter to roll... ")?;
        let roll = game.roll_dice(&mut rng)?;
        println!("you rolled {}", roll.value);
        if roll.turn_passed {
            println!("no pawn can move");
            continue;
        }

        while let TurnPhase::AwaitingMove { eligible, .. } = game.phase().clone() {
            for (i, id) in eligible.iter().enumerate() {
                let zone = game.pawn(*id).map(|p| p.zone);
                println!("  {i}: {id} ({zone:?})");
            }
            let line = read_line("pawn to move: ")?;
            let Ok(choice) = line.trim().parse::<usize>() else {
                println!("enter one of the listed numbers");
                continue;
            };
            let Some(id) = eligible.get(choice) else {
                println!("enter one of the listed numbers");
                continue;
            };
            match game.apply_move(*id) {
                Ok(report) => {
                    if !report.captured.is_empty() {
                        println!("captured: {:?}", report.captured);
                    }
                    if report.extra_turn {
                        println!("six! roll again");
                    }
                }
                Err(e) => println!("move rejected: {e}"),
            }
        }
    }

    match game.outcome() {
        Outcome::Won(winner) => println!("{winner} wins!"),
        _ => unreachable!("ludo has no draw"),
    }
    Ok(())
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line)
}
