//! Integration tests for the ludo turn state machine, movement zones,
//! capture rules, and the greedy AI.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wakti_games::Outcome;
use wakti_games::games::ludo::{
    AiError, ConfigError, Controller, LudoColor, LudoConfig, LudoSession, MoveError, PawnId,
    PawnZone, RollError, TurnPhase, ai_take_turn, greedy_choice,
};

fn red(index: u8) -> PawnId {
    PawnId {
        color: LudoColor::Red,
        index,
    }
}

fn blue(index: u8) -> PawnId {
    PawnId {
        color: LudoColor::Blue,
        index,
    }
}

fn red_vs_blue() -> LudoSession {
    LudoSession::new(LudoConfig {
        seats: vec![
            (LudoColor::Red, Controller::Human),
            (LudoColor::Blue, Controller::Computer),
        ],
    })
    .expect("two distinct seats are valid")
}

#[test]
fn configs_need_at_least_two_distinct_colors() {
    assert_eq!(
        LudoSession::new(LudoConfig { seats: vec![] }).unwrap_err(),
        ConfigError::TooFewColors
    );
    assert_eq!(
        LudoSession::new(LudoConfig {
            seats: vec![(LudoColor::Red, Controller::Human)],
        })
        .unwrap_err(),
        ConfigError::TooFewColors
    );
    assert_eq!(
        LudoSession::new(LudoConfig {
            seats: vec![
                (LudoColor::Red, Controller::Human),
                (LudoColor::Red, Controller::Computer),
            ],
        })
        .unwrap_err(),
        ConfigError::DuplicateColor
    );
}

#[test]
fn low_rolls_never_free_private_pawns() {
    for value in 1..=5 {
        let mut game = red_vs_blue();
        let roll = game.roll_with(value).unwrap();
        assert!(roll.turn_passed, "value {value} freed a private pawn");
        assert!(roll.eligible.is_empty());
        assert_eq!(roll.value, value);
        // The roll is consumed and the turn passes on.
        assert_eq!(game.active_color(), LudoColor::Blue);
        assert!(game.pawns().iter().all(|p| p.zone == PawnZone::Private));
    }
}

#[test]
fn a_six_brings_a_pawn_onto_the_entry_cell() {
    let mut game = red_vs_blue();
    let roll = game.roll_with(6).unwrap();
    assert_eq!(roll.eligible.len(), 4);

    let report = game.apply_move(red(1)).unwrap();
    assert_eq!(report.zone, PawnZone::Track { traveled: 0 });
    assert!(report.extra_turn);
    assert_eq!(game.pawn(red(1)).unwrap().track_cell(), Some(1));
    // The 6 keeps the seat active.
    assert_eq!(game.active_color(), LudoColor::Red);
    assert_eq!(game.phase(), &TurnPhase::AwaitingRoll);
}

#[test]
fn consecutive_sixes_keep_the_same_seat() {
    let mut game = red_vs_blue();
    for _ in 0..20 {
        let roll = game.roll_with(6).unwrap();
        if !roll.turn_passed {
            game.apply_move(roll.eligible[0]).unwrap();
        }
        assert_eq!(game.active_color(), LudoColor::Red);
    }
}

#[test]
fn die_values_outside_the_cube_are_rejected() {
    let mut game = red_vs_blue();
    assert_eq!(game.roll_with(0), Err(RollError::InvalidDie));
    assert_eq!(game.roll_with(7), Err(RollError::InvalidDie));
}

#[test]
fn turn_phases_gate_rolls_and_moves() {
    let mut game = red_vs_blue();
    assert_eq!(game.apply_move(red(1)), Err(MoveError::NoPendingRoll));

    game.roll_with(6).unwrap();
    assert_eq!(game.roll_with(3), Err(RollError::MoveAwaited));
    assert_eq!(
        game.apply_move(PawnId {
            color: LudoColor::Green,
            index: 1,
        }),
        Err(MoveError::UnknownPawn)
    );
}

#[test]
fn ineligible_pawns_are_rejected_without_board_changes() {
    let mut game = red_vs_blue();
    game.set_pawn_zone(red(1), PawnZone::Track { traveled: 0 });

    let roll = game.roll_with(3).unwrap();
    assert_eq!(roll.eligible, vec![red(1)]);
    assert_eq!(game.apply_move(red(2)), Err(MoveError::NotEligible));
    assert_eq!(game.pawn(red(2)).unwrap().zone, PawnZone::Private);
    // The pending roll survives the rejection.
    assert!(matches!(game.phase(), TurnPhase::AwaitingMove { value: 3, .. }));
}

#[test]
fn track_end_crosses_into_the_stretch() {
    let mut game = red_vs_blue();
    game.set_pawn_zone(red(1), PawnZone::Track { traveled: 51 });
    game.roll_with(4).unwrap();
    let report = game.apply_move(red(1)).unwrap();
    assert_eq!(report.zone, PawnZone::Stretch { slot: 4 });

    let mut game = red_vs_blue();
    game.set_pawn_zone(red(1), PawnZone::Track { traveled: 50 });
    game.roll_with(6).unwrap();
    let report = game.apply_move(red(1)).unwrap();
    assert_eq!(report.zone, PawnZone::Stretch { slot: 5 });

    // The furthest track cell plus a 6 lands exactly home.
    let mut game = red_vs_blue();
    game.set_pawn_zone(red(1), PawnZone::Track { traveled: 51 });
    game.roll_with(6).unwrap();
    let report = game.apply_move(red(1)).unwrap();
    assert_eq!(report.zone, PawnZone::Home);
}

#[test]
fn stretch_pawns_need_an_exact_landing() {
    let mut game = red_vs_blue();
    game.set_pawn_zone(red(1), PawnZone::Stretch { slot: 2 });
    game.roll_with(4).unwrap();
    let report = game.apply_move(red(1)).unwrap();
    assert_eq!(report.zone, PawnZone::Home);

    // An overshooting value leaves the stretch pawn ineligible.
    let mut game = red_vs_blue();
    game.set_pawn_zone(red(1), PawnZone::Stretch { slot: 2 });
    let roll = game.roll_with(5).unwrap();
    assert!(roll.turn_passed);
    assert_eq!(game.pawn(red(1)).unwrap().zone, PawnZone::Stretch { slot: 2 });
}

#[test]
fn landing_on_an_opponent_captures_it() {
    let mut game = red_vs_blue();
    // Red will land on cell 5; blue already stands there (40 + 17 wraps to 5).
    game.set_pawn_zone(red(1), PawnZone::Track { traveled: 2 });
    game.set_pawn_zone(blue(1), PawnZone::Track { traveled: 17 });
    assert_eq!(game.pawn(blue(1)).unwrap().track_cell(), Some(5));

    game.roll_with(2).unwrap();
    let report = game.apply_move(red(1)).unwrap();
    assert_eq!(game.pawn(red(1)).unwrap().track_cell(), Some(5));
    assert_eq!(report.captured, vec![blue(1)]);
    assert_eq!(game.pawn(blue(1)).unwrap().zone, PawnZone::Private);
}

#[test]
fn safe_cells_shelter_opposing_pawns() {
    let mut game = red_vs_blue();
    // Cell 9 is a star cell; both pawns may share it.
    game.set_pawn_zone(red(1), PawnZone::Track { traveled: 6 });
    game.set_pawn_zone(blue(1), PawnZone::Track { traveled: 21 });
    assert_eq!(game.pawn(blue(1)).unwrap().track_cell(), Some(9));

    game.roll_with(2).unwrap();
    let report = game.apply_move(red(1)).unwrap();
    assert_eq!(game.pawn(red(1)).unwrap().track_cell(), Some(9));
    assert!(report.captured.is_empty());
    assert_eq!(
        game.pawn(blue(1)).unwrap().zone,
        PawnZone::Track { traveled: 21 }
    );
}

#[test]
fn own_pawns_are_never_captured() {
    let mut game = red_vs_blue();
    game.set_pawn_zone(red(1), PawnZone::Track { traveled: 2 });
    game.set_pawn_zone(red(2), PawnZone::Track { traveled: 4 });

    game.roll_with(2).unwrap();
    let report = game.apply_move(red(1)).unwrap();
    assert!(report.captured.is_empty());
    assert_eq!(
        game.pawn(red(2)).unwrap().zone,
        PawnZone::Track { traveled: 4 }
    );
}

#[test]
fn three_pawns_home_is_not_a_win() {
    let mut game = red_vs_blue();
    for index in 1..=3 {
        game.set_pawn_zone(red(index), PawnZone::Home);
    }
    game.set_pawn_zone(red(4), PawnZone::Track { traveled: 51 });
    assert_eq!(game.outcome(), Outcome::InProgress);

    game.roll_with(6).unwrap();
    let report = game.apply_move(red(4)).unwrap();
    assert_eq!(report.zone, PawnZone::Home);
    assert_eq!(report.outcome, Outcome::Won(LudoColor::Red));
    // Winning on a 6 grants no extra turn; the game is over.
    assert!(!report.extra_turn);
    assert_eq!(game.roll_with(3), Err(RollError::GameOver));
    assert_eq!(game.apply_move(red(4)), Err(MoveError::GameOver));
}

#[test]
fn one_vs_three_seats_the_human_first() {
    let config = LudoConfig::one_vs_three(LudoColor::Blue);
    assert_eq!(config.seats.len(), 4);
    assert_eq!(config.seats[0], (LudoColor::Blue, Controller::Human));
    assert!(
        config.seats[1..]
            .iter()
            .all(|(_, c)| *c == Controller::Computer)
    );

    let mut game = LudoSession::new(config).unwrap();
    assert_eq!(game.active_color(), LudoColor::Blue);
    game.roll_with(6).unwrap();
    game.apply_move(blue(1)).unwrap();
    // Blue enters on its own entry cell, not red's.
    assert_eq!(game.pawn(blue(1)).unwrap().track_cell(), Some(40));
}

#[test]
fn greedy_ai_prefers_freeing_a_pawn_on_six() {
    let mut game = red_vs_blue();
    game.set_pawn_zone(red(1), PawnZone::Track { traveled: 10 });
    game.roll_with(6).unwrap();
    assert_eq!(greedy_choice(&game), Some(red(2)));
}

#[test]
fn greedy_ai_pushes_the_deepest_stretch_pawn() {
    let mut game = red_vs_blue();
    game.set_pawn_zone(red(1), PawnZone::Stretch { slot: 2 });
    game.set_pawn_zone(red(2), PawnZone::Stretch { slot: 4 });
    game.set_pawn_zone(red(3), PawnZone::Track { traveled: 30 });
    game.set_pawn_zone(red(4), PawnZone::Home);
    game.roll_with(2).unwrap();
    assert_eq!(greedy_choice(&game), Some(red(2)));
}

#[test]
fn greedy_ai_pushes_the_furthest_track_pawn() {
    let mut game = red_vs_blue();
    game.set_pawn_zone(red(1), PawnZone::Track { traveled: 10 });
    game.set_pawn_zone(red(2), PawnZone::Track { traveled: 40 });
    game.roll_with(3).unwrap();
    assert_eq!(greedy_choice(&game), Some(red(2)));
}

#[test]
fn greedy_choice_requires_a_pending_roll() {
    let game = red_vs_blue();
    assert_eq!(greedy_choice(&game), None);
}

#[test]
fn ai_refuses_to_drive_a_human_seat() {
    let mut game = red_vs_blue();
    let mut rng = SmallRng::seed_from_u64(3);
    assert_eq!(ai_take_turn(&mut game, &mut rng), Err(AiError::NotComputerTurn));
}

#[test]
fn ai_drives_a_computer_seat_to_a_legal_turn() {
    let mut game = red_vs_blue();
    let mut rng = SmallRng::seed_from_u64(3);
    // Pass red's turn with a low roll so blue (computer) is active.
    game.roll_with(1).unwrap();
    assert_eq!(game.active_controller(), Controller::Computer);

    let turn = ai_take_turn(&mut game, &mut rng).unwrap();
    assert_eq!(turn.roll.color, LudoColor::Blue);
    if let Some(moved) = &turn.moved {
        assert_eq!(moved.pawn.color, LudoColor::Blue);
    }
    assert_eq!(game.phase(), &TurnPhase::AwaitingRoll);
}

#[test]
fn four_computer_seats_play_to_completion() {
    let mut game = LudoSession::new(LudoConfig {
        seats: vec![
            (LudoColor::Red, Controller::Computer),
            (LudoColor::Green, Controller::Computer),
            (LudoColor::Yellow, Controller::Computer),
            (LudoColor::Blue, Controller::Computer),
        ],
    })
    .unwrap();
    let mut rng = SmallRng::seed_from_u64(0xd1ce);

    for _ in 0..100_000 {
        if game.outcome().is_over() {
            break;
        }
        ai_take_turn(&mut game, &mut rng).unwrap();
    }

    let Outcome::Won(winner) = game.outcome() else {
        panic!("game did not finish");
    };
    assert!(
        game.pawns()
            .iter()
            .filter(|p| p.id.color == winner)
            .all(|p| p.zone == PawnZone::Home)
    );
}

#[test]
fn session_survives_a_serde_round_trip() {
    let mut game = red_vs_blue();
    game.roll_with(6).unwrap();
    game.apply_move(red(1)).unwrap();
    game.roll_with(3).unwrap();

    let json = game.to_json().unwrap();
    let restored = LudoSession::from_json(&json).unwrap();
    assert_eq!(restored.pawns(), game.pawns());
    assert_eq!(restored.phase(), game.phase());
    assert_eq!(restored.active_color(), game.active_color());
    assert_eq!(restored.outcome(), game.outcome());
}
