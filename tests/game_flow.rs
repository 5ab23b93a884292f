//! Whole-game behaviour: repetition draws, engine self-play and bulk
//! population of the table from a state file.

use quadline::agent::ai::{RepetitionRule, SearchConfig, SearchContext};
use quadline::agent::{Difficulty, EnginePlayer, GameResult};
use quadline::game::Game;
use quadline::game_repr::{BoardSize, Position, PositionKey, Winner};
use quadline::orchestrator::Orchestrator;
use quadline::populate::populate_from;
use std::io::Cursor;

/// Four plies that bring the starting position back
const CYCLE: [&str; 4] = ["11E", "51W", "21W", "41E"];

fn draw_after_cycles(rule: RepetitionRule) -> Vec<bool> {
    let config = SearchConfig { repetition: Some(rule), ..SearchConfig::with_depth(1) };
    let mut game = Game::new(BoardSize::SMALL, config);
    let mut seen = Vec::new();
    for _ in 0..2 {
        for token in CYCLE {
            assert!(game.apply_token(token), "{} rejected", token);
        }
        seen.push(game.is_draw());
    }
    seen
}

#[test]
fn third_occurrence_is_a_draw() {
    assert_eq!(draw_after_cycles(RepetitionRule::SideToMove), vec![false, true]);
    assert_eq!(draw_after_cycles(RepetitionRule::IndexParity), vec![false, true]);
}

#[test]
fn rejected_tokens_leave_game_untouched() {
    let mut game = Game::new(BoardSize::SMALL, SearchConfig::with_depth(1));
    let before = game.state().clone();

    for token in ["", "11", "11EE", "11X", "51W", "11S", "99N"] {
        assert!(!game.apply_token(token), "{:?} accepted", token);
    }
    assert_eq!(game.state(), &before);
    assert_eq!(game.num_turns(), 0);
    assert_eq!(game.history().len(), 1);
}

#[test]
fn engine_self_play_ends_cleanly() {
    let mut game = Game::new(BoardSize::SMALL, SearchConfig::with_depth(3));
    game.search_mut().seed(2024);
    let white = EnginePlayer::with_difficulty(Difficulty::Depth(3));
    let black = EnginePlayer::with_difficulty(Difficulty::Depth(2));
    let mut orchestrator = Orchestrator::new(game, Box::new(white), Box::new(black)).with_max_turns(40);

    let result = orchestrator.run();
    let game = orchestrator.into_game();

    assert!(game.num_turns() <= 40);
    assert_eq!(game.history().len() as u32, game.num_turns() + 1);
    for key in game.history().keys() {
        let pos = Position::from_key(BoardSize::SMALL, *key).expect("history holds valid keys");
        assert!(pos.is_well_formed());
    }
    match result {
        GameResult::WhiteWins => assert_eq!(game.winner(), Winner::White),
        GameResult::BlackWins => assert_eq!(game.winner(), Winner::Black),
        GameResult::Draw => assert!(game.is_draw() || game.num_turns() == 40),
        GameResult::Forfeit(side) => assert!(!game.state().has_legal_moves(side)),
    }
}

#[test]
fn large_board_game_runs() {
    let game = Game::new(BoardSize::LARGE, SearchConfig::with_depth(2));
    let white = EnginePlayer::with_difficulty(Difficulty::Depth(2));
    let black = EnginePlayer::with_difficulty(Difficulty::Depth(1));
    let mut orchestrator = Orchestrator::new(game, Box::new(white), Box::new(black)).with_max_turns(6);

    orchestrator.run();
    assert!(orchestrator.game_result().is_some());
    assert!(orchestrator.game().num_turns() <= 6);
}

#[test]
fn populate_searches_valid_keys_only() {
    let start = Position::new(BoardSize::SMALL);
    let input = format!("{}\nnot-a-key 0\n{}\n", start.key(), PositionKey(u128::MAX));
    let mut ctx = SearchContext::new(SearchConfig::with_depth(3));

    let report = populate_from(&mut ctx, BoardSize::SMALL, Cursor::new(input)).unwrap();

    assert_eq!(report.searched, 1);
    assert_eq!(report.skipped, 3);
    let entry = ctx.table().get(start.key()).expect("root is stored");
    assert_eq!(entry.depth, 3);
    assert_eq!(report.undecided, ctx.table().size() - ctx.table().decided_count());
}
