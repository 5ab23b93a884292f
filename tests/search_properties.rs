//! Search-level properties checked through the public API:
//! - forced wins are found at every depth
//! - alpha-beta returns the same scores and choices as a full-width search
//! - the transposition table survives a save/load cycle unchanged

use quadline::agent::ai::{History, SearchConfig, SearchContext, TranspositionTable, WIN_SCORE};
use quadline::game_repr::{BoardSize, Move, Piece, Position, Side};

fn position(white: [(i8, i8); 4], black: [(i8, i8); 4], side: Side) -> Position {
    let to_pieces = |cells: [(i8, i8); 4]| cells.map(|(x, y)| Piece::new(x, y));
    Position::from_pieces(BoardSize::SMALL, to_pieces(white), to_pieces(black), side)
        .expect("well-formed test position")
}

/// A few plies into a game, no line for either side yet
fn middle_game() -> Position {
    position(
        [(3, 1), (5, 2), (3, 3), (5, 4)],
        [(1, 1), (1, 2), (4, 4), (2, 4)],
        Side::White,
    )
}

fn search(pos: &Position, config: SearchConfig, seed: u64) -> (Option<Move>, i32) {
    let mut pos = pos.clone();
    let mut history = History::new(pos.key());
    let mut ctx = SearchContext::new(config);
    ctx.seed(seed);
    let result = ctx.best_move(&mut pos, &mut history);
    (result.best_move, result.score)
}

#[test]
fn forced_win_found_at_every_depth() {
    // 33N completes 2-3-4 on row 2
    let white_to_win = position(
        [(2, 2), (4, 2), (3, 3), (5, 4)],
        [(1, 1), (5, 1), (1, 4), (1, 3)],
        Side::White,
    );
    // 13N completes 1-2-3 on row 2
    let black_to_win = position(
        [(1, 1), (5, 1), (5, 3), (4, 4)],
        [(2, 2), (1, 3), (3, 2), (2, 4)],
        Side::Black,
    );

    for depth in 1..=4 {
        let (mv, score) = search(&white_to_win, SearchConfig::with_depth(depth), 7);
        assert_eq!(mv, Some("33N".parse().unwrap()), "depth {}", depth);
        assert_eq!(score, WIN_SCORE);

        let (mv, score) = search(&black_to_win, SearchConfig::with_depth(depth), 7);
        let mv = mv.expect("black has moves");
        let mut after = black_to_win.clone();
        assert!(after.apply_move(mv, false));
        assert!(after.has_won(Side::Black), "depth {}: {} does not win", depth, mv);
        assert_eq!(score, WIN_SCORE);
    }
}

#[test]
fn alpha_beta_matches_full_width_scores() {
    let pruned = SearchConfig { transposition: false, ..SearchConfig::with_depth(1) };

    for start in [Position::new(BoardSize::SMALL), middle_game()] {
        for depth in 1..=4 {
            let mut a = start.clone();
            let mut b = start.clone();
            let mut full = SearchContext::new(SearchConfig::exhaustive(depth));
            let mut cut = SearchContext::new(SearchConfig { max_depth: depth, ..pruned });

            assert_eq!(full.evaluate(&mut a), cut.evaluate(&mut b), "depth {}", depth);
            assert!(cut.stats().nodes <= full.stats().nodes);
            assert_eq!(a, start);
        }
    }
}

#[test]
fn alpha_beta_matches_full_width_choices() {
    for start in [Position::new(BoardSize::SMALL), middle_game()] {
        for depth in 1..=4 {
            let full = search(&start, SearchConfig::exhaustive(depth), 11);
            let cut = search(
                &start,
                SearchConfig { transposition: false, ..SearchConfig::with_depth(depth) },
                11,
            );
            assert_eq!(full, cut, "depth {}", depth);
        }
    }
}

#[test]
fn table_round_trips_through_file() {
    let mut pos = middle_game();
    let mut history = History::new(pos.key());
    let mut ctx = SearchContext::new(SearchConfig::with_depth(4));
    ctx.best_move(&mut pos, &mut history);
    let table = ctx.table();
    assert!(!table.is_empty());

    let path = std::env::temp_dir().join(format!("quadline_table_{}.txt", std::process::id()));
    table.save(&path).unwrap();

    let mut reloaded = TranspositionTable::new();
    let report = reloaded.load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(report.loaded, table.size());
    assert_eq!(report.skipped, 0);
    assert_eq!(reloaded.size(), table.size());
    for (key, entry) in table.iter() {
        assert_eq!(reloaded.get(*key), Some(entry), "key {}", key);
    }
}

#[test]
fn loading_missing_table_fails_with_path() {
    let path = std::env::temp_dir().join("quadline_missing_table_does_not_exist.txt");
    let mut table = TranspositionTable::new();
    let err = table.load(&path).unwrap_err();
    assert!(err.to_string().contains("quadline_missing_table_does_not_exist"));
}
