use super::*;

// ==================== MOVE GENERATION TESTS ====================

#[test]
fn test_initial_moves_small_board_white() {
    let pos = Position::new(BoardSize::SMALL);

    // Every piece sits on an edge column, boxed in vertically by the enemy
    let moves = pos.legal_moves(Side::White);
    assert_eq!(tokens(&moves), vec!["11E", "52W", "13E", "54W"]);
}

#[test]
fn test_initial_moves_small_board_black() {
    let pos = Position::new(BoardSize::SMALL);

    let moves = pos.legal_moves(Side::Black);
    assert_eq!(tokens(&moves), vec!["51W", "12E", "53W", "14E"]);
}

#[test]
fn test_initial_moves_large_board_uses_offset() {
    let pos = Position::new(BoardSize::LARGE);

    assert_eq!(pos.pieces(Side::White)[0], Piece::new(2, 2));
    assert_eq!(pos.pieces(Side::Black)[3], Piece::new(2, 5));

    let moves = pos.legal_moves(Side::White);
    assert_eq!(
        tokens(&moves),
        vec!["22N", "22E", "22W", "63E", "63W", "24E", "24W", "65S", "65E", "65W"]
    );
}

#[test]
fn test_direction_order_is_n_s_e_w() {
    // A lone white piece in the open with the rest parked in corners
    let pos = small_board(
        [(3, 2), (1, 4), (5, 4), (1, 1)],
        [(5, 1), (2, 1), (4, 1), (3, 4)],
        Side::White,
    );

    let moves = pos.legal_moves(Side::White);
    let first_piece: Vec<String> = tokens(&moves).into_iter().filter(|t| t.starts_with("32")).collect();
    assert_eq!(first_piece, vec!["32N", "32S", "32E", "32W"]);
}

#[test]
fn test_blocked_side_has_no_moves() {
    // White packed into the top-left corner, walled in by black
    let pos = small_board(
        [(1, 1), (2, 1), (1, 2), (2, 2)],
        [(3, 1), (3, 2), (1, 3), (2, 3)],
        Side::White,
    );

    assert!(pos.legal_moves(Side::White).is_empty());
    assert!(!pos.has_legal_moves(Side::White));
    assert!(pos.has_legal_moves(Side::Black));
}

#[test]
fn test_apply_move_rejects_opponent_piece() {
    let mut pos = Position::new(BoardSize::SMALL);
    let before = pos.clone();

    // (5,1) is black and it is White's turn
    assert!(!pos.apply_move(Move::new(5, 1, Direction::W), false));
    assert_eq!(pos, before);
}

#[test]
fn test_apply_move_rejects_illegal_destinations() {
    let mut pos = Position::new(BoardSize::SMALL);
    let before = pos.clone();

    // Off the board
    assert!(!pos.apply_move(Move::new(1, 1, Direction::N), false));
    // Onto a black piece
    assert!(!pos.apply_move(Move::new(1, 1, Direction::S), false));
    // Empty origin
    assert!(!pos.apply_move(Move::new(3, 3, Direction::N), false));
    // Origin off the board
    assert!(!pos.apply_move(Move::new(9, 9, Direction::N), false));

    assert_eq!(pos, before);
}

#[test]
fn test_apply_move_flips_side() {
    let mut pos = Position::new(BoardSize::SMALL);

    assert!(pos.apply_move(Move::new(1, 1, Direction::E), false));
    assert_eq!(pos.side_to_move(), Side::Black);
    assert_eq!(pos.piece_at(2, 1), Some((Side::White, 0)));
    assert_eq!(pos.piece_at(1, 1), None);
}

#[test]
fn test_skip_check_still_respects_board_edge() {
    let mut pos = Position::new(BoardSize::SMALL);
    let before = pos.clone();

    assert!(!pos.apply_move(Move::new(1, 1, Direction::W), true));
    assert_eq!(pos, before);
    assert!(pos.apply_move(Move::new(1, 1, Direction::E), true));
}

#[test]
fn test_skip_check_never_lands_on_occupied_cell() {
    let mut pos = Position::new(BoardSize::SMALL);
    let before = pos.clone();

    // (1,2) holds a black piece
    assert!(!pos.apply_move(Move::new(1, 1, Direction::S), true));
    assert_eq!(pos, before);
    assert!(pos.is_well_formed());
    assert_eq!(Position::from_key(BoardSize::SMALL, pos.key()), Some(before));
}

#[test]
fn test_board_size_must_fit_starting_layout() {
    assert_eq!(BoardSize::new(5, 4), Some(BoardSize::SMALL));
    assert_eq!(BoardSize::new(7, 6), Some(BoardSize::LARGE));
    assert_eq!(BoardSize::new(4, 4), None);
    assert_eq!(BoardSize::new(5, 3), None);
    assert_eq!(BoardSize::new(10, 4), None);

    let wide = BoardSize::new(6, 5).expect("layout fits");
    assert!(Position::new(wide).is_well_formed());
}
