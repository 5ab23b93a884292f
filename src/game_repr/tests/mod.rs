use super::*;

mod move_generation;

// ==================== HELPER FUNCTIONS ====================

/// Helper function to build a position on the small board
pub fn small_board(white: [(i8, i8); 4], black: [(i8, i8); 4], side: Side) -> Position {
    board_with(BoardSize::SMALL, white, black, side)
}

/// Helper function to build a position from coordinate tuples
pub fn board_with(size: BoardSize, white: [(i8, i8); 4], black: [(i8, i8); 4], side: Side) -> Position {
    let to_pieces = |cells: [(i8, i8); 4]| cells.map(|(x, y)| Piece::new(x, y));
    Position::from_pieces(size, to_pieces(white), to_pieces(black), side)
        .expect("test position must be well formed")
}

/// Helper function to render a move list as tokens
pub fn tokens(moves: &[Move]) -> Vec<String> {
    moves.iter().map(|m| m.to_string()).collect()
}
