use std::fmt;
use super::*;
use super::combinations::TRIPLES;

/*
 * MODULE IS RESPONSIBLE FOR
 * GAME REPRESENTATION AND LOGIC
 */

/// Smallest board holding the starting layout
const MIN_WIDTH: i8 = 5;
const MIN_HEIGHT: i8 = 4;

/// Board dimensions. Coordinates are 1-based on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSize {
    pub width: i8,
    pub height: i8,
}

impl BoardSize {
    /// 5x4, the default board
    pub const SMALL: BoardSize = BoardSize { width: 5, height: 4 };
    /// 7x6
    pub const LARGE: BoardSize = BoardSize { width: 7, height: 6 };

    /// Builds a board size if the starting layout fits, every cell fits in a
    /// `PositionKey` and coordinates stay single digits (the move token has
    /// one char per axis).
    pub fn new(width: i8, height: i8) -> Option<Self> {
        if !(MIN_WIDTH..=9).contains(&width) || !(MIN_HEIGHT..=9).contains(&height) {
            return None;
        }
        let size = Self { width, height };
        (size.key_bits() <= 128).then_some(size)
    }

    /// Whether the rules have been verified on this size.
    pub fn is_supported(&self) -> bool {
        *self == Self::SMALL || *self == Self::LARGE
    }

    #[inline]
    pub fn cells(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Width of the position key: two occupancy planes plus the side bit
    #[inline]
    pub fn key_bits(&self) -> usize {
        2 * self.cells() + 1
    }

    #[inline]
    pub fn contains(&self, x: i8, y: i8) -> bool {
        x >= 1 && x <= self.width && y >= 1 && y <= self.height
    }

    #[inline]
    pub fn cell_index(&self, x: i8, y: i8) -> usize {
        (y as usize - 1) * self.width as usize + (x as usize - 1)
    }

    #[inline]
    fn cell_at(&self, index: usize) -> Piece {
        let w = self.width as usize;
        Piece::new((index % w) as i8 + 1, (index / w) as i8 + 1)
    }

    /// Coordinate shift applied to the starting layout
    fn layout_offset(&self) -> i8 {
        if *self == Self::LARGE { 1 } else { 0 }
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::SMALL
    }
}

/// Minimal delta needed to take back a move made with [`Position::make_move`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoInfo {
    side: Side,
    index: usize,
    dir: Direction,
}

#[derive(Clone, Debug)]
pub struct Position {
    /// Indexed by `Side::index()`
    pieces: [[Piece; PIECES_PER_SIDE]; 2],
    side_to_move: Side,
    size: BoardSize,
}

impl Default for Position {
    fn default() -> Self {
        Self::new(BoardSize::SMALL)
    }
}

impl PartialEq for Position {
    /// Piece order inside a side is irrelevant; the key captures occupancy
    /// and side to move exactly.
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.key() == other.key()
    }
}

impl Eq for Position {}

impl Position {
    /// Starting layout, White to move.
    pub fn new(size: BoardSize) -> Position {
        let o = size.layout_offset();
        let p = |x: i8, y: i8| Piece::new(x + o, y + o);
        Self {
            pieces: [
                [p(1, 1), p(5, 2), p(1, 3), p(5, 4)],
                [p(5, 1), p(1, 2), p(5, 3), p(1, 4)],
            ],
            side_to_move: Side::White,
            size,
        }
    }

    /// Builds an arbitrary position. Returns `None` for pieces that are off
    /// the board or stacked on the same cell.
    pub fn from_pieces(
        size: BoardSize,
        white: [Piece; PIECES_PER_SIDE],
        black: [Piece; PIECES_PER_SIDE],
        side_to_move: Side,
    ) -> Option<Position> {
        let pos = Self { pieces: [white, black], side_to_move, size };
        pos.is_well_formed().then_some(pos)
    }

    /// Exact inverse of [`Position::key`]. Keys that do not describe four
    /// pieces per side on distinct cells of this board are rejected.
    pub fn from_key(size: BoardSize, key: PositionKey) -> Option<Position> {
        let cells = size.cells();
        let bits = key.bits();
        if size.key_bits() < 128 && bits >> size.key_bits() != 0 {
            return None;
        }

        let plane_mask = (1u128 << cells) - 1;
        let white_bits = bits & plane_mask;
        let black_bits = (bits >> cells) & plane_mask;
        if white_bits & black_bits != 0
            || white_bits.count_ones() as usize != PIECES_PER_SIDE
            || black_bits.count_ones() as usize != PIECES_PER_SIDE
        {
            return None;
        }

        let mut pieces = [[Piece::default(); PIECES_PER_SIDE]; 2];
        for (side_pieces, mut plane) in pieces.iter_mut().zip([white_bits, black_bits]) {
            for slot in side_pieces.iter_mut() {
                let index = plane.trailing_zeros() as usize;
                *slot = size.cell_at(index);
                plane &= plane - 1;
            }
        }

        let side_to_move = if (bits >> (2 * cells)) & 1 == 1 { Side::Black } else { Side::White };
        Some(Self { pieces, side_to_move, size })
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, side: Side) {
        self.side_to_move = side;
    }

    pub fn pieces(&self, side: Side) -> &[Piece; PIECES_PER_SIDE] {
        &self.pieces[side.index()]
    }

    /// Side and piece index at a cell, if occupied
    pub fn piece_at(&self, x: i8, y: i8) -> Option<(Side, usize)> {
        Side::ALL.into_iter().find_map(|side| {
            self.pieces(side)
                .iter()
                .position(|p| p.x == x && p.y == y)
                .map(|idx| (side, idx))
        })
    }

    #[inline]
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        self.pieces.iter().flatten().any(|p| p.x == x && p.y == y)
    }

    /// A piece can step in `dir` if the target is on the board and empty
    #[inline]
    fn can_step(&self, piece: Piece, dir: Direction) -> bool {
        let (dx, dy) = dir.delta();
        let (x, y) = (piece.x + dx, piece.y + dy);
        self.size.contains(x, y) && !self.is_occupied(x, y)
    }

    /// Legal moves for `side`, piece-index-major then N, S, E, W.
    pub fn legal_moves(&self, side: Side) -> MoveList {
        let mut moves = MoveList::new();
        for &piece in self.pieces(side) {
            for dir in Direction::ALL {
                if self.can_step(piece, dir) {
                    moves.push(Move::new(piece.x, piece.y, dir));
                }
            }
        }
        moves
    }

    pub fn has_legal_moves(&self, side: Side) -> bool {
        self.pieces(side)
            .iter()
            .any(|&piece| Direction::ALL.into_iter().any(|dir| self.can_step(piece, dir)))
    }

    pub fn is_move_legal(&self, mv: Move) -> bool {
        self.locate(self.side_to_move, mv)
            .is_some_and(|idx| self.can_step(self.pieces(self.side_to_move)[idx], mv.dir))
    }

    fn locate(&self, side: Side, mv: Move) -> Option<usize> {
        if !self.size.contains(mv.x, mv.y) {
            return None;
        }
        self.pieces(side).iter().position(|p| p.x == mv.x && p.y == mv.y)
    }

    /// Moves a piece of the side to move and passes the turn.
    ///
    /// Returns `false` without touching the position if the origin is empty,
    /// holds an opponent piece, or the move is illegal. A move is legal iff
    /// its destination is an empty cell on the board, and that check runs
    /// even with `skip_legality_check`, which is kept for callers replaying
    /// already validated moves.
    pub fn apply_move(&mut self, mv: Move, _skip_legality_check: bool) -> bool {
        let side = self.side_to_move;
        let Some(index) = self.locate(side, mv) else {
            return false;
        };

        if !self.can_step(self.pieces(side)[index], mv.dir) {
            return false;
        }

        self.shift(side, index, mv.dir);
        self.side_to_move = side.opposite();
        true
    }

    /// Search-path variant of [`Position::apply_move`] returning the delta
    /// needed by [`Position::unmake_move`].
    pub fn make_move(&mut self, mv: Move) -> Option<UndoInfo> {
        let side = self.side_to_move;
        let index = self.locate(side, mv)?;
        if !self.can_step(self.pieces(side)[index], mv.dir) {
            return None;
        }

        self.shift(side, index, mv.dir);
        self.side_to_move = side.opposite();
        Some(UndoInfo { side, index, dir: mv.dir })
    }

    pub fn unmake_move(&mut self, undo: UndoInfo) {
        self.shift(undo.side, undo.index, undo.dir.reverse());
        self.side_to_move = undo.side;
    }

    #[inline]
    fn shift(&mut self, side: Side, index: usize, dir: Direction) {
        let (dx, dy) = dir.delta();
        let piece = &mut self.pieces[side.index()][index];
        piece.x += dx;
        piece.y += dy;
    }

    /// True iff three of the side's pieces form a straight run of adjacent
    /// cells along a row, column or diagonal.
    pub fn has_won(&self, side: Side) -> bool {
        let pieces = self.pieces(side);
        TRIPLES
            .iter()
            .any(|&[a, b, c]| is_line(pieces[a], pieces[b], pieces[c]))
    }

    /// White is reported first. Both sides holding a line cannot arise in
    /// play since a move only ever changes the mover's pieces.
    pub fn winner(&self) -> Winner {
        if self.has_won(Side::White) {
            Winner::White
        } else if self.has_won(Side::Black) {
            Winner::Black
        } else {
            Winner::None
        }
    }

    pub fn key(&self) -> PositionKey {
        let cells = self.size.cells();
        let mut bits = 0u128;
        for side in Side::ALL {
            let plane = side.index() * cells;
            for p in self.pieces(side) {
                bits |= 1u128 << (plane + self.size.cell_index(p.x, p.y));
            }
        }
        if self.side_to_move == Side::Black {
            bits |= 1u128 << (2 * cells);
        }
        PositionKey(bits)
    }

    /// Row-major cell string plus side to move, e.g. `"0___1..._w"`.
    pub fn canonical_string(&self) -> String {
        let mut out = String::with_capacity(self.size.cells() + 1);
        for y in 1..=self.size.height {
            for x in 1..=self.size.width {
                out.push(match self.piece_at(x, y) {
                    Some((side, _)) => side.to_char(),
                    None => '_',
                });
            }
        }
        out.push(match self.side_to_move {
            Side::White => 'w',
            Side::Black => 'b',
        });
        out
    }

    /// Four pieces per side, all on the board, no two on one cell.
    pub fn is_well_formed(&self) -> bool {
        let all: Vec<&Piece> = self.pieces.iter().flatten().collect();
        all.iter().all(|p| self.size.contains(p.x, p.y))
            && all
                .iter()
                .enumerate()
                .all(|(i, p)| all[i + 1..].iter().all(|q| q != p))
    }
}

/// Three cells in a straight line of adjacent cells, in any order
fn is_line(a: Piece, b: Piece, c: Piece) -> bool {
    let centred = |m: Piece, p: Piece, q: Piece| {
        let (dx, dy) = (p.x - m.x, p.y - m.y);
        m.touches(&p) && q.x - m.x == -dx && q.y - m.y == -dy
    };
    centred(a, b, c) || centred(b, a, c) || centred(c, a, b)
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========")?;
        for y in 1..=self.size.height {
            for x in 1..=self.size.width {
                if x > 1 {
                    write!(f, ",")?;
                }
                let c = match self.piece_at(x, y) {
                    Some((side, _)) => side.to_char(),
                    None => '_',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "==========")
    }
}
