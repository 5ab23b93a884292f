use std::fmt;

/// Number of pieces each side keeps on the board for the whole game.
pub const PIECES_PER_SIDE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::White, Side::Black];

    pub fn opposite(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }

    /// Character used for this side in grid dumps and canonical strings
    pub fn to_char(&self) -> char {
        match self {
            Self::White => '0',
            Self::Black => '1',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => write!(f, "white"),
            Self::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    White,
    Black,
    None,
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Winner::White,
            Side::Black => Winner::Black,
        }
    }
}

/// A single piece, addressed by 1-based column `x` and row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Piece {
    pub x: i8,
    pub y: i8,
}

impl Piece {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance of one: orthogonal or diagonal neighbours.
    pub fn touches(&self, other: &Piece) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx <= 1 && dy <= 1 && dx + dy > 0
    }
}
