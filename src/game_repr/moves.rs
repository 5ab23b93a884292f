use std::fmt;
use std::str::FromStr;
use smallvec::SmallVec;
use thiserror::Error;

/*-------WIRE FORMAT--------*/

// | 1 char | 1 char | 1 char    |
// |   x    |   y    | N/S/E/W   |
// 1-based single decimal digits

/// At most 4 pieces with 4 directions each.
pub type MoveList = SmallVec<[Move; 16]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    N = 0,
    S = 1,
    E = 2,
    W = 3,
}

impl Direction {
    /// Generation order, part of the move ordering contract
    pub const ALL: [Direction; 4] = [Direction::N, Direction::S, Direction::E, Direction::W];

    /// (dx, dy) for one step. North decreases the row.
    #[inline]
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::N => (0, -1),
            Direction::S => (0, 1),
            Direction::E => (1, 0),
            Direction::W => (-1, 0),
        }
    }

    pub fn reverse(&self) -> Self {
        match self {
            Direction::N => Direction::S,
            Direction::S => Direction::N,
            Direction::E => Direction::W,
            Direction::W => Direction::E,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Direction::N => 'N',
            Direction::S => 'S',
            Direction::E => 'E',
            Direction::W => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Direction::N),
            'S' => Some(Direction::S),
            'E' => Some(Direction::E),
            'W' => Some(Direction::W),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub x: i8,
    pub y: i8,
    pub dir: Direction,
}

impl Move {
    pub const fn new(x: i8, y: i8, dir: Direction) -> Move {
        Self { x, y, dir }
    }

    /// Destination cell of the moved piece
    pub fn to(&self) -> (i8, i8) {
        let (dx, dy) = self.dir.delta();
        (self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.x, self.y, self.dir.to_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    #[error("move token must be exactly 3 characters, got {0}")]
    BadLength(usize),
    #[error("invalid coordinate character {0:?}")]
    BadCoordinate(char),
    #[error("invalid direction character {0:?}")]
    BadDirection(char),
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let chars: SmallVec<[char; 3]> = token.chars().collect();
        if chars.len() != 3 {
            return Err(ParseMoveError::BadLength(chars.len()));
        }
        let digit = |c: char| {
            c.to_digit(10)
                .map(|d| d as i8)
                .ok_or(ParseMoveError::BadCoordinate(c))
        };
        let x = digit(chars[0])?;
        let y = digit(chars[1])?;
        let dir = Direction::from_char(chars[2]).ok_or(ParseMoveError::BadDirection(chars[2]))?;
        Ok(Move::new(x, y, dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token() {
        let mv: Move = "12N".parse().unwrap();
        assert_eq!(mv, Move::new(1, 2, Direction::N));
        assert_eq!(mv.to(), (1, 1));
    }

    #[test]
    fn test_format_token() {
        assert_eq!(Move::new(5, 4, Direction::W).to_string(), "54W");
    }

    #[test]
    fn test_rejects_bad_tokens() {
        assert_eq!("12".parse::<Move>(), Err(ParseMoveError::BadLength(2)));
        assert_eq!("12NN".parse::<Move>(), Err(ParseMoveError::BadLength(4)));
        assert_eq!("12X".parse::<Move>(), Err(ParseMoveError::BadDirection('X')));
        assert_eq!("a2N".parse::<Move>(), Err(ParseMoveError::BadCoordinate('a')));
        assert_eq!("12n".parse::<Move>(), Err(ParseMoveError::BadDirection('n')));
    }

    #[test]
    fn test_reverse_is_inverse() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            let (rx, ry) = dir.reverse().delta();
            assert_eq!((dx + rx, dy + ry), (0, 0));
        }
    }
}
