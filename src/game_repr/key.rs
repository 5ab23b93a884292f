use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/*-------ARCHITECTURE--------*/

// | 1 bit  | w*h bits         | w*h bits         |
// | black  | black occupancy  | white occupancy  |
// | to move|                  |                  |
// cell index = (y-1)*w + (x-1), lowest bits first

/// Bit-packed, reversible position key.
///
/// One occupancy bit per cell per side plus a side-to-move bit. Two positions
/// on the same board share a key iff they are equal, so the key doubles as
/// the transposition table index and the repetition history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct PositionKey(pub u128);

impl PositionKey {
    #[inline]
    pub fn bits(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PositionKey {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u128>().map(PositionKey)
    }
}

impl From<u128> for PositionKey {
    fn from(bits: u128) -> Self {
        PositionKey(bits)
    }
}
