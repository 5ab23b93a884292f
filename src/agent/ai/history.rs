//! Position history and three-fold repetition.
//!
//! One stack serves both real play and search: the game appends a key per
//! move, and the search pushes the keys of the line it is exploring and pops
//! them on the way back, so draw checks inside the tree see the full path
//! from the game start.

use crate::game_repr::PositionKey;

/// How repeated positions are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepetitionRule {
    /// Three occurrences of the same key. The key carries the side to move.
    #[default]
    SideToMove,
    /// Legacy counting: occurrences are bucketed by the parity of their
    /// index in the history and three in one bucket is a draw.
    IndexParity,
}

/// Number of occurrences that makes a draw
pub const REPETITION_LIMIT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    keys: Vec<PositionKey>,
}

impl History {
    /// History holding only the starting position
    pub fn new(initial: PositionKey) -> Self {
        Self { keys: vec![initial] }
    }

    pub fn push(&mut self, key: PositionKey) {
        self.keys.push(key);
    }

    pub fn pop(&mut self) -> Option<PositionKey> {
        self.keys.pop()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn truncate(&mut self, len: usize) {
        self.keys.truncate(len);
    }

    pub fn last(&self) -> Option<PositionKey> {
        self.keys.last().copied()
    }

    pub fn keys(&self) -> &[PositionKey] {
        &self.keys
    }

    pub fn contains(&self, key: PositionKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn occurrences(&self, key: PositionKey) -> usize {
        self.keys.iter().filter(|&&k| k == key).count()
    }

    /// Whether `key` has been reached often enough to end the game drawn
    pub fn is_drawn(&self, key: PositionKey, rule: RepetitionRule) -> bool {
        match rule {
            RepetitionRule::SideToMove => self.occurrences(key) >= REPETITION_LIMIT,
            RepetitionRule::IndexParity => {
                let mut buckets = [0usize; 2];
                for (i, _) in self.keys.iter().enumerate().filter(|(_, k)| **k == key) {
                    buckets[i % 2] += 1;
                    if buckets[i % 2] >= REPETITION_LIMIT {
                        return true;
                    }
                }
                false
            }
        }
    }
}
