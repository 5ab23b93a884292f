// Position evaluation
// Returns a score for the side that has just moved (positive = good for that side)

use crate::game_repr::combinations::{PAIRS, TRIPLES};
use crate::game_repr::{Piece, Position, Side};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Bonus per pair of touching pieces
const PAIR_WEIGHT: i32 = 200;
/// Penalty per unit of the tightest triangle's area
const AREA_WEIGHT: i32 = 100;

/// Static evaluation backend used at search leaves.
///
/// Implementations must be deterministic and keep `|score|` well below the
/// terminal threshold so that forced results always dominate.
pub trait Evaluator: Send + Sync {
    fn score(&self, pos: &Position, side: Side) -> i32;

    fn name(&self) -> &str {
        "evaluator"
    }
}

/// Adjacency and compactness heuristic.
///
/// Rewards pieces that touch each other and penalises the spread of the
/// most compact three-piece subset, since a winning line is the tightest
/// possible triangle (area zero).
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEvaluator;

impl HeuristicEvaluator {
    /// Number of piece pairs at Chebyshev distance one
    pub fn adjacent_pairs(pieces: &[Piece]) -> i32 {
        PAIRS
            .iter()
            .filter(|&&[a, b]| pieces[a].touches(&pieces[b]))
            .count() as i32
    }

    /// Twice the smallest triangle area over all three-piece subsets
    pub fn min_doubled_area(pieces: &[Piece]) -> i32 {
        TRIPLES
            .iter()
            .map(|&[a, b, c]| doubled_area(pieces[a], pieces[b], pieces[c]))
            .min()
            .unwrap_or(0)
    }
}

impl Evaluator for HeuristicEvaluator {
    fn score(&self, pos: &Position, side: Side) -> i32 {
        let own = pos.pieces(side);
        let opp = pos.pieces(side.opposite());

        let pairs = Self::adjacent_pairs(own) - Self::adjacent_pairs(opp);
        // area * 100 == doubled area * 50
        let area = Self::min_doubled_area(own) * (AREA_WEIGHT / 2);

        PAIR_WEIGHT * pairs - area
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}

/// Shoelace formula without the halving
fn doubled_area(a: Piece, b: Piece, c: Piece) -> i32 {
    let (ax, ay) = (a.x as i32, a.y as i32);
    let (bx, by) = (b.x as i32, b.y as i32);
    let (cx, cy) = (c.x as i32, c.y as i32);
    (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by)).abs()
}

/// Shared store of precomputed leaf scores, keyed by canonical position
/// string plus the scoring side.
pub trait ScoreCache: Send + Sync {
    fn get(&self, key: &str) -> Option<i32>;
    fn put(&self, key: String, score: i32);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local [`ScoreCache`]
#[derive(Debug, Default)]
pub struct InMemoryScoreCache {
    scores: RwLock<HashMap<String, i32>>,
}

impl InMemoryScoreCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreCache for InMemoryScoreCache {
    fn get(&self, key: &str) -> Option<i32> {
        self.scores.read().get(key).copied()
    }

    fn put(&self, key: String, score: i32) {
        self.scores.write().insert(key, score);
    }

    fn len(&self) -> usize {
        self.scores.read().len()
    }
}

/// Evaluator that consults a [`ScoreCache`] before falling back to `inner`.
/// Fallback results are written back to the cache.
pub struct MemoizedEvaluator<E, C> {
    inner: E,
    cache: Arc<C>,
}

impl<E: Evaluator, C: ScoreCache> MemoizedEvaluator<E, C> {
    pub fn new(inner: E, cache: Arc<C>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }

    pub fn cache_key(pos: &Position, side: Side) -> String {
        let mut key = pos.canonical_string();
        key.push(side.to_char());
        key
    }
}

impl<E: Evaluator, C: ScoreCache> Evaluator for MemoizedEvaluator<E, C> {
    fn score(&self, pos: &Position, side: Side) -> i32 {
        let key = Self::cache_key(pos, side);
        if let Some(score) = self.cache.get(&key) {
            return score;
        }
        let score = self.inner.score(pos, side);
        self.cache.put(key, score);
        score
    }

    fn name(&self) -> &str {
        "memoized"
    }
}
