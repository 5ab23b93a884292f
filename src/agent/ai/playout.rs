//! Time-budgeted random playouts.
//!
//! Each root move gets its own rayon task with a private position clone and
//! RNG, and keeps playing random games from the resulting position until the
//! budget runs out. The move with the best average outcome wins. Nothing here
//! touches the main search's table or history.

use crate::game_repr::{Move, Position, Side, Winner};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Configuration for the playout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayoutSearch {
    /// Wall-clock budget shared by all root moves
    pub budget: Duration,
    /// Plies after which an unfinished playout counts as a draw
    pub max_playout_len: usize,
    pub seed: u64,
}

impl Default for PlayoutSearch {
    fn default() -> Self {
        Self {
            budget: Duration::from_millis(500),
            max_playout_len: 200,
            seed: 0x5eed,
        }
    }
}

/// Per-move outcome of a playout search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveStats {
    pub mv: Move,
    pub playouts: u32,
    /// Sum of outcomes: 1 per win, 0.5 per draw
    pub score: f64,
}

impl MoveStats {
    pub fn win_rate(&self) -> f64 {
        if self.playouts == 0 {
            0.0
        } else {
            self.score / self.playouts as f64
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlayoutResult {
    pub best_move: Option<Move>,
    pub stats: Vec<MoveStats>,
}

impl PlayoutSearch {
    pub fn with_budget(budget: Duration) -> Self {
        Self { budget, ..Self::default() }
    }

    /// Pick a move for the side to move in `pos`
    pub fn search(&self, pos: &Position) -> PlayoutResult {
        let me = pos.side_to_move();
        let moves = pos.legal_moves(me);
        let deadline = Instant::now() + self.budget;

        // A winning move needs no sampling
        for &mv in &moves {
            let mut child = pos.clone();
            if child.apply_move(mv, false) && child.has_won(me) {
                return PlayoutResult {
                    best_move: Some(mv),
                    stats: vec![MoveStats { mv, playouts: 1, score: 1.0 }],
                };
            }
        }

        let stats: Vec<MoveStats> = moves
            .as_slice()
            .par_iter()
            .enumerate()
            .map(|(i, &mv)| {
                let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(i as u64));
                let mut root = pos.clone();
                if !root.apply_move(mv, false) {
                    return MoveStats { mv, playouts: 0, score: 0.0 };
                }

                let mut stats = MoveStats { mv, playouts: 0, score: 0.0 };
                // At least one playout per move, even with an empty budget
                loop {
                    stats.score += self.playout(root.clone(), me, &mut rng);
                    stats.playouts += 1;
                    if Instant::now() >= deadline {
                        break;
                    }
                }
                stats
            })
            .collect();

        // Earliest move wins ties, matching generation order
        let best_move = stats
            .iter()
            .fold(None::<&MoveStats>, |best, s| match best {
                Some(b) if b.win_rate() >= s.win_rate() => Some(b),
                _ => Some(s),
            })
            .map(|s| s.mv);

        let total: u32 = stats.iter().map(|s| s.playouts).sum();
        log::debug!("{} playouts over {} moves", total, stats.len());

        PlayoutResult { best_move, stats }
    }

    /// Random game from `pos`; 1.0 if `me` wins, 0.0 if it loses, 0.5 otherwise
    fn playout(&self, mut pos: Position, me: Side, rng: &mut StdRng) -> f64 {
        for _ in 0..self.max_playout_len {
            match pos.winner() {
                Winner::None => {}
                w if w == Winner::from(me) => return 1.0,
                _ => return 0.0,
            }
            let moves = pos.legal_moves(pos.side_to_move());
            let Some(&mv) = moves.choose(rng) else {
                break;
            };
            pos.apply_move(mv, true);
        }
        match pos.winner() {
            Winner::None => 0.5,
            w if w == Winner::from(me) => 1.0,
            _ => 0.0,
        }
    }
}
