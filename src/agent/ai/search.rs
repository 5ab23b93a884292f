// Root move selection
//
// Every legal move of the side to move is tried in generation order and
// scored with a full-depth negamax. The running best score narrows the
// window for later moves; ties are broken towards positions not seen yet in
// the game, otherwise by a coin flip.

use crate::game_repr::{Move, Position};
use super::evaluation::{Evaluator, HeuristicEvaluator};
use super::history::{History, RepetitionRule};
use super::negamax::{INF, WIN_SCORE};
use super::transposition_table::TranspositionTable;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default search depth in plies
pub const DEFAULT_DEPTH: u8 = 8;

/// Knobs for the main search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub alpha_beta: bool,
    pub transposition: bool,
    /// `None` disables draw detection inside the tree
    pub repetition: Option<RepetitionRule>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_DEPTH,
            alpha_beta: true,
            transposition: true,
            repetition: Some(RepetitionRule::default()),
        }
    }
}

impl SearchConfig {
    pub fn with_depth(max_depth: u8) -> Self {
        Self { max_depth, ..Self::default() }
    }

    /// Full-width search without pruning or memoization
    pub fn exhaustive(max_depth: u8) -> Self {
        Self {
            max_depth,
            alpha_beta: false,
            transposition: false,
            ..Self::default()
        }
    }
}

/// Counters for a single root search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub leaf_evals: u64,
    pub table_cutoffs: u64,
}

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// `None` when the side to move has no legal move
    pub best_move: Option<Move>,
    /// Score for the side to move; `WIN_SCORE` for an immediate win
    pub score: i32,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Everything the search mutates, bundled so no global state is needed.
pub struct SearchContext {
    pub(super) config: SearchConfig,
    pub(super) table: TranspositionTable,
    pub(super) evaluator: Arc<dyn Evaluator>,
    pub(super) rng: StdRng,
    pub(super) stats: SearchStats,
}

impl SearchContext {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_evaluator(config, Arc::new(HeuristicEvaluator))
    }

    pub fn with_evaluator(config: SearchConfig, evaluator: Arc<dyn Evaluator>) -> Self {
        Self {
            config,
            table: TranspositionTable::new(),
            evaluator,
            rng: StdRng::from_entropy(),
            stats: SearchStats::default(),
        }
    }

    /// Reseed the tie-breaking RNG for reproducible play
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TranspositionTable {
        &mut self.table
    }

    pub fn evaluator(&self) -> &Arc<dyn Evaluator> {
        &self.evaluator
    }

    /// Statistics of the last root search
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Value of `pos` for the side that just moved into it, searched from
    /// scratch with a full window. `pos` is restored before returning.
    pub fn evaluate(&mut self, pos: &mut Position) -> i32 {
        let mut history = History::new(pos.key());
        let player = pos.side_to_move().opposite();
        self.stats = SearchStats::default();
        self.negamax(pos, &mut history, player, self.config.max_depth, -INF, INF)
    }

    /// Pick a move for the side to move in `pos`.
    ///
    /// `pos` and `history` are used as scratch space and are restored before
    /// returning. `history` must end with `pos.key()`.
    pub fn best_move(&mut self, pos: &mut Position, history: &mut History) -> SearchResult {
        let start = Instant::now();
        let me = pos.side_to_move();
        let depth = self.config.max_depth;
        let history_len = history.len();
        self.stats = SearchStats::default();

        let mut best_move: Option<Move> = None;
        let mut best_worst = -INF;

        for mv in pos.legal_moves(me) {
            let Some(undo) = pos.make_move(mv) else {
                continue;
            };
            let key = pos.key();

            if pos.has_won(me) {
                pos.unmake_move(undo);
                best_move = Some(mv);
                best_worst = WIN_SCORE;
                log::debug!("{}: immediate win", mv);
                break;
            }

            let fresh = !history.contains(key);
            history.push(key);

            // Ties must come back exact, so keep them inside the window
            let alpha = if best_move.is_some() && self.config.alpha_beta {
                best_worst - 1
            } else {
                -INF
            };
            let score = self.negamax(pos, history, me, depth, alpha, INF);

            history.pop();
            pos.unmake_move(undo);
            log::debug!("{}: {}", mv, score);

            if best_move.is_none() || score > best_worst {
                best_worst = score;
                best_move = Some(mv);
            } else if score == best_worst && (fresh || self.rng.gen_bool(0.5)) {
                best_move = Some(mv);
            }
        }

        debug_assert_eq!(history.len(), history_len);

        let elapsed = start.elapsed();
        match best_move {
            Some(mv) => log::info!(
                "{} plays {} (score {}, {} nodes, {:.2?})",
                me,
                mv,
                best_worst,
                self.stats.nodes,
                elapsed
            ),
            None => log::info!("{} has no legal move", me),
        }

        SearchResult {
            best_move,
            score: if best_move.is_some() { best_worst } else { 0 },
            nodes: self.stats.nodes,
            elapsed,
        }
    }
}
