// AI Agent - Negamax with Alpha-Beta Pruning
//
// This module implements the game AI using the Negamax algorithm with
// alpha-beta pruning, a transposition table and repetition-aware draws.
//
// Key features:
// - Fixed-depth search that always runs to completion
// - Transposition table keyed by the exact position key, persistable to disk
// - Pluggable leaf evaluators with an optional shared score cache
// - Randomized tie-breaking among equally scored moves
// - Time-budgeted random playouts as an alternative engine

mod transposition_table;
mod negamax;
mod search;
mod history;
mod evaluation;
mod playout;
mod ai_type;

pub use ai_type::AIType;
pub use evaluation::{Evaluator, HeuristicEvaluator, InMemoryScoreCache, MemoizedEvaluator, ScoreCache};
pub use history::{History, RepetitionRule, REPETITION_LIMIT};
pub use negamax::{is_decisive, plies_to_result, INF, TERMINAL_THRESHOLD, WIN_SCORE};
pub use playout::{MoveStats, PlayoutResult, PlayoutSearch};
pub use search::{SearchConfig, SearchContext, SearchResult, SearchStats, DEFAULT_DEPTH};
pub use transposition_table::{LoadReport, NodeType, Probe, TableError, TranspositionEntry, TranspositionTable};
