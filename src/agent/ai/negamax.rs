// Negamax Search with Alpha-Beta Pruning
//
// negamax(pos, player, depth, alpha, beta) scores `pos` for `player`, the
// side that has just moved; the opponent is to move in `pos`. The window is
// in `player`'s frame. Each opponent reply is scored recursively from the
// opponent's point of view and the best reply, negated, is the value of the
// node. Values are fail-soft and memoized in the transposition table.

use crate::game_repr::{Position, Side};
use super::history::History;
use super::search::SearchContext;
use super::transposition_table::Probe;

/// Score of a line already won; shortened by one per ply to prefer fast wins
pub const WIN_SCORE: i32 = 1_000_000;

/// Scores beyond this magnitude are forced results
pub const TERMINAL_THRESHOLD: i32 = 100_000;

/// Window bound, larger than any reachable score
pub const INF: i32 = i32::MAX;

impl SearchContext {
    /// Fail-soft value of `pos` for `player` searched `depth` more plies.
    ///
    /// `history` must end with `pos.key()`; it is restored before returning.
    pub(super) fn negamax(
        &mut self,
        pos: &mut Position,
        history: &mut History,
        player: Side,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        debug_assert!(pos.is_well_formed());
        debug_assert_eq!(pos.side_to_move(), player.opposite());
        self.stats.nodes += 1;

        let key = pos.key();
        if self.config.transposition {
            match self.table.probe(key, depth, alpha, beta) {
                Probe::Cutoff(value) => {
                    self.stats.table_cutoffs += 1;
                    return value;
                }
                Probe::Window { alpha: a, beta: b } => {
                    alpha = a;
                    beta = b;
                }
                Probe::Miss => {}
            }
        }

        let ply = (self.config.max_depth.saturating_sub(depth)) as i32;
        let opponent = player.opposite();
        if pos.has_won(player) {
            return WIN_SCORE - ply;
        }
        if pos.has_won(opponent) {
            return -(WIN_SCORE - ply);
        }
        if let Some(rule) = self.config.repetition {
            if history.is_drawn(key, rule) {
                return 0;
            }
        }
        if depth == 0 {
            return self.leaf(pos, player);
        }

        let replies = pos.legal_moves(opponent);
        if replies.is_empty() {
            return self.leaf(pos, player);
        }

        let mut best_reply = -INF;
        for mv in replies {
            let Some(undo) = pos.make_move(mv) else {
                continue;
            };
            history.push(pos.key());

            // Opponent's window is ours negated, raised by the best reply so far
            let (reply_alpha, reply_beta) = if self.config.alpha_beta {
                (best_reply.max(-beta), -alpha)
            } else {
                (-INF, INF)
            };
            let value = self.negamax(pos, history, opponent, depth - 1, reply_alpha, reply_beta);

            history.pop();
            pos.unmake_move(undo);

            best_reply = best_reply.max(value);
            if self.config.alpha_beta && best_reply >= -alpha {
                break;
            }
        }

        let value = -best_reply;
        if self.config.transposition {
            self.table.store(key, depth, value, alpha, beta);
        }
        value
    }

    fn leaf(&mut self, pos: &Position, player: Side) -> i32 {
        self.stats.leaf_evals += 1;
        self.evaluator.score(pos, player)
    }
}

/// Whether `score` is a forced win or loss
pub fn is_decisive(score: i32) -> bool {
    score.abs() > TERMINAL_THRESHOLD
}

/// Plies until the forced result behind `score`, if it is one.
/// Positive for a win of the scoring side, negative for a loss.
pub fn plies_to_result(score: i32) -> Option<i32> {
    if !is_decisive(score) {
        return None;
    }
    if score > 0 {
        Some(WIN_SCORE - score)
    } else {
        Some(-(WIN_SCORE + score))
    }
}
