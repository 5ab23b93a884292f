//! Authoritative game state.
//!
//! [`Game`] owns the current position, the append-only history of position
//! keys since the start, and the search context used to pick moves. Players
//! and the orchestrator only ever change the position through it.

use crate::agent::ai::{History, RepetitionRule, SearchConfig, SearchContext, SearchResult, TranspositionTable};
use crate::agent::player::GameResult;
use crate::game_repr::{BoardSize, Move, Position, Side, Winner};

pub struct Game {
    state: Position,
    history: History,
    num_turns: u32,
    search: SearchContext,
}

impl Game {
    /// New game from the starting layout
    pub fn new(size: BoardSize, config: SearchConfig) -> Self {
        Self::from_position(Position::new(size), config)
    }

    pub fn from_position(state: Position, config: SearchConfig) -> Self {
        Self::with_context(state, SearchContext::new(config))
    }

    /// Use a preconfigured search context, e.g. one with a custom evaluator
    pub fn with_context(state: Position, search: SearchContext) -> Self {
        Self {
            history: History::new(state.key()),
            state,
            num_turns: 0,
            search,
        }
    }

    /// Parse and apply a 3-character move token. Malformed tokens and
    /// illegal moves leave the game untouched.
    pub fn apply_token(&mut self, token: &str) -> bool {
        match token.parse::<Move>() {
            Ok(mv) => self.apply_move(mv, false),
            Err(err) => {
                log::warn!("rejected move token {:?}: {}", token, err);
                false
            }
        }
    }

    /// Apply a move for the side to move and record the new position
    pub fn apply_move(&mut self, mv: Move, skip_legality_check: bool) -> bool {
        if !self.state.apply_move(mv, skip_legality_check) {
            return false;
        }
        self.num_turns += 1;
        self.history.push(self.state.key());
        true
    }

    /// Search the current position with the game's configuration
    pub fn best_move(&mut self) -> SearchResult {
        self.search.best_move(&mut self.state, &mut self.history)
    }

    /// Three-fold repetition of the current position
    pub fn is_draw(&self) -> bool {
        self.history.is_drawn(self.state.key(), self.repetition_rule())
    }

    pub fn winner(&self) -> Winner {
        self.state.winner()
    }

    /// Result if the game is over by a line or by repetition
    pub fn outcome(&self) -> Option<GameResult> {
        match self.winner() {
            Winner::White => Some(GameResult::WhiteWins),
            Winner::Black => Some(GameResult::BlackWins),
            Winner::None if self.is_draw() => Some(GameResult::Draw),
            Winner::None => None,
        }
    }

    pub fn num_turns(&self) -> u32 {
        self.num_turns
    }

    pub fn side_to_move(&self) -> Side {
        self.state.side_to_move()
    }

    pub fn state(&self) -> &Position {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Replace the position and restart the history from it
    pub fn set_state(&mut self, state: Position) {
        self.history = History::new(state.key());
        self.state = state;
        self.num_turns = 0;
    }

    pub fn search(&self) -> &SearchContext {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchContext {
        &mut self.search
    }

    pub fn table(&self) -> &TranspositionTable {
        self.search.table()
    }

    pub fn table_mut(&mut self) -> &mut TranspositionTable {
        self.search.table_mut()
    }

    fn repetition_rule(&self) -> RepetitionRule {
        self.search.config().repetition.unwrap_or_default()
    }
}
