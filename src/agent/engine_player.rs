//! EnginePlayer - computer player backed by one of the AI engines
//!
//! The negamax engine searches the game's own position and transposition table,
//! so two engine players in one game share what either has learned. The playout
//! engine works on a copy of the position and keeps no state between moves.
//!
//! # Difficulty Levels
//!
//! - **Easy**: Depth 2, or 100ms of playouts
//! - **Medium**: Depth 4, or 500ms of playouts
//! - **Hard**: Depth 6, or 2s of playouts
//! - **Expert**: Depth 8, or 5s of playouts
//! - **Depth(n)**: Depth n, or n * 250ms of playouts

use super::ai::{AIType, PlayoutSearch};
use super::player::{GameResult, Player};
use crate::game::Game;
use crate::game_repr::Move;
use std::time::Duration;

/// AI difficulty levels that map to search depth and playout budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// Default strength
    #[default]
    Expert,
    /// Explicit search depth in plies
    Depth(u8),
}

impl Difficulty {
    /// Get the maximum search depth for this difficulty level
    pub fn max_depth(&self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
            Difficulty::Expert => 8,
            Difficulty::Depth(d) => *d,
        }
    }

    /// Wall-clock budget for the playout engine
    pub fn playout_budget(&self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(100),
            Difficulty::Medium => Duration::from_millis(500),
            Difficulty::Hard => Duration::from_secs(2),
            Difficulty::Expert => Duration::from_secs(5),
            Difficulty::Depth(d) => Duration::from_millis(250 * *d as u64),
        }
    }

    /// Get a display name for this difficulty level
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
            Difficulty::Depth(_) => "Custom",
        }
    }
}

/// Computer player
pub struct EnginePlayer {
    ai: AIType,
    difficulty: Difficulty,
    name: String,
}

impl EnginePlayer {
    pub fn new(ai: AIType, difficulty: Difficulty, name: String) -> Self {
        Self { ai, difficulty, name }
    }

    /// Negamax player with a default name
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        let name = format!("{} ({})", AIType::Negamax.display_name(), difficulty.name());
        Self::new(AIType::Negamax, difficulty, name)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

impl Player for EnginePlayer {
    fn get_move(&mut self, game: &mut Game) -> Option<Move> {
        match self.ai {
            AIType::Negamax => {
                game.search_mut().config_mut().max_depth = self.difficulty.max_depth();
                game.best_move().best_move
            }
            AIType::Playout => {
                let search = PlayoutSearch::with_budget(self.difficulty.playout_budget());
                search.search(game.state()).best_move
            }
        }
    }

    fn game_ended(&mut self, result: GameResult) {
        log::info!("{}: game over, {}", self.name, result);
    }

    fn name(&self) -> &str {
        &self.name
    }
}
