//! AI Type Registry - enumerates the available engines and builds players for them.

use crate::agent::engine_player::{Difficulty, EnginePlayer};
use crate::agent::player::Player;

/// Enumeration of available AI algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AIType {
    /// Negamax with alpha-beta pruning and a transposition table
    #[default]
    Negamax,
    /// Random playouts under a time budget
    Playout,
}

impl AIType {
    /// Get all available AI types
    pub fn all() -> &'static [AIType] {
        &[AIType::Negamax, AIType::Playout]
    }

    /// Get the display name for this AI type
    pub fn display_name(&self) -> &'static str {
        match self {
            AIType::Negamax => "Negamax",
            AIType::Playout => "Playout",
        }
    }

    /// Get a short description of this AI type
    pub fn description(&self) -> &'static str {
        match self {
            AIType::Negamax => "Fixed-depth minimax with alpha-beta pruning",
            AIType::Playout => "Parallel random playouts per root move",
        }
    }

    /// Create a Player instance for this AI type
    pub fn create_player(&self, difficulty: Difficulty) -> Box<dyn Player> {
        let name = format!("{} ({})", self.display_name(), difficulty.name());
        Box::new(EnginePlayer::new(*self, difficulty, name))
    }
}
