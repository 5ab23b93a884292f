//! Player trait and associated types for game agents.
//!
//! This module provides the core abstraction for entities that can provide moves.
//! Different player types (human at the console, search engine, remote game server)
//! implement the `Player` trait to take part in games run by the orchestrator.
//!
//! # Design Philosophy
//!
//! The `Player` trait focuses on **behavior** rather than construction. Different player
//! implementations require different initialization parameters:
//! - `HumanPlayer` needs an input stream to read move tokens from
//! - `EnginePlayer` needs an engine kind and a difficulty
//! - `RemotePlayer` needs a connected game-server session
//!
//! Therefore, the trait does not define a constructor method.
//!
//! # Synchronous Design
//!
//! `get_move()` blocks until a move is available: the engine while it searches, the
//! human while typing, the remote player while waiting on the socket. The orchestrator
//! simply calls it and waits.

use crate::game::Game;
use crate::game_repr::{Move, Side};
use std::fmt;

/// Result of a completed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White completed a line
    WhiteWins,
    /// Black completed a line
    BlackWins,
    /// Three-fold repetition or turn limit
    Draw,
    /// The given side produced no move (resigned, blocked, timed out or disconnected)
    Forfeit(Side),
}

impl GameResult {
    /// Create a GameResult from the winning side
    pub fn from_winner(winner: Side) -> Self {
        match winner {
            Side::White => GameResult::WhiteWins,
            Side::Black => GameResult::BlackWins,
        }
    }

    /// Side credited with the win, if any
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameResult::WhiteWins => Some(Side::White),
            GameResult::BlackWins => Some(Side::Black),
            GameResult::Draw => None,
            GameResult::Forfeit(side) => Some(side.opposite()),
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::WhiteWins => write!(f, "white wins"),
            GameResult::BlackWins => write!(f, "black wins"),
            GameResult::Draw => write!(f, "draw by 3-fold repetition"),
            GameResult::Forfeit(side) => write!(f, "{} forfeits", side),
        }
    }
}

/// Trait for entities that can provide moves.
///
/// # Method Behavior
///
/// ## `get_move()`
/// - **Blocking**: may block until a move is available
/// - **Returns `None`**: if the player resigns, has no move, or disconnects
/// - **Returns `Some(Move)`**: a move for the side to move in `game`; the orchestrator
///   validates it before applying
///
/// The player gets mutable access to the game so engines can search in place and reuse
/// the game's transposition table. Implementations must leave the position as they found it.
///
/// ## `opponent_moved()` / `game_ended()`
/// - Default: do nothing
/// - Override: to forward moves to a remote peer, print results, close connections
pub trait Player {
    /// Request the next move from this player.
    fn get_move(&mut self, game: &mut Game) -> Option<Move>;

    /// Notify this player that the opponent made a move.
    fn opponent_moved(&mut self, _mv: Move) {
        // Default: do nothing
    }

    /// Notify this player that the game has ended.
    fn game_ended(&mut self, _result: GameResult) {
        // Default: do nothing
    }

    /// Get the display name of this player.
    fn name(&self) -> &str {
        "Player"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_winner() {
        assert_eq!(GameResult::from_winner(Side::Black), GameResult::BlackWins);
        assert_eq!(GameResult::WhiteWins.winner(), Some(Side::White));
        assert_eq!(GameResult::Draw.winner(), None);
        assert_eq!(GameResult::Forfeit(Side::White).winner(), Some(Side::Black));
    }

    #[test]
    fn test_result_display() {
        assert_eq!(GameResult::Forfeit(Side::Black).to_string(), "black forfeits");
        assert_eq!(GameResult::Draw.to_string(), "draw by 3-fold repetition");
    }
}
