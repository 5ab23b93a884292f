//! Game loop coordination.
//!
//! This module contains the [`Orchestrator`], which drives one game between two
//! [`Player`]s. It manages:
//! - Turn management (asking the side to move for a move)
//! - Move execution and validation against the authoritative [`Game`]
//! - End detection (line completed, three-fold repetition, forfeit, turn limit)
//! - Notifying both players of moves and of the result
//!
//! # Example Flow
//!
//! ```text
//! [Create Players] -> [Request Move] -> [Player provides move] -> [Process Move]
//!   -> [Notify opponent] -> [Check End] -> [Request Move] ...
//! ```

use crate::agent::player::{GameResult, Player};
use crate::game::Game;
use crate::game_repr::{Move, Side};

/// Root component running a game to completion.
///
/// The orchestrator owns the [`Game`] and both players; players get
/// temporary mutable access to the game when it is their turn.
pub struct Orchestrator {
    game: Game,

    /// (white_player, black_player)
    players: (Box<dyn Player>, Box<dyn Player>),

    /// Declare a draw after this many plies
    max_turns: Option<u32>,

    /// Result of the game once it has ended
    game_result: Option<GameResult>,
}

impl Orchestrator {
    pub fn new(game: Game, white: Box<dyn Player>, black: Box<dyn Player>) -> Self {
        log::debug!("orchestrator: {} vs {}", white.name(), black.name());
        Self {
            game,
            players: (white, black),
            max_turns: None,
            game_result: None,
        }
    }

    /// Stop the game as a draw after `max_turns` plies
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn into_game(self) -> Game {
        self.game
    }

    pub fn game_result(&self) -> Option<GameResult> {
        self.game_result
    }

    /// Play until the game ends and return the result
    pub fn run(&mut self) -> GameResult {
        // The starting position may already be decided
        self.check_game_end();
        loop {
            if let Some(result) = self.game_result {
                return result;
            }
            self.request_move();
        }
    }

    fn player_mut(&mut self, side: Side) -> &mut dyn Player {
        match side {
            Side::White => self.players.0.as_mut(),
            Side::Black => self.players.1.as_mut(),
        }
    }

    /// Ask the side to move for a move and process it.
    ///
    /// A player that returns `None` forfeits the game.
    pub fn request_move(&mut self) {
        if self.game_result.is_some() {
            return;
        }

        let side = self.game.side_to_move();
        let mv = match side {
            Side::White => self.players.0.get_move(&mut self.game),
            Side::Black => self.players.1.get_move(&mut self.game),
        };

        match mv {
            Some(mv) => self.process_move(mv),
            None => {
                log::info!("{} ({}) produced no move", self.player_mut(side).name(), side);
                self.handle_game_end(GameResult::Forfeit(side));
            }
        }
    }

    /// Execute a move for the side to move, notify the opponent, and check for the end.
    /// An illegal move forfeits the game for the side that made it.
    pub fn process_move(&mut self, mv: Move) {
        let side = self.game.side_to_move();
        if !self.game.apply_move(mv, false) {
            log::warn!("{} played illegal move {}", side, mv);
            self.handle_game_end(GameResult::Forfeit(side));
            return;
        }
        log::info!("turn {}: {} plays {}", self.game.num_turns(), side, mv);
        log::debug!("\n{}", self.game.state());

        self.player_mut(side.opposite()).opponent_moved(mv);
        self.check_game_end();
    }

    /// Detect a completed line, a repetition draw, or the turn limit.
    pub fn check_game_end(&mut self) {
        if let Some(result) = self.game.outcome() {
            self.handle_game_end(result);
        } else if self.max_turns.is_some_and(|max| self.game.num_turns() >= max) {
            log::info!("turn limit reached");
            self.handle_game_end(GameResult::Draw);
        }
    }

    fn handle_game_end(&mut self, result: GameResult) {
        log::info!("game over after {} turns: {}", self.game.num_turns(), result);
        self.game_result = Some(result);
        self.players.0.game_ended(result);
        self.players.1.game_ended(result);
    }
}

/// Run a whole game and hand back the final game state with the result
pub fn play(game: Game, white: Box<dyn Player>, black: Box<dyn Player>) -> (GameResult, Game) {
    let mut orchestrator = Orchestrator::new(game, white, black);
    let result = orchestrator.run();
    (result, orchestrator.into_game())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ai::SearchConfig;
    use crate::game_repr::BoardSize;
    use std::collections::VecDeque;

    /// Plays a fixed list of tokens, then resigns
    struct ScriptedPlayer {
        moves: VecDeque<&'static str>,
    }

    impl ScriptedPlayer {
        fn new(moves: &[&'static str]) -> Self {
            Self { moves: moves.iter().copied().collect() }
        }
    }

    impl Player for ScriptedPlayer {
        fn get_move(&mut self, _game: &mut Game) -> Option<Move> {
            self.moves.pop_front().and_then(|t| t.parse().ok())
        }
    }

    fn game() -> Game {
        Game::new(BoardSize::SMALL, SearchConfig::with_depth(1))
    }

    #[test]
    fn test_repetition_ends_in_draw() {
        let white = ScriptedPlayer::new(&["11E", "21W", "11E", "21W"]);
        let black = ScriptedPlayer::new(&["51W", "41E", "51W", "41E"]);
        let mut orch = Orchestrator::new(game(), Box::new(white), Box::new(black));

        assert_eq!(orch.run(), GameResult::Draw);
        assert_eq!(orch.game().num_turns(), 8);
    }

    #[test]
    fn test_resignation_forfeits() {
        let white = ScriptedPlayer::new(&["11E"]);
        let black = ScriptedPlayer::new(&[]);
        let mut orch = Orchestrator::new(game(), Box::new(white), Box::new(black));

        assert_eq!(orch.run(), GameResult::Forfeit(Side::Black));
        assert_eq!(orch.game_result(), Some(GameResult::Forfeit(Side::Black)));
    }

    #[test]
    fn test_illegal_move_forfeits() {
        let white = ScriptedPlayer::new(&["11S"]);
        let black = ScriptedPlayer::new(&[]);
        let mut orch = Orchestrator::new(game(), Box::new(white), Box::new(black));

        assert_eq!(orch.run(), GameResult::Forfeit(Side::White));
        assert_eq!(orch.game().num_turns(), 0);
    }

    #[test]
    fn test_play_returns_final_game() {
        let white = ScriptedPlayer::new(&["11E"]);
        let black = ScriptedPlayer::new(&["51W"]);
        let (result, game) = play(game(), Box::new(white), Box::new(black));

        assert_eq!(result, GameResult::Forfeit(Side::White));
        assert_eq!(game.num_turns(), 2);
        assert_eq!(game.history().len(), 3);
    }

    #[test]
    fn test_turn_limit() {
        let white = ScriptedPlayer::new(&["11E", "21W", "11E"]);
        let black = ScriptedPlayer::new(&["51W", "41E"]);
        let mut orch = Orchestrator::new(game(), Box::new(white), Box::new(black)).with_max_turns(3);

        assert_eq!(orch.run(), GameResult::Draw);
        assert_eq!(orch.game().num_turns(), 3);
    }
}
