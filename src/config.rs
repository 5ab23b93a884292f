//! Game configuration types built from the command line.
//!
//! A [`GameConfig`] carries everything needed to start a game: board size,
//! who plays each side, search settings and the optional table file.

use crate::agent::ai::{AIType, SearchConfig};
use crate::agent::engine_player::Difficulty;
use crate::agent::human_player::HumanPlayer;
use crate::agent::player::Player;
use crate::game::Game;
use crate::game_repr::{BoardSize, Side};
use std::path::PathBuf;

/// Configuration for a single player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerConfig {
    /// Human entering tokens at the console
    Human,
    /// Local engine
    AI { ai: AIType, difficulty: Difficulty },
    /// Opponent behind the game server
    Remote,
}

impl PlayerConfig {
    /// Build a player that needs no external connection.
    /// Returns `None` for [`PlayerConfig::Remote`].
    pub fn create_local_player(&self, side: Side) -> Option<Box<dyn Player>> {
        match self {
            PlayerConfig::Human => Some(Box::new(HumanPlayer::stdin(format!("Human ({})", side)))),
            PlayerConfig::AI { ai, difficulty } => Some(ai.create_player(*difficulty)),
            PlayerConfig::Remote => None,
        }
    }
}

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// One human, one engine
    PvAI,
    /// Engine against itself
    AIvAI,
    /// Local engine against a game-server opponent
    Server,
}

/// Complete game configuration.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub mode: GameMode,
    pub size: BoardSize,
    pub white_player: PlayerConfig,
    pub black_player: PlayerConfig,
    pub search: SearchConfig,
    /// Transposition table loaded before and saved after the game
    pub table_path: Option<PathBuf>,
    /// Seed for the tie-breaking RNG
    pub seed: Option<u64>,
}

impl GameConfig {
    fn with_players(mode: GameMode, white_player: PlayerConfig, black_player: PlayerConfig) -> Self {
        let depth = [white_player, black_player]
            .iter()
            .find_map(|p| match p {
                PlayerConfig::AI { difficulty, .. } => Some(difficulty.max_depth()),
                _ => None,
            })
            .unwrap_or(Difficulty::default().max_depth());
        Self {
            mode,
            size: BoardSize::default(),
            white_player,
            black_player,
            search: SearchConfig::with_depth(depth),
            table_path: None,
            seed: None,
        }
    }

    /// Create a PvAI game configuration.
    ///
    /// # Arguments
    /// * `engine_side` - The side the engine plays; the human takes the other
    /// * `difficulty` - The engine's strength
    pub fn pvai(engine_side: Side, difficulty: Difficulty) -> Self {
        let engine = PlayerConfig::AI { ai: AIType::Negamax, difficulty };
        let (white, black) = match engine_side {
            Side::White => (engine, PlayerConfig::Human),
            Side::Black => (PlayerConfig::Human, engine),
        };
        Self::with_players(GameMode::PvAI, white, black)
    }

    /// Create an AIvAI game configuration.
    pub fn aivai(white_difficulty: Difficulty, black_difficulty: Difficulty) -> Self {
        Self::with_players(
            GameMode::AIvAI,
            PlayerConfig::AI { ai: AIType::Negamax, difficulty: white_difficulty },
            PlayerConfig::AI { ai: AIType::Negamax, difficulty: black_difficulty },
        )
    }

    /// Create a game-server configuration with the engine on `local_side`.
    pub fn server(local_side: Side, difficulty: Difficulty) -> Self {
        let engine = PlayerConfig::AI { ai: AIType::Negamax, difficulty };
        let (white, black) = match local_side {
            Side::White => (engine, PlayerConfig::Remote),
            Side::Black => (PlayerConfig::Remote, engine),
        };
        Self::with_players(GameMode::Server, white, black)
    }

    /// Switch every local engine to `ai`
    pub fn with_ai(mut self, ai: AIType) -> Self {
        for player in [&mut self.white_player, &mut self.black_player] {
            if let PlayerConfig::AI { ai: kind, .. } = player {
                *kind = ai;
            }
        }
        self
    }

    pub fn with_size(mut self, size: BoardSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_table(mut self, path: Option<PathBuf>) -> Self {
        self.table_path = path;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn player(&self, side: Side) -> PlayerConfig {
        match side {
            Side::White => self.white_player,
            Side::Black => self.black_player,
        }
    }

    /// Get the human player's side in a PvAI game.
    /// Returns None for the other modes.
    pub fn human_side(&self) -> Option<Side> {
        match self.mode {
            GameMode::PvAI => Side::ALL
                .into_iter()
                .find(|&side| self.player(side) == PlayerConfig::Human),
            _ => None,
        }
    }

    /// Fresh game for this configuration, without the table loaded
    pub fn new_game(&self) -> Game {
        let mut game = Game::new(self.size, self.search);
        if let Some(seed) = self.seed {
            game.search_mut().seed(seed);
        }
        game
    }
}
