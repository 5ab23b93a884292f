//! Human player implementation that reads move tokens from a text stream.
//!
//! The player prints the board and prompts for a 3-character token such as `12N`.
//! Unparseable or illegal tokens are reported and the prompt repeats, so the
//! orchestrator only ever sees legal moves. End of input counts as resignation.
//!
//! # Control Flow
//!
//! ```text
//! Orchestrator::request_move()
//!     ↓
//! player.get_move(game)
//!     ↓
//! print board, prompt, read line ──(invalid)──┐
//!     ↓                        ↑              │
//! parse + legality check       └──────────────┘
//!     ↓
//! Some(move) or None on EOF
//! ```

use super::player::{GameResult, Player};
use crate::game::Game;
use crate::game_repr::Move;
use std::io::{self, BufRead, StdinLock};

pub struct HumanPlayer<R> {
    input: R,
    name: String,
}

impl HumanPlayer<StdinLock<'static>> {
    /// Human at the terminal
    pub fn stdin(name: String) -> Self {
        Self::new(io::stdin().lock(), name)
    }
}

impl<R: BufRead> HumanPlayer<R> {
    pub fn new(input: R, name: String) -> Self {
        Self { input, name }
    }

    /// Next non-empty trimmed line, `None` at end of input or on read errors
    fn read_token(&mut self) -> Option<String> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.input.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    let token = line.trim();
                    if !token.is_empty() {
                        return Some(token.to_string());
                    }
                }
                Err(err) => {
                    log::error!("failed to read move: {}", err);
                    return None;
                }
            }
        }
    }
}

impl<R: BufRead> Player for HumanPlayer<R> {
    fn get_move(&mut self, game: &mut Game) -> Option<Move> {
        println!("{}", game.state());
        loop {
            println!("turn #{} ({}), enter move:", game.num_turns(), game.side_to_move());
            let token = self.read_token()?;
            match token.parse::<Move>() {
                Ok(mv) if game.state().is_move_legal(mv) => return Some(mv),
                Ok(_) => println!("Invalid move: {}", token),
                Err(err) => println!("Invalid move: {} ({})", token, err),
            }
        }
    }

    fn opponent_moved(&mut self, mv: Move) {
        println!("Opponent played {}", mv);
    }

    fn game_ended(&mut self, result: GameResult) {
        println!("Game over: {}", result);
    }

    fn name(&self) -> &str {
        &self.name
    }
}
