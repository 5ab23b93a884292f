//! Opponent connected through a line-oriented game server.
//!
//! The session opens with `"<game_id> <white|black>\r"` naming the side played
//! locally, after which the server answers with a greeting. From then on
//! each message is a move token terminated by `\r`: local moves are sent as
//! they happen and the opponent's moves are read when it is their turn. A
//! message containing `Timeout` ends the session.

use super::player::{GameResult, Player};
use crate::game::Game;
use crate::game_repr::{Move, Side};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use thiserror::Error;

/// Message terminator used by the game server
const TERMINATOR: u8 = b'\r';

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("failed to connect to game server at {addr}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("game server i/o failed")]
    Io(#[from] io::Error),
    #[error("game server closed the connection")]
    Closed,
}

pub struct RemotePlayer<S: Read + Write> {
    stream: BufReader<S>,
    greeting: String,
    name: String,
}

impl RemotePlayer<TcpStream> {
    /// Connect and register for `game_id`, playing `local_side` on this end
    pub fn connect(host: &str, port: u16, game_id: &str, local_side: Side) -> Result<Self, RemoteError> {
        let addr = format!("{}:{}", host, port);
        let stream = TcpStream::connect(&addr).map_err(|source| RemoteError::Connect {
            addr: addr.clone(),
            source,
        })?;
        log::info!("connected to {}", addr);
        Self::handshake(stream, game_id, local_side)
    }
}

impl<S: Read + Write> RemotePlayer<S> {
    /// Register on an already open stream and wait for the greeting
    pub fn handshake(stream: S, game_id: &str, local_side: Side) -> Result<Self, RemoteError> {
        let mut player = Self {
            stream: BufReader::new(stream),
            greeting: String::new(),
            name: format!("remote ({})", local_side.opposite()),
        };
        player.send(&format!("{} {}", game_id, local_side))?;
        player.greeting = player.receive()?;
        log::info!("server: {}", player.greeting);
        Ok(player)
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Send one message, appending the terminator
    pub fn send(&mut self, message: &str) -> Result<(), RemoteError> {
        let out = self.stream.get_mut();
        out.write_all(message.as_bytes())?;
        out.write_all(&[TERMINATOR])?;
        out.flush()?;
        Ok(())
    }

    /// Read one message without its terminator
    pub fn receive(&mut self) -> Result<String, RemoteError> {
        let mut buf = Vec::new();
        let n = self.stream.read_until(TERMINATOR, &mut buf)?;
        if n == 0 {
            return Err(RemoteError::Closed);
        }
        if buf.last() == Some(&TERMINATOR) {
            buf.pop();
        }
        Ok(String::from_utf8_lossy(&buf).trim().to_string())
    }
}

impl<S: Read + Write> Player for RemotePlayer<S> {
    fn get_move(&mut self, game: &mut Game) -> Option<Move> {
        loop {
            let message = match self.receive() {
                Ok(message) => message,
                Err(err) => {
                    log::error!("{}", err);
                    return None;
                }
            };
            if message.contains("Timeout") {
                log::warn!("server reported timeout");
                return None;
            }
            log::info!("received: {}", message);
            match message.parse::<Move>() {
                Ok(mv) if game.state().is_move_legal(mv) => return Some(mv),
                _ => log::warn!("ignoring invalid move from server: {:?}", message),
            }
        }
    }

    fn opponent_moved(&mut self, mv: Move) {
        log::info!("sending: {}", mv);
        if let Err(err) = self.send(&mv.to_string()) {
            log::error!("failed to send move {}: {}", mv, err);
        }
    }

    fn game_ended(&mut self, result: GameResult) {
        log::info!("remote game finished: {}", result);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ai::SearchConfig;
    use crate::game_repr::{BoardSize, Direction};
    use std::io::Cursor;

    /// In-memory duplex: reads from a script, records writes
    struct Scripted {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
    }

    impl Scripted {
        fn new(script: &str) -> Self {
            Self { input: Cursor::new(script.as_bytes().to_vec()), output: Vec::new() }
        }
    }

    impl Read for Scripted {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for Scripted {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_handshake_and_moves() {
        let stream = Scripted::new("hello game 7\r51W\r");
        let mut remote = RemotePlayer::handshake(stream, "7", Side::White).unwrap();
        assert_eq!(remote.greeting(), "hello game 7");
        assert_eq!(remote.name(), "remote (black)");

        let mut game = Game::new(BoardSize::SMALL, SearchConfig::with_depth(1));
        remote.opponent_moved(Move::new(1, 1, Direction::E));
        assert!(game.apply_token("11E"));

        assert_eq!(remote.get_move(&mut game), Some(Move::new(5, 1, Direction::W)));
        let sent = String::from_utf8(remote.stream.get_ref().output.clone()).unwrap();
        assert_eq!(sent, "7 white\r11E\r");
    }

    #[test]
    fn test_timeout_and_close_end_session() {
        let mut game = Game::new(BoardSize::SMALL, SearchConfig::with_depth(1));

        let mut remote = RemotePlayer::handshake(Scripted::new("hi\rTimeout\r"), "1", Side::Black).unwrap();
        assert_eq!(remote.get_move(&mut game), None);

        let mut remote = RemotePlayer::handshake(Scripted::new("hi\r99Q\r"), "1", Side::Black).unwrap();
        assert_eq!(remote.get_move(&mut game), None);
    }

    #[test]
    fn test_handshake_on_closed_stream() {
        let err = RemotePlayer::handshake(Scripted::new(""), "1", Side::White).err().unwrap();
        assert!(matches!(err, RemoteError::Closed));
    }
}
