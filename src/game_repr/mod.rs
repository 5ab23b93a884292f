mod moves;
mod piece;
mod key;
mod position;
pub mod combinations;

#[cfg(test)]
mod tests;

pub use moves::*;
pub use piece::*;
pub use key::*;
pub use position::*;
