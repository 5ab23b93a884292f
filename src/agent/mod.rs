pub mod player;
pub use player::*;

pub mod human_player;
pub use human_player::*;

pub mod engine_player;
pub use engine_player::*;

pub mod remote_player;
pub use remote_player::*;

pub mod ai;
pub use ai::{AIType, SearchConfig, SearchResult, TranspositionTable};
