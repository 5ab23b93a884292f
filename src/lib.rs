pub mod agent;
pub mod config;
pub mod game;
pub mod game_repr;
pub mod orchestrator;
pub mod populate;
