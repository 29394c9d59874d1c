//! Flappy - Terminal Flappy Bird Library
//!
//! This module exposes the game logic for testing and external use.

pub mod config;
pub mod constants;
pub mod driver;
pub mod game;
pub mod high_score;
pub mod logging;
pub mod utils;

// UI module is not exposed as it's tightly coupled to the terminal
mod ui;

pub use config::GameConfig;
pub use constants::*;
pub use game::{GameInput, GamePhase, GameSession, TickEvents};
pub use high_score::{FileScoreStore, MemoryScoreStore, ScoreStore};
