//! Flappy Bird game core.
//!
//! The player flaps a bird through a stream of gapped pipes. Gravity pulls
//! the bird down every frame; touching a pipe, the ceiling or the floor ends
//! the run. Everything here is headless: time and randomness come in as
//! arguments, so the whole game can be stepped from tests.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
