//! Snake on a toroidal grid.
//!
//! [`game::GameState`] is the whole simulation: a snake that advances one
//! cell per [`tick`](game::GameState::tick), wraps around the grid edges,
//! grows on food and stops for good when it runs into itself. The remaining
//! modules are a thin terminal front end that samples that state and
//! forwards key presses as heading changes.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
