//! Implementation of chess rules: board model, piece movement and the game
//! state machine built on top of them.

mod attacks;
pub mod board;
pub mod core;
pub mod error;
pub mod game;
