//! Football match simulation library.
//!
//! The spatial engine (agents, ball, collisions, match loop) and the
//! statistical outcome simulator, exposed for tests and binaries.

pub mod agent;
pub mod ball;
pub mod collision;
pub mod config;
pub mod decision;
pub mod error;
pub mod feed;
pub mod game_loop;
pub mod goal;
pub mod outcome;
pub mod protocol;
pub mod squad;
pub mod state;
pub mod tactics;

pub use football_shared::vec2;
