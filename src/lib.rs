//! Player and segment model for snake-style grid games.

pub mod config;
pub mod direction;
pub mod logging;
pub mod player;
pub mod script;
