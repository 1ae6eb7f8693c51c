//! Game rules layered on top of [`crate::core`].
//!
//! [`GameField`] owns the board and the falling piece, [`GameSession`] adds scoring,
//! the drop schedule and the playing/game-over state around it.

pub use self::{
    drop_schedule::*, game_field::*, game_session::*, game_stats::*, piece_generator::*,
};

mod drop_schedule;
mod game_field;
mod game_session;
mod game_stats;
mod piece_generator;
