pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Returned when a piece would leave the board or overlap a locked block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece out of bounds or colliding with locked blocks")]
pub struct PieceCollisionError;
