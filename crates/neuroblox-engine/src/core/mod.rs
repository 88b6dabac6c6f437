//! Board and piece geometry.
//!
//! - [`Board`] - Grid of locked cells with collision testing and line clearing
//! - [`Piece`] - A piece with kind, orientation and position
//! - [`PieceKind`] - The seven-piece catalog in its fixed order
//! - [`PieceShape`] - Rectangular binary mask and its rotation

pub use self::{board::*, piece::*};

pub(crate) mod board;
pub(crate) mod piece;
