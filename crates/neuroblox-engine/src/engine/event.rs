use serde::Serialize;

use crate::{Piece, PieceKind};

/// Notification queued by [`GameState`](super::GameState) whenever something
/// observable happens.
///
/// Events are appended in the order they occur and stay queued until the host drains
/// them with [`GameState::take_events`](super::GameState::take_events). A single
/// blocked downward move can queue `PieceLocked`, `LinesCleared`, `PieceSpawned`
/// and `GameOver` in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// The falling piece was written into the board.
    PieceLocked { piece: Piece },
    /// One or more full rows were removed.
    LinesCleared {
        count: usize,
        /// Score after the clear was applied.
        score: usize,
        /// Level after the clear was applied.
        level: usize,
    },
    /// A new falling piece appeared at the spawn position.
    PieceSpawned { piece: Piece, next: PieceKind },
    /// The spawned piece collided; the game is over.
    GameOver { score: usize },
    /// The game was reset to its initial state.
    Reset,
    PauseToggled { paused: bool },
}
