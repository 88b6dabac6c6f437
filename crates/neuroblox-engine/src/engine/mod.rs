//! Game engine logic and state management.
//!
//! This module drives the core data structures through a game:
//!
//! - [`GameState`] - Board, falling piece, next piece, session state and event queue
//! - [`GameStats`] - Score, level, lines cleared and piece count
//! - [`GameEvent`] - Notifications queued for observers (locks, clears, spawns, game over)
//! - [`PieceGenerator`] - Uniform random piece generation
//! - [`PieceSeed`] - Seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Create a [`GameState`], optionally with a seed
//! 2. The player or the assistant moves and rotates the falling piece
//! 3. The host calls [`GameState::step`] at its own cadence, or hard drops
//! 4. A blocked downward move locks the piece, clears lines and spawns the next piece
//! 5. Repeat until the spawned piece collides (game over)
//!
//! # Example
//!
//! ```
//! use neuroblox_engine::GameState;
//!
//! let mut game = GameState::new();
//!
//! game.move_piece(-1, 0);
//! game.rotate();
//! game.hard_drop();
//!
//! for event in game.take_events() {
//!     if event.is_game_over() {
//!         println!("Game over!");
//!     }
//! }
//! ```

pub use self::{event::*, game_state::*, game_stats::*, piece_generator::*};

mod event;
mod game_state;
mod game_stats;
mod piece_generator;
