//! Heuristic assistant driving a [`GameState`](neuroblox_engine::GameState).
//!
//! The [`Assistant`] runs in one of three [`AssistantMode`]s:
//!
//! - **Hint** - Suggests the best move for the falling piece, periodically
//! - **Auto** - Plays the best move itself, one piece per scheduled tick
//! - **Predict** - Shows rough estimates for the next pieces in catalog order
//!
//! It also answers free-text commands ([`CommandIntent`]) with read-only reports
//! about the game.
//!
//! # Scheduling
//!
//! The assistant never sleeps or spawns timers. The host asks for the next
//! [`ScheduledTick`] with [`Assistant::schedule`], waits for its delay on its own
//! clock, then hands the tick's token back to [`Assistant::run_scheduled`]. Changing
//! the mode or deactivating invalidates every outstanding token, and nothing more is
//! scheduled once a run finds the game over.
//!
//! # Example
//!
//! ```
//! use neuroblox_assistant::{Assistant, AssistantMode};
//! use neuroblox_engine::GameState;
//!
//! let mut game = GameState::new();
//! let mut assistant = Assistant::new();
//! assistant.activate();
//! assistant.set_mode(AssistantMode::AutoPlay, &game);
//!
//! while let Some(tick) = assistant.schedule() {
//!     // a real host would wait `tick.delay()` here
//!     assistant.run_scheduled(tick.token(), &mut game);
//!     if game.stats().completed_pieces() >= 10 {
//!         break;
//!     }
//! }
//! ```

pub use self::{assistant::*, command::*, config::*, prediction::*, report::*, schedule::*};

mod assistant;
mod command;
mod config;
mod prediction;
mod report;
mod schedule;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown assistant mode: {_0:?} (expected hint, auto or predict)")]
pub struct ParseAssistantModeError(#[error(not(source))] String);
