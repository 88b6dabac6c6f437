//! Evaluator system for scoring piece placements and choosing moves.
//!
//! This crate implements a two-level evaluation architecture:
//!
//! 1. **Placement Evaluation** ([`placement_evaluator`]) - Scores a single candidate
//!    placement on the board it would produce.
//!
//! 2. **Move Search** ([`move_search`]) - Enumerates every rotation and column of the
//!    falling piece, scores the legal ones and selects the best.
//!
//! # Architecture
//!
//! ```text
//! Move Search (select best placement)
//!     ↓ uses
//! Placement Evaluation (score single placement)
//!     ↓ uses
//! Placement Analysis (board with the candidate written in)
//! ```
//!
//! # Supporting Modules
//!
//! - [`board_analysis`] - Lazy-evaluated board metrics (heights, holes, completed lines)
//! - [`placement_analysis`] - Board state after writing a candidate placement
//!
//! # Example
//!
//! ```
//! use neuroblox_engine::GameState;
//! use neuroblox_evaluator::{
//!     move_search::MoveSearch, placement_evaluator::HeuristicPlacementEvaluator,
//! };
//!
//! let game = GameState::new();
//! let search = MoveSearch::new(Box::new(HeuristicPlacementEvaluator));
//!
//! if let Some(best) = search.search(game.board(), game.falling_piece()) {
//!     println!("rotate {} times, move to column {}", best.rotation(), best.x());
//! }
//! ```
//!
//! # Current Limitations
//!
//! - **No drop simulation**: candidates are scored at the piece's current row, not
//!   where they would land.
//! - **Fixed weights**: the heuristic weights are constants, not learned.

pub mod board_analysis;
pub mod move_search;
pub mod placement_analysis;
pub mod placement_evaluator;
