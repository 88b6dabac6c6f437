//! Placement evaluation: scoring individual piece placements.
//!
//! A placement is scored on the hypothetical board with the candidate written in (see
//! [`PlacementAnalysis`]). The [`HeuristicPlacementEvaluator`] uses a fixed linear
//! combination of three board metrics:
//!
//! ```text
//! score = 1000 - 10 × max_height + 100 × completed_lines - 50 × holes
//! ```
//!
//! Higher is better. Low stacks and completed rows are rewarded, buried empty cells
//! are penalized.
//!
//! # Usage
//!
//! ```
//! use neuroblox_engine::{Board, Piece, PieceKind, PiecePosition};
//! use neuroblox_evaluator::{
//!     placement_analysis::PlacementAnalysis,
//!     placement_evaluator::{HeuristicPlacementEvaluator, PlacementEvaluator},
//! };
//!
//! let board = Board::standard();
//! let placement = Piece::new(PieceKind::O, PiecePosition::new(0, 18));
//! let analysis = PlacementAnalysis::from_board(&board, placement);
//!
//! let score = HeuristicPlacementEvaluator.evaluate_placement(&analysis);
//! assert_eq!(score, 1000 - 10 * 2);
//! ```

use std::fmt;

use crate::placement_analysis::PlacementAnalysis;

/// Evaluates piece placements by assigning scores.
///
/// Implementations define how to score a placement given its analysis.
pub trait PlacementEvaluator: fmt::Debug + Send + Sync {
    /// Evaluates a placement and returns a score (higher is better).
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> i32;
}

/// Fixed-weight heuristic over maximum height, completed lines and holes.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicPlacementEvaluator;

impl HeuristicPlacementEvaluator {
    pub const BASE_SCORE: i32 = 1000;
    pub const MAX_HEIGHT_PENALTY: i32 = 10;
    pub const COMPLETED_LINE_BONUS: i32 = 100;
    pub const HOLE_PENALTY: i32 = 50;
}

impl PlacementEvaluator for HeuristicPlacementEvaluator {
    #[inline]
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> i32 {
        let board = analysis.board_analysis();
        Self::BASE_SCORE - Self::MAX_HEIGHT_PENALTY * metric(board.max_height())
            + Self::COMPLETED_LINE_BONUS * metric(board.completed_lines())
            - Self::HOLE_PENALTY * metric(board.num_holes())
    }
}

// Metrics are bounded by the board area.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn metric(value: usize) -> i32 {
    value as i32
}
