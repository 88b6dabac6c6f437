//! Move search: selecting the best placement for the falling piece.
//!
//! # How It Works
//!
//! 1. **Enumerate Placements** - For each of the four rotations (counted clockwise
//!    from the piece's current orientation) and each column offset `x` in
//!    `[-3, width + 3)`, place the rotated shape at `(x, y)`, where `y` is the row
//!    the piece currently occupies
//! 2. **Filter** - Discard candidates that collide with the board
//! 3. **Score Each Placement** - Use a [`PlacementEvaluator`] on the board with the
//!    candidate written in
//! 4. **Select Best** - Keep the highest score; ties go to the first candidate in
//!    enumeration order (rotation ascending, then `x` ascending)
//!
//! # Design: No Drop Simulation
//!
//! Candidates are scored where they stand, at the piece's current row, without
//! simulating where they would land. The search is a greedy one-step lookahead over
//! at most `4 × (width + 6)` candidates.
//!
//! # Usage
//!
//! ```
//! use neuroblox_engine::{Board, Piece, PieceKind};
//! use neuroblox_evaluator::move_search::MoveSearch;
//!
//! let board = Board::standard();
//! let piece = Piece::spawn(PieceKind::O, board.width());
//!
//! let best = MoveSearch::default().select_best_move(&board, &piece);
//! assert_eq!((best.rotation(), best.x(), best.score()), (0, 0, -1000));
//! ```

use neuroblox_engine::{Board, Piece, PiecePosition};
use serde::Serialize;

use crate::{
    placement_analysis::PlacementAnalysis,
    placement_evaluator::{HeuristicPlacementEvaluator, PlacementEvaluator},
};

/// Number of distinct rotations tried per piece.
pub const ROTATIONS: u8 = 4;

/// Columns tried beyond each side of the board.
pub const SEARCH_MARGIN: i32 = 3;

/// A candidate placement and its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Move {
    rotation: u8,
    x: i32,
    placement: Piece,
    score: i32,
}

impl Move {
    /// The move returned when no candidate is legal: rotation 0, `x = width / 2`,
    /// score 0.
    #[must_use]
    pub fn fallback(board: &Board, piece: &Piece) -> Self {
        let x = to_coord(board.width() / 2);
        Self {
            rotation: 0,
            x,
            placement: piece.moved_to(PiecePosition::new(x, piece.position().y())),
            score: 0,
        }
    }

    /// Clockwise rotations to apply to the piece's current orientation.
    #[must_use]
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Target column of the shape's left edge (may be negative).
    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// The piece as it would stand after the move.
    #[must_use]
    pub fn placement(&self) -> &Piece {
        &self.placement
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }
}

/// Enumerates and scores every placement of a piece at its current row.
#[derive(Debug)]
pub struct MoveSearch<'a> {
    placement_evaluator: Box<dyn PlacementEvaluator + 'a>,
}

impl Default for MoveSearch<'_> {
    fn default() -> Self {
        Self::new(Box::new(HeuristicPlacementEvaluator))
    }
}

impl<'a> MoveSearch<'a> {
    #[must_use]
    pub fn new(placement_evaluator: Box<dyn PlacementEvaluator + 'a>) -> Self {
        Self {
            placement_evaluator,
        }
    }

    /// Returns every legal candidate, scored, in enumeration order.
    #[must_use]
    pub fn candidates(&self, board: &Board, piece: &Piece) -> Vec<Move> {
        let y = piece.position().y();
        let x_range = -SEARCH_MARGIN..to_coord(board.width()) + SEARCH_MARGIN;

        let mut candidates = vec![];
        for (rotation, rotated) in (0..ROTATIONS).zip(piece.rotations()) {
            for x in x_range.clone() {
                let placement = rotated.moved_to(PiecePosition::new(x, y));
                if board.is_colliding(&placement) {
                    continue;
                }
                let analysis = PlacementAnalysis::from_board(board, placement);
                let score = self.placement_evaluator.evaluate_placement(&analysis);
                candidates.push(Move {
                    rotation,
                    x,
                    placement,
                    score,
                });
            }
        }
        candidates
    }

    /// Returns the highest-scoring legal candidate, or `None` if nothing fits.
    #[must_use]
    pub fn search(&self, board: &Board, piece: &Piece) -> Option<Move> {
        let mut best: Option<Move> = None;
        for candidate in self.candidates(board, piece) {
            if best.is_none_or(|best| candidate.score > best.score) {
                best = Some(candidate);
            }
        }
        tracing::trace!(?best, "move search finished");
        best
    }

    /// Like [`Self::search`], but falls back to [`Move::fallback`] when nothing fits.
    #[must_use]
    pub fn select_best_move(&self, board: &Board, piece: &Piece) -> Move {
        self.search(board, piece)
            .unwrap_or_else(|| Move::fallback(board, piece))
    }
}

fn to_coord(n: usize) -> i32 {
    i32::try_from(n).expect("board width should fit in i32")
}
