//! Analysis of a hypothetical board with a candidate placement written in.
//!
//! [`PlacementAnalysis`] locks the candidate into a snapshot of the board and exposes
//! the resulting [`BoardAnalysis`]. Full rows are **not** cleared: they stay on the
//! board and are reported by [`BoardAnalysis::completed_lines`], so evaluators see
//! the placement exactly as written.
//!
//! # Usage
//!
//! ```
//! use neuroblox_engine::{Board, Piece, PieceKind, PiecePosition};
//! use neuroblox_evaluator::placement_analysis::PlacementAnalysis;
//!
//! let board = Board::standard();
//! let placement = Piece::new(PieceKind::I, PiecePosition::new(0, 19));
//! let analysis = PlacementAnalysis::from_board(&board, placement);
//!
//! assert_eq!(analysis.board_analysis().max_height(), 1);
//! assert_eq!(analysis.board_analysis().num_holes(), 0);
//! ```

use neuroblox_engine::{Board, Piece};

use crate::board_analysis::BoardAnalysis;

#[derive(Debug)]
pub struct PlacementAnalysis {
    placement: Piece,
    board_analysis: BoardAnalysis,
}

impl PlacementAnalysis {
    /// Writes `placement` into a snapshot of `before_placement`.
    ///
    /// The placement must not collide with the board.
    #[must_use]
    pub fn from_board(before_placement: &Board, placement: Piece) -> Self {
        let mut board = before_placement.snapshot();
        board.fill_piece(&placement);

        Self {
            placement,
            board_analysis: BoardAnalysis::new(board),
        }
    }

    #[must_use]
    pub fn placement(&self) -> &Piece {
        &self.placement
    }

    #[must_use]
    pub fn completed_lines(&self) -> usize {
        self.board_analysis.completed_lines()
    }

    #[must_use]
    pub fn board_analysis(&self) -> &BoardAnalysis {
        &self.board_analysis
    }
}

#[cfg(test)]
mod tests {
    use neuroblox_engine::{PieceKind, PiecePosition};

    use super::*;

    #[test]
    fn test_input_board_is_untouched() {
        let board = Board::standard();
        let placement = Piece::new(PieceKind::O, PiecePosition::new(4, 18));
        let analysis = PlacementAnalysis::from_board(&board, placement);

        assert!(board.is_empty());
        assert_eq!(analysis.placement(), &placement);
        assert_eq!(analysis.board_analysis().max_height(), 2);
    }

    #[test]
    fn test_full_rows_are_kept() {
        let board = Board::from_ascii(
            "
            ....######
            ",
        );
        let placement = Piece::new(PieceKind::I, PiecePosition::new(0, 19));
        let analysis = PlacementAnalysis::from_board(&board, placement);

        assert_eq!(analysis.completed_lines(), 1);
        assert_eq!(analysis.board_analysis().max_height(), 1);
        assert_eq!(analysis.board_analysis().board().num_filled_rows(), 1);
    }
}
