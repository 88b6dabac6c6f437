use std::cell::OnceCell;

use neuroblox_engine::Board;

/// Lazily computed metrics of a board.
///
/// Each metric is computed on first access and cached, so evaluators only pay for
/// what they read.
#[derive(Debug)]
pub struct BoardAnalysis {
    board: Board,
    column_heights: OnceCell<Vec<usize>>,
    max_height: OnceCell<usize>,
    num_holes: OnceCell<usize>,
    completed_lines: OnceCell<usize>,
}

impl BoardAnalysis {
    /// Takes ownership of a board snapshot to analyze.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            board,
            column_heights: OnceCell::new(),
            max_height: OnceCell::new(),
            num_holes: OnceCell::new(),
            completed_lines: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self::new(board.snapshot())
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Height of each column: `height - y` of its topmost occupied cell, or 0.
    #[must_use]
    pub fn column_heights(&self) -> &[usize] {
        self.column_heights
            .get_or_init(|| self.board.column_heights())
    }

    /// Tallest column height, 0 on an empty board.
    #[must_use]
    pub fn max_height(&self) -> usize {
        *self.max_height.get_or_init(|| {
            self.column_heights()
                .iter()
                .copied()
                .max()
                .unwrap_or_default()
        })
    }

    /// Empty cells lying below the topmost occupied cell of their column.
    #[must_use]
    pub fn num_holes(&self) -> usize {
        *self.num_holes.get_or_init(|| self.board.num_holes())
    }

    /// Rows whose every cell is occupied.
    ///
    /// The rows are not removed; the analysis reflects the board as written.
    #[must_use]
    pub fn completed_lines(&self) -> usize {
        *self
            .completed_lines
            .get_or_init(|| self.board.num_filled_rows())
    }
}
