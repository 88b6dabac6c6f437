use std::fmt;

use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceKind};

/// A single cell of the board.
///
/// Locked cells remember which kind of piece filled them. The engine itself only
/// distinguishes empty from non-empty; the kind is kept for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell filled by a locked piece of the given kind.
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Returns the numeric cell value: 0 for empty, the kind's identifier otherwise.
    #[must_use]
    pub fn id(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Piece(kind) => kind.id(),
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Piece(kind) => kind.as_char(),
        }
    }

    /// Parses a cell character.
    ///
    /// `.` is empty, a kind letter is that kind, and `#` is shorthand for an
    /// occupied cell (stored as [`PieceKind::I`]).
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::Piece(PieceKind::I)),
            _ => PieceKind::from_char(c).map(Cell::Piece),
        }
    }
}

/// The grid of locked cells.
///
/// Rows are indexed from the top (`y = 0`) to the bottom (`y = height - 1`),
/// columns from the left (`x = 0`).
///
/// # Bounds
///
/// Queries take signed coordinates so that pieces partially outside the grid can be
/// tested directly:
///
/// - columns outside `[0, width)` and rows at or below `height` count as occupied
///   (walls and floor)
/// - rows above the top (`y < 0`) count as empty, so a spawning piece may hang over
///   the top edge
///
/// Cloning a board produces an independent copy; the search and evaluator only ever
/// work on such copies.
///
/// # Example
///
/// ```
/// use neuroblox_engine::{Board, Piece, PieceKind, PiecePosition};
///
/// let mut board = Board::standard();
/// let piece = Piece::new(PieceKind::O, PiecePosition::new(0, 18));
/// assert!(!board.is_colliding(&piece));
/// board.fill_piece(&piece);
/// assert!(board.is_colliding(&piece));
/// assert_eq!(board.max_height(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: one string per row, top to bottom (e.g., "..II..OO..")
        serializer.collect_seq(self.rows().map(row_to_string))
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 || height == 0 {
            return Err(serde::de::Error::custom("board must have at least one cell"));
        }

        let mut board = Board::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            let row_width = row.chars().count();
            if row_width != width {
                return Err(serde::de::Error::custom(format!(
                    "row {y} has {row_width} cells, expected {width}"
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let cell = Cell::from_char(c).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid cell '{c}' at ({x}, {y})"))
                })?;
                board.cells[y * width + x] = cell;
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", row_to_string(row))?;
        }
        Ok(())
    }
}

fn row_to_string(row: &[Cell]) -> String {
    row.iter().map(|cell| cell.as_char()).collect()
}

impl Board {
    pub const STANDARD_WIDTH: usize = 10;
    pub const STANDARD_HEIGHT: usize = 20;

    /// Creates an empty board of the given size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be non-zero");
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Creates an empty 10×20 board.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Self::STANDARD_WIDTH, Self::STANDARD_HEIGHT)
    }

    /// Creates a standard board from ASCII art for tests and setups.
    ///
    /// See [`Self::from_ascii_sized`].
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        Self::from_ascii_sized(Self::STANDARD_WIDTH, Self::STANDARD_HEIGHT, art)
    }

    /// Creates a board from ASCII art.
    ///
    /// Each non-blank line is one row; `.` is empty, `#` or a kind letter is occupied.
    /// Other characters (such as indentation) are ignored. Rows are aligned to the
    /// bottom of the board, so only the interesting bottom rows need to be drawn.
    ///
    /// # Panics
    ///
    /// Panics if a row does not have exactly `width` cells or there are more than
    /// `height` rows.
    #[must_use]
    pub fn from_ascii_sized(width: usize, height: usize, art: &str) -> Self {
        let mut board = Self::new(width, height);
        let lines: Vec<Vec<Cell>> = art
            .lines()
            .map(|line| line.chars().filter_map(Cell::from_char).collect::<Vec<_>>())
            .filter(|cells| !cells.is_empty())
            .collect();
        assert!(
            lines.len() <= height,
            "Board has {height} rows, got {}",
            lines.len()
        );

        let top = height - lines.len();
        for (i, cells) in lines.iter().enumerate() {
            assert_eq!(
                cells.len(),
                width,
                "Each row must have exactly {width} cells, got {} at row {i}",
                cells.len(),
            );
            let y = top + i;
            board.cells[y * width..][..width].copy_from_slice(cells);
        }
        board
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns a deep copy for speculative evaluation.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    /// Returns row `y`, counted from the top.
    ///
    /// # Panics
    ///
    /// Panics if `y` is not below [`Self::height`].
    #[must_use]
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.width..][..self.width]
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|x| *x < self.width)?;
        let y = usize::try_from(y).ok().filter(|y| *y < self.height)?;
        Some(y * self.width + x)
    }

    /// Returns the cell at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Checks whether `(x, y)` blocks a piece cell.
    ///
    /// Walls and the floor are occupied; the space above the top row is empty.
    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        if !(0..to_coord(self.width)).contains(&x) || y >= to_coord(self.height) {
            return true;
        }
        self.cell(x, y).is_some_and(|cell| !cell.is_empty())
    }

    /// Checks if the piece hits a wall, the floor or a locked cell.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        piece
            .occupied_positions()
            .any(|(x, y)| self.is_occupied(x, y))
    }

    /// Writes the piece's kind into every cell it covers on the grid.
    ///
    /// Cells above the top row are dropped. The piece must not collide.
    pub fn fill_piece(&mut self, piece: &Piece) {
        debug_assert!(!self.is_colliding(piece), "filling a colliding piece");
        for (x, y) in piece.occupied_positions() {
            if let Some(i) = self.index(x, y) {
                self.cells[i] = Cell::Piece(piece.kind());
            }
        }
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// All filled rows are removed in a single pass, the remaining rows keep their
    /// relative order, and the same number of empty rows appears at the top.
    pub fn clear_lines(&mut self) -> usize {
        let width = self.width;
        let mut count = 0;

        for y in (0..self.height).rev() {
            if self.is_row_filled(y) {
                count += 1;
                continue;
            }
            if count > 0 {
                let src = y * width;
                self.cells.copy_within(src..src + width, src + count * width);
            }
        }

        self.cells[..count * width].fill(Cell::Empty);
        count
    }

    fn is_row_filled(&self, y: usize) -> bool {
        self.row(y).iter().all(|cell| !cell.is_empty())
    }

    /// Returns the number of rows whose cells are all occupied.
    #[must_use]
    pub fn num_filled_rows(&self) -> usize {
        (0..self.height).filter(|y| self.is_row_filled(*y)).count()
    }

    /// Returns, per column, `height - y` of its topmost occupied cell (0 if empty).
    #[must_use]
    pub fn column_heights(&self) -> Vec<usize> {
        (0..self.width)
            .map(|x| {
                (0..self.height)
                    .find(|y| !self.cells[y * self.width + x].is_empty())
                    .map_or(0, |y| self.height - y)
            })
            .collect()
    }

    /// Returns the height of the tallest column (0 for an empty board).
    #[must_use]
    pub fn max_height(&self) -> usize {
        self.column_heights().into_iter().max().unwrap_or(0)
    }

    /// Counts empty cells lying below the first occupied cell of their column.
    #[must_use]
    pub fn num_holes(&self) -> usize {
        (0..self.width)
            .map(|x| {
                (0..self.height)
                    .map(|y| self.cells[y * self.width + x])
                    .skip_while(|cell| cell.is_empty())
                    .filter(|cell| cell.is_empty())
                    .count()
            })
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }
}

fn to_coord(n: usize) -> i32 {
    super::piece::to_coord(n)
}

#[cfg(test)]
mod tests {
    use crate::PiecePosition;

    use super::*;

    fn fill_row(board: &mut Board, y: usize, kind: PieceKind) {
        let width = board.width;
        board.cells[y * width..][..width].fill(Cell::Piece(kind));
    }

    #[test]
    fn test_initial_board() {
        let board = Board::standard();
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 20);
        assert!(board.is_empty());
        assert_eq!(board.rows().count(), 20);
        assert!(board.rows().all(|row| row.len() == 10));
    }

    #[test]
    fn test_is_occupied_bounds() {
        let board = Board::standard();
        assert!(board.is_occupied(-1, 5));
        assert!(board.is_occupied(10, 5));
        assert!(board.is_occupied(3, 20));
        assert!(!board.is_occupied(3, -1));
        assert!(board.is_occupied(-1, -1));
        assert!(!board.is_occupied(0, 0));
        assert!(!board.is_occupied(9, 19));
        assert_eq!(board.cell(3, -1), None);
        assert_eq!(board.cell(0, 0), Some(Cell::Empty));
    }

    #[test]
    fn test_colliding_outside_grid() {
        let board = Board::standard();
        let i = Piece::new(PieceKind::I, PiecePosition::new(7, 0));
        assert!(board.is_colliding(&i));
        let i = Piece::new(PieceKind::I, PiecePosition::new(-1, 0));
        assert!(board.is_colliding(&i));
        let o = Piece::new(PieceKind::O, PiecePosition::new(0, 19));
        assert!(board.is_colliding(&o));
        let i = Piece::new(PieceKind::I, PiecePosition::new(6, 19));
        assert!(!board.is_colliding(&i));
    }

    #[test]
    fn test_piece_above_top_checks_columns_only() {
        let mut board = Board::standard();
        fill_row(&mut board, 0, PieceKind::O);
        let vertical_i = Piece::new(PieceKind::I, PiecePosition::new(0, -4)).rotated_right();
        assert!(!board.is_colliding(&vertical_i));
        assert!(board.is_colliding(&vertical_i.translated(0, 1)));
        assert!(board.is_colliding(&vertical_i.translated(-1, 0)));
    }

    #[test]
    fn test_lock_then_collides_with_itself() {
        for kind in PieceKind::ALL {
            let mut board = Board::standard();
            let piece = Piece::spawn(kind, board.width()).translated(0, 10);
            assert!(!board.is_colliding(&piece));
            board.fill_piece(&piece);
            assert!(board.is_colliding(&piece), "{kind:?}");
        }
    }

    #[test]
    fn test_fill_piece_writes_kind_and_skips_hidden_rows() {
        let mut board = Board::standard();
        let t = Piece::new(PieceKind::T, PiecePosition::new(2, -1));
        board.fill_piece(&t);
        assert_eq!(board.cell(2, 0), Some(Cell::Piece(PieceKind::T)));
        assert_eq!(board.cell(3, 0), Some(Cell::Piece(PieceKind::T)));
        assert_eq!(board.cell(4, 0), Some(Cell::Piece(PieceKind::T)));
        assert_eq!(board.cell(3, 0).map(Cell::id), Some(PieceKind::T.id()));
        assert_eq!(board.rows().flatten().filter(|c| !c.is_empty()).count(), 3);
    }

    #[test]
    fn test_clear_lines_single_line() {
        let mut board = Board::standard();
        fill_row(&mut board, 0, PieceKind::I);
        assert_eq!(board.clear_lines(), 1);
        assert!(board.is_empty());
    }

    #[test]
    fn test_clear_lines_preserves_order_of_remaining_rows() {
        let mut board = Board::from_ascii(
            r"
            T.........
            ##########
            .S........
            IIIIIIIIII
            ..Z.......
            ",
        );
        let cleared = board.clear_lines();
        assert_eq!(cleared, 2);
        assert_eq!(board.height(), 20);

        let expected = Board::from_ascii(
            r"
            T.........
            .S........
            ..Z.......
            ",
        );
        assert_eq!(board, expected);
    }

    #[test]
    fn test_clear_lines_with_partial_lines() {
        let mut board = Board::from_ascii(
            r"
            #########.
            ",
        );
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board.row(19).iter().filter(|c| !c.is_empty()).count(), 9);
    }

    #[test]
    fn test_clear_lines_all_filled() {
        let mut board = Board::standard();
        for y in 0..board.height() {
            fill_row(&mut board, y, PieceKind::L);
        }
        assert_eq!(board.clear_lines(), 20);
        assert!(board.is_empty());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let board = Board::standard();
        let mut copy = board.snapshot();
        copy.fill_piece(&Piece::new(PieceKind::O, PiecePosition::new(0, 0)));
        assert!(board.is_empty());
        assert!(!copy.is_empty());
    }

    #[test]
    fn test_column_heights_and_holes() {
        let board = Board::from_ascii(
            r"
            .#........
            ..........
            .#...#....
            ##..##....
            ",
        );
        assert_eq!(board.column_heights(), vec![1, 4, 0, 0, 1, 2, 0, 0, 0, 0]);
        assert_eq!(board.max_height(), 4);
        // column 1 reads (filled, empty, filled, filled)
        assert_eq!(board.num_holes(), 1);
    }

    #[test]
    fn test_hole_pattern_empty_filled_empty_filled() {
        let board = Board::from_ascii(
            r"
            ..........
            #.........
            ..........
            #.........
            ",
        );
        assert_eq!(board.num_holes(), 1);
    }

    #[test]
    fn test_num_filled_rows() {
        let board = Board::from_ascii(
            r"
            ##########
            #.########
            ##########
            ",
        );
        assert_eq!(board.num_filled_rows(), 2);
    }

    #[test]
    fn test_custom_dimensions() {
        let mut board = Board::from_ascii_sized(
            4,
            6,
            r"
            ###.
            ",
        );
        assert_eq!(board.width(), 4);
        let i = Piece::spawn(PieceKind::I, 4).rotated_right().moved_to(PiecePosition::new(3, 2));
        assert!(!board.is_colliding(&i));
        board.fill_piece(&i);
        assert_eq!(board.clear_lines(), 1);
        assert_eq!(board.column_heights(), vec![0, 0, 0, 3]);
    }

    #[test]
    fn test_board_serialization() {
        let board = Board::from_ascii(
            r"
            ....O.....
            ..TTT.JJJ.
            ",
        );
        let value = serde_json::to_value(&board).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 20);
        assert_eq!(rows[0], "..........");
        assert_eq!(rows[18], "....O.....");
        assert_eq!(rows[19], "..TTT.JJJ.");

        let deserialized: Board = serde_json::from_value(value).unwrap();
        assert_eq!(deserialized, board);
    }

    #[test]
    fn test_board_deserialization_errors() {
        assert!(serde_json::from_str::<Board>("[]").is_err());
        assert!(serde_json::from_str::<Board>(r#"["...", ".."]"#).is_err());
        assert!(serde_json::from_str::<Board>(r#"["..X"]"#).is_err());
    }
}
