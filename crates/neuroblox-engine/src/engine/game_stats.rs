use serde::Serialize;

/// Points per cleared line, multiplied by the level at the time of the clear.
const POINTS_PER_LINE: usize = 100;

/// Lines needed to advance one level.
const LINES_PER_LEVEL: usize = 10;

/// Game statistics tracking score, lines cleared, and piece count.
///
/// Tracks various metrics during a game:
///
/// - **Score**: Points earned from line clears
/// - **Level**: Derived from total lines cleared (starts at 1, +1 per 10 lines)
/// - **Completed pieces**: Total number of pieces locked
/// - **Line clear distribution**: Count of locks by number of lines cleared
///
/// # Scoring
///
/// A clear of `n` lines at level `L` is worth `n × 100 × L`, using the level from
/// before the clear. The level is then recomputed from the cumulative line count, so
/// it never decreases and only moves when a multiple of 10 is crossed.
///
/// # Example
///
/// ```
/// use neuroblox_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 400);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    /// Returns the current score (sum of all line clear points).
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level: `total_cleared_lines / 10 + 1`.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.total_cleared_lines / LINES_PER_LEVEL + 1
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns the total number of lines cleared across all line clears.
    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of line clears by count.
    ///
    /// Array indices represent:
    /// - `[0]`: Number of locks with no line cleared
    /// - `[1]`: Number of singles (1 line)
    /// - `[2]`: Number of doubles (2 lines)
    /// - `[3]`: Number of triples (3 lines)
    /// - `[4]`: Number of clears of 4 lines or more
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece lock and returns the points awarded.
    ///
    /// # Arguments
    ///
    /// * `cleared_lines` - Number of lines cleared by the lock
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        let points = cleared_lines * POINTS_PER_LINE * self.level();
        self.completed_pieces += 1;
        self.score += points;
        self.total_cleared_lines += cleared_lines;
        let bucket = cleared_lines.min(self.line_cleared_counter.len() - 1);
        self.line_cleared_counter[bucket] += 1;
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_stats() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.total_cleared_lines(), 0);
        assert_eq!(stats.completed_pieces(), 0);
    }

    #[test]
    fn test_single_line_scores_hundred_times_level() {
        let mut stats = GameStats::new();
        assert_eq!(stats.complete_piece_drop(1), 100);
        assert_eq!(stats.score(), 100);

        for _ in 0..9 {
            stats.complete_piece_drop(1);
        }
        assert_eq!(stats.level(), 2);
        let before = stats.score();
        assert_eq!(stats.complete_piece_drop(1), 200);
        assert_eq!(stats.score(), before + 200);
    }

    #[test]
    fn test_level_boundaries() {
        let mut stats = GameStats::new();
        for _ in 0..9 {
            stats.complete_piece_drop(1);
        }
        assert_eq!(stats.total_cleared_lines(), 9);
        assert_eq!(stats.level(), 1);
        stats.complete_piece_drop(1);
        assert_eq!(stats.level(), 2);

        for _ in 0..9 {
            stats.complete_piece_drop(1);
        }
        assert_eq!(stats.total_cleared_lines(), 19);
        assert_eq!(stats.level(), 2);
        stats.complete_piece_drop(1);
        assert_eq!(stats.level(), 3);
    }

    #[test]
    fn test_multi_line_clear_uses_level_before_update() {
        let mut stats = GameStats::new();
        for _ in 0..8 {
            stats.complete_piece_drop(1);
        }
        // 8 -> 12 lines crosses the level boundary; scored at level 1
        assert_eq!(stats.complete_piece_drop(4), 400);
        assert_eq!(stats.level(), 2);
    }

    #[test]
    fn test_line_cleared_counter() {
        let mut stats = GameStats::new();
        stats.complete_piece_drop(0);
        stats.complete_piece_drop(2);
        stats.complete_piece_drop(2);
        stats.complete_piece_drop(4);
        assert_eq!(stats.line_cleared_counter(), &[1, 0, 2, 0, 1]);
        assert_eq!(stats.completed_pieces(), 4);
        assert_eq!(stats.score(), 800);
    }
}
