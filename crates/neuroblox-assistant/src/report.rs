//! Read-only text reports about a game.
//!
//! Each report is a plain value built from the game and rendered line by line with
//! its `Display` implementation.

use std::fmt;

use neuroblox_engine::{Board, GameState};
use neuroblox_evaluator::board_analysis::BoardAnalysis;
use serde::Serialize;

/// Holes above this count trigger the "fill holes" recommendation.
const HOLE_WARNING_THRESHOLD: usize = 5;

/// Score, lines and level with a lines-per-1000-points efficiency rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub score: usize,
    pub lines: usize,
    pub level: usize,
    /// `lines / (score / 1000)`; `None` while the score is 0.
    pub efficiency: Option<f64>,
}

impl PerformanceReport {
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn from_game(game: &GameState) -> Self {
        let (score, lines) = (game.score(), game.lines());
        let efficiency = (score > 0).then(|| lines as f64 / (score as f64 / 1000.0));
        Self {
            score,
            lines,
            level: game.level(),
            efficiency,
        }
    }

    #[must_use]
    pub fn feedback(&self) -> &'static str {
        match self.efficiency {
            Some(e) if e > 5.0 => "You're doing GREAT! Keep it up!",
            Some(e) if e > 3.0 => "Good performance! Try to clear more lines at once.",
            _ => "Room for improvement! Focus on clearing multiple lines.",
        }
    }
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== PERFORMANCE ANALYSIS ===")?;
        writeln!(f, "Score: {}", self.score)?;
        writeln!(f, "Lines: {}", self.lines)?;
        writeln!(f, "Level: {}", self.level)?;
        match self.efficiency {
            Some(e) => writeln!(f, "Efficiency: {e:.2} lines per 1000 points")?,
            None => writeln!(f, "Efficiency: n/a lines per 1000 points")?,
        }
        writeln!(f, "{}", self.feedback())?;
        write!(f, "=== END ANALYSIS ===")
    }
}

/// Stack height and hole count of the live board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardReport {
    pub max_height: usize,
    pub holes: usize,
}

impl BoardReport {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        let analysis = BoardAnalysis::from_board(board);
        Self {
            max_height: analysis.max_height(),
            holes: analysis.num_holes(),
        }
    }

    #[must_use]
    pub fn recommendation(&self) -> &'static str {
        if self.holes > HOLE_WARNING_THRESHOLD {
            "Focus on filling holes"
        } else {
            "Board looks good!"
        }
    }
}

impl fmt::Display for BoardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== BOARD ANALYSIS ===")?;
        writeln!(f, "Maximum height: {}", self.max_height)?;
        writeln!(f, "Number of holes: {}", self.holes)?;
        writeln!(f, "Recommendation: {}", self.recommendation())?;
        write!(f, "=== END ANALYSIS ===")
    }
}

/// Final figures of a finished game with tips for the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOverReport {
    pub score: usize,
    pub lines: usize,
    pub level: usize,
}

impl GameOverReport {
    #[must_use]
    pub fn from_game(game: &GameState) -> Self {
        Self {
            score: game.score(),
            lines: game.lines(),
            level: game.level(),
        }
    }
}

impl fmt::Display for GameOverReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== GAME OVER ANALYSIS ===")?;
        writeln!(f, "Final Score: {}", self.score)?;
        writeln!(f, "Total Lines: {}", self.lines)?;
        writeln!(f, "Highest Level: {}", self.level)?;
        writeln!(f, "Tips for next game:")?;
        writeln!(f, "1. Try to keep the board flat")?;
        writeln!(f, "2. Leave space for I pieces (4-line clears)")?;
        writeln!(f, "3. Don't panic when the speed increases")?;
        write!(f, "=== END ANALYSIS ===")
    }
}

/// Splits a multi-line report into owned lines.
pub(crate) fn to_lines(report: &impl fmt::Display) -> Vec<String> {
    report.to_string().lines().map(str::to_owned).collect()
}
