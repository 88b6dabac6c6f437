use std::fmt;

use neuroblox_engine::PieceKind;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;

/// A rough placement estimate for an upcoming piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveEstimate {
    pub x: i32,
    pub rotation: u8,
    pub score: i32,
}

/// An upcoming piece kind with its estimated placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub kind: PieceKind,
    pub estimate: MoveEstimate,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Pos: {}, Rot: {}",
            self.kind.as_char(),
            self.estimate.x,
            self.estimate.rotation
        )
    }
}

/// Produces quick estimates for the pieces following the current one.
///
/// The upcoming kinds are taken in catalog order after the current kind, not from the
/// game's actual preview. Estimates are drawn at random (`x` in `0..7`, rotation in
/// `0..4`, score in `0..100`) instead of running the move search.
#[derive(Debug, Clone)]
pub struct Predictor {
    rng: Pcg32,
}

impl Default for Predictor {
    fn default() -> Self {
        Self::new()
    }
}

impl Predictor {
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn predict(&mut self, current: PieceKind, count: usize) -> Vec<Prediction> {
        (1..=count)
            .map(|steps| Prediction {
                kind: current.cycle_from(steps),
                estimate: self.estimate(),
            })
            .collect()
    }

    fn estimate(&mut self) -> MoveEstimate {
        MoveEstimate {
            x: self.rng.random_range(0..7),
            rotation: self.rng.random_range(0..4),
            score: self.rng.random_range(0..100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_follow_catalog_order() {
        let mut predictor = Predictor::with_seed(7);
        let kinds: Vec<_> = predictor
            .predict(PieceKind::J, 3)
            .iter()
            .map(|p| p.kind)
            .collect();
        assert_eq!(kinds, [PieceKind::L, PieceKind::I, PieceKind::O]);
    }

    #[test]
    fn test_estimates_within_ranges() {
        let mut predictor = Predictor::with_seed(42);
        for kind in PieceKind::ALL {
            for prediction in predictor.predict(kind, 5) {
                let estimate = prediction.estimate;
                assert!((0..7).contains(&estimate.x));
                assert!(estimate.rotation < 4);
                assert!((0..100).contains(&estimate.score));
            }
        }
    }

    #[test]
    fn test_display() {
        let prediction = Prediction {
            kind: PieceKind::T,
            estimate: MoveEstimate {
                x: 3,
                rotation: 1,
                score: 50,
            },
        };
        assert_eq!(prediction.to_string(), "T: Pos: 3, Rot: 1");
    }
}
