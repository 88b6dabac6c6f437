use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParsePieceSeedError, PieceKind};

/// Draws piece kinds independently and uniformly at random.
///
/// Every draw picks one of the seven kinds with equal probability, with no bag or
/// history: long droughts of a kind are possible.
///
/// # Example
///
/// ```
/// use neuroblox_engine::engine::{PieceGenerator, PieceSeed};
///
/// let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut a = PieceGenerator::with_seed(seed);
/// let mut b = PieceGenerator::with_seed(seed);
/// assert_eq!(a.next_kind(), b.next_kind());
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator for piece generation. Using the same seed will produce the same
/// sequence of pieces, enabling:
///
/// - Reproducible autoplay runs
/// - Deterministic testing
///
/// Seeds are written as 32 hexadecimal characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParsePieceSeedError::InvalidLength(s.len()));
        }
        let num = u128::from_str_radix(s, 16).map_err(ParsePieceSeedError::InvalidHex)?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values using the standard random distribution.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceGenerator {
    /// Creates a new generator with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws the next piece kind.
    pub fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "00112233445566778899aabbccddeeff";

    #[test]
    fn test_seed_round_trip_through_string() {
        let seed: PieceSeed = SEED.parse().unwrap();
        assert_eq!(seed.to_string(), SEED);

        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, format!("\"{SEED}\""));
        assert_eq!(serde_json::from_str::<PieceSeed>(&json).unwrap(), seed);
    }

    #[test]
    fn test_seed_parse_errors() {
        assert!(matches!(
            "abc".parse::<PieceSeed>(),
            Err(ParsePieceSeedError::InvalidLength(3))
        ));
        assert!(matches!(
            "zz112233445566778899aabbccddeeff".parse::<PieceSeed>(),
            Err(ParsePieceSeedError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let seed: PieceSeed = SEED.parse().unwrap();
        let mut a = PieceGenerator::with_seed(seed);
        let mut b = PieceGenerator::with_seed(seed);
        let seq_a: Vec<_> = (0..50).map(|_| a.next_kind()).collect();
        let seq_b: Vec<_> = (0..50).map(|_| b.next_kind()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_every_kind_is_drawn() {
        let mut generator = PieceGenerator::with_seed(SEED.parse().unwrap());
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..1000 {
            seen[generator.next_kind().index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
