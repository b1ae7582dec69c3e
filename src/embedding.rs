//! Embedding engine mapping text to fixed-length vectors.
//!
//! This is a deterministic stand-in for a real encoder: vectors are drawn
//! from an RNG seeded by a stable hash of the input text, so the same text
//! always yields the same vector, in-process and across processes. The
//! vectors carry no semantic meaning; nothing downstream may assume that
//! similar texts produce similar vectors. A real encoder only needs to keep
//! the interface contract (fixed dimension, determinism).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::{RagError, Result};

/// Default embedding dimension
pub const DEFAULT_DIMENSION: usize = 128;

/// Deterministic stand-in embedding engine
pub struct EmbeddingEngine {
    dimension: usize,
}

impl EmbeddingEngine {
    /// Create an engine producing vectors of the given dimension
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Generate the embedding for a text.
    ///
    /// Fails with [`RagError::InvalidInput`] on empty input.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.is_empty() {
            return Err(RagError::InvalidInput(
                "input text cannot be empty".to_string(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(fnv1a_64(text.as_bytes()));
        Ok((0..self.dimension).map(|_| rng.gen::<f32>()).collect())
    }

    /// Configured output dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

impl Default for EmbeddingEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

// FNV-1a; stable across processes, unlike the std hasher
fn fnv1a_64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    bytes.iter().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(PRIME)
    })
}
