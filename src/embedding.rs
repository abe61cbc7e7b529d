//! Deterministic placeholder embeddings.
//!
//! `Embedder` maps text to a fixed 128-dimensional vector by seeding a PRNG
//! from a stable hash of the input. The output is deterministic (same text,
//! same vector, across runs and platforms) but carries **no semantic
//! meaning** — similar texts do not produce similar vectors. It exists so
//! the vector backend has something to index; swapping in a real embedding
//! model only requires replacing this module.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Vector dimension used system-wide, for every document and every query.
pub const EMBEDDING_DIM: usize = 128;

/// Stateless text → vector service. Cheap to clone and share across stores.
#[derive(Debug, Clone, Default)]
pub struct Embedder;

impl Embedder {
    pub fn new() -> Self {
        Self
    }

    /// Embed `text` into a vector of exactly [`EMBEDDING_DIM`] floats in [0, 1).
    ///
    /// Total function: any string, including the empty string, yields a
    /// vector. Identical input always yields the identical vector.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(fnv1a_64(text));
        (0..EMBEDDING_DIM).map(|_| rng.gen::<f32>()).collect()
    }
}

/// FNV-1a over the UTF-8 bytes of `text`.
///
/// `DefaultHasher` is randomized per process, so it cannot provide the
/// cross-run determinism the embedder promises. FNV-1a is stable and takes
/// four lines.
fn fnv1a_64(text: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    for byte in text.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
