use rand::SeedableRng;
use rand::seq::{SliceRandom, index};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::seed::stable_hash;

use super::params::Intensity;

const FRACTION_MODULUS: u64 = 10_000_000_000;

/// Result of [`soft_shuffle`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShuffleOutcome<T> {
    pub tracks: Vec<T>,
    /// Extra pairwise swaps actually performed after the baseline permutation.
    pub swap_count: usize,
}

/// The PRNG for a given seed string. A fresh value per call, never shared.
pub fn seeded_rng(seed: &str) -> ChaCha8Rng {
    seeded_rng_from_hash(stable_hash(seed))
}

fn seeded_rng_from_hash(seed_hash: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed_hash)
}

/// Swap count for [`Intensity::Auto`]: a seed-derived fraction in `[0.6, 1.0]`
/// of the track count, stretched by 7% and capped at the track count.
pub fn auto_swap_count(seed_hash: u64, len: usize) -> usize {
    let fraction = (seed_hash % FRACTION_MODULUS) as f64 / FRACTION_MODULUS as f64;
    let intensity = 0.6 + 0.4 * fraction;
    let swaps = (len as f64 * intensity * 1.07).round() as usize;
    swaps.min(len)
}

/// Full seeded permutation followed by a controlled number of extra swaps.
///
/// Identical input order, seed and intensity always give the identical output.
pub fn soft_shuffle<T>(mut tracks: Vec<T>, seed: &str, intensity: Intensity) -> ShuffleOutcome<T> {
    let seed_hash = stable_hash(seed);
    let mut rng = seeded_rng_from_hash(seed_hash);

    tracks.shuffle(&mut rng);

    let len = tracks.len();
    let requested = match intensity {
        Intensity::Baseline => 0,
        Intensity::Auto => auto_swap_count(seed_hash, len),
        Intensity::Swaps(n) => n,
    };

    // A pair of distinct indices needs at least two tracks.
    let swap_count = if len < 2 { 0 } else { requested };
    for _ in 0..swap_count {
        let pair = index::sample(&mut rng, len, 2);
        tracks.swap(pair.index(0), pair.index(1));
    }

    debug!(seed, len, ?intensity, swap_count, "soft shuffle finished");

    ShuffleOutcome { tracks, swap_count }
}
