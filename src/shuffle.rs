//! Seeded track reordering.
//!
//! A soft shuffle is one full permutation driven by the seed's stable hash,
//! followed by a controlled number of extra pairwise swaps drawn from the same
//! stream. Block reverse then flips fixed-size windows in place.

mod params;
mod reverse;
mod soft;

pub use params::{Intensity, ReverseStep};
pub use reverse::apply_block_reverse;
pub use soft::{ShuffleOutcome, auto_swap_count, seeded_rng, soft_shuffle};
