//! Seed derivation.
//!
//! Primary seeds are reproducible from the library shape and generation time;
//! shadow seeds are layered on top with fresh randomness so the resulting
//! order can be logged but not replayed. [`stable_hash`] turns any seed string
//! into the integer that initializes the shuffle PRNG.

mod derive;
mod hash;

pub use derive::*;
pub use hash::stable_hash;
