//! Editor session: the model behind remixing existing playlists.
//!
//! An [`Editor`] merges one or more playlist files, keeps their canonical order
//! as the source for every shuffle, and tracks per-row edits until the result
//! is saved.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
