//! Seeded soft-shuffle playlist engine.
//!
//! Scan folders or import playlists into canonical [`library::Track`]s, derive a
//! reproducible seed, reorder with [`shuffle::soft_shuffle`] and write the
//! result in any supported [`playlist::PlaylistFormat`].

pub mod config;
pub mod editor;
pub mod error;
pub mod generator;
pub mod library;
pub mod playlist;
pub mod seed;
pub mod shuffle;

pub use error::{Error, Result};
