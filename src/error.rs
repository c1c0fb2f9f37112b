//! Error types shared across the engine.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for engine operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A playlist container could not be read.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// User-supplied shuffle parameters were rejected before any mutation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A playlist file whose container is structurally unusable.
///
/// Scoped to a single input file: a batch import records it and moves on.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported playlist structure: {0}")]
    Structure(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognized playlist extension: {}", .0.display())]
    UnknownFormat(PathBuf),
}

/// Rejected shuffle/reverse parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("reverse step must be a non-negative integer, got {0:?}")]
    ReverseStep(String),

    #[error("intensity must be a non-negative integer, got {0:?}")]
    Intensity(String),

    #[error("playlist name must not be empty")]
    EmptyName,

    #[error("no media files to shuffle")]
    NoTracks,

    #[error("track {index} is out of range (playlist has {len})")]
    TrackIndex { index: usize, len: usize },
}
