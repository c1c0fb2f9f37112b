//! Canonical tracks and the directory scanner.
//!
//! Every input (a scanned folder or any playlist format) converges on
//! [`Track`]. The media allow-list decides what counts as a track anywhere in
//! the crate.

mod display;
mod media;
mod model;
mod scan;

pub use display::{format_duration, total_duration};
pub use media::{AUDIO_EXTENSIONS, VIDEO_EXTENSIONS, is_media_extension, is_media_path, is_media_str, media_extensions};
pub use model::*;
pub use scan::{ScanReport, canonical_sort, scan};

#[cfg(test)]
mod tests;
