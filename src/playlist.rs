//! Playlist containers.
//!
//! Every supported format parses into the same [`Track`](crate::library::Track)
//! records and a [`PlaylistDocument`] carrying the header keys written by the
//! generator. Writers emit those keys in each format's own annotation syntax.

mod asx;
mod codec;
mod document;
mod format;
mod import;
mod json;
mod m3u;
mod markup;
mod pls;
mod text;
mod wpl;
mod xml;
mod xspf;

pub use codec::{parse, parse_document, read_file, save, write};
pub use document::{GENERATOR, PlaylistDocument, TIMESTAMP_FORMAT, keys};
pub use format::PlaylistFormat;
pub use import::{ImportReport, import_all};
pub use xspf::XSPF_NAMESPACE;
