//! Generic XML playlists.
//!
//! Reading tries progressively looser strategies: an iTunes-style plist, then
//! anything with XSPF-like `<track>` elements, then every attribute and text
//! node that looks like a media path. Writing emits XSPF with percent-encoded
//! locations.

use std::time::Duration;

use roxmltree::Node;

use crate::error::FormatError;
use crate::library::{Track, TrackMetadata, is_media_str};

use super::document::PlaylistDocument;
use super::format::PlaylistFormat;
use super::markup::{is_named, parse_xml, text_of};
use super::text::{escape_bare_ampersands, location_to_path};
use super::xspf::{self, LocationStyle};

pub(crate) fn parse(text: &str) -> Result<PlaylistDocument, FormatError> {
    let source = escape_bare_ampersands(text);
    let xml = parse_xml(&source)?;
    let root = xml.root_element();
    let mut doc = PlaylistDocument::empty(PlaylistFormat::Xml);

    if is_named(root, "plist") {
        doc.tracks = plist_tracks(root);
        if !doc.tracks.is_empty() {
            return Ok(doc);
        }
    }

    let tracks = xspf::collect_tracks(root);
    if !tracks.is_empty() {
        xspf::read_header(root, &mut doc);
        doc.tracks = tracks;
        return Ok(doc);
    }

    doc.tracks = walk_tracks(root);
    Ok(doc)
}

pub(crate) fn write(doc: &PlaylistDocument) -> String {
    xspf::write(doc, LocationStyle::PercentEncoded)
}

/// `<key>`/value pairs of a plist `<dict>`.
fn dict_entries<'a, 'input>(dict: Node<'a, 'input>) -> Vec<(String, Node<'a, 'input>)> {
    let mut entries = Vec::new();
    let mut children = dict.children().filter(|n| n.is_element());
    while let Some(key) = children.next() {
        if !is_named(key, "key") {
            continue;
        }
        if let Some(value) = children.next() {
            entries.push((text_of(key), value));
        }
    }
    entries
}

fn plist_tracks(root: Node<'_, '_>) -> Vec<Track> {
    let mut tracks = Vec::new();
    for dict in root.descendants().filter(|n| is_named(*n, "dict")) {
        let entries = dict_entries(dict);
        let field = |name: &str| {
            entries
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| text_of(*v))
                .filter(|v| !v.is_empty())
        };

        let Some(location) = field("Location") else {
            continue;
        };
        let path = location_to_path(&location, true);
        if !is_media_str(&path) {
            continue;
        }

        let title = field("Name");
        let mut track = Track::with_title(&path, title.as_deref());
        track.duration = field("Total Time")
            .and_then(|ms| ms.parse::<u64>().ok())
            .map(Duration::from_millis);
        let artist = field("Artist");
        let album = field("Album");
        if artist.is_some() || album.is_some() || title.is_some() {
            track.metadata = Some(TrackMetadata { artist, album, title });
        }
        tracks.push(track);
    }
    tracks
}

fn walk_tracks(root: Node<'_, '_>) -> Vec<Track> {
    let mut tracks = Vec::new();
    for node in root.descendants() {
        if node.is_element() {
            for attribute in node.attributes() {
                push_candidate(&mut tracks, attribute.value());
            }
        } else if node.is_text() {
            if let Some(text) = node.text() {
                push_candidate(&mut tracks, text);
            }
        }
    }
    tracks
}

fn push_candidate(tracks: &mut Vec<Track>, raw: &str) {
    let raw = raw.trim();
    if raw.is_empty() || raw.contains('\n') {
        return;
    }
    let path = location_to_path(raw, true);
    if is_media_str(&path) {
        tracks.push(Track::new(&path));
    }
}
