//! XSPF (`http://xspf.org/ns/0/`) and the XSPF-shaped generic XML writer.

use std::fmt::Write as _;

use roxmltree::Node;

use crate::error::FormatError;
use crate::library::{Track, TrackMetadata, is_media_str};

use super::document::{GENERATOR, PlaylistDocument, keys};
use super::format::PlaylistFormat;
use super::markup::{child_text, is_named, parse_xml};
use super::text::{escape_bare_ampersands, location_to_path, path_to_file_uri, percent_encode_path, xml_escape};

pub const XSPF_NAMESPACE: &str = "http://xspf.org/ns/0/";

/// How `<location>` values are rendered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum LocationStyle {
    /// The slash-normalized path, XML-escaped.
    Verbatim,
    /// `file:///` URI with a percent-encoded path.
    FileUri,
    /// Percent-encoded path without a scheme.
    PercentEncoded,
}

pub(crate) fn parse(text: &str, format: PlaylistFormat) -> Result<PlaylistDocument, FormatError> {
    let source = escape_bare_ampersands(text);
    let xml = parse_xml(&source)?;
    let root = xml.root_element();
    if !is_named(root, "playlist") {
        return Err(FormatError::Structure(format!(
            "expected <playlist> root, found <{}>",
            root.tag_name().name()
        )));
    }

    let mut doc = PlaylistDocument::empty(format);
    read_header(root, &mut doc);
    doc.tracks = collect_tracks(root);
    Ok(doc)
}

/// `<title>` and `<annotation>` lines of a playlist root.
pub(crate) fn read_header(root: Node<'_, '_>, doc: &mut PlaylistDocument) {
    if let Some(title) = child_text(root, &["title"]) {
        doc.name = title;
    }
    if let Some(annotation) = child_text(root, &["annotation"]) {
        for line in annotation.lines() {
            doc.apply_annotation(line);
        }
    }
}

/// Every `<track>`/`<Track>` element below `root` that names a media file.
pub(crate) fn collect_tracks(root: Node<'_, '_>) -> Vec<Track> {
    let mut tracks = Vec::new();
    for node in root.descendants().filter(|n| is_named(*n, "track")) {
        let Some(location) = child_text(node, &["location", "path", "file", "src"]) else {
            continue;
        };
        let path = location_to_path(&location, true);
        if !is_media_str(&path) {
            continue;
        }
        let title = child_text(node, &["title", "name"]);
        let mut track = Track::with_title(&path, title.as_deref());

        let artist = child_text(node, &["creator", "artist"]);
        let album = child_text(node, &["album"]);
        if artist.is_some() || album.is_some() || title.is_some() {
            track.metadata = Some(TrackMetadata { artist, album, title });
        }
        tracks.push(track);
    }
    tracks
}

pub(crate) fn write(doc: &PlaylistDocument, style: LocationStyle) -> String {
    let ts = doc.timestamp();
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(out, "<playlist version=\"1\" xmlns=\"{XSPF_NAMESPACE}\">");
    let _ = writeln!(out, "  <title>{}</title>", xml_escape(&doc.name));
    let _ = writeln!(out, "  <creator>{GENERATOR}</creator>");
    let _ = writeln!(out, "  <date>{ts}</date>");

    out.push_str("  <annotation>\n");
    let _ = writeln!(out, "    {}:{ts}", keys::GENERATED);
    for (key, value) in doc.optional_entries() {
        let _ = writeln!(out, "    {key}:{}", xml_escape(&value));
    }
    let _ = writeln!(out, "    {}:{}", keys::TRACKS, doc.tracks.len());
    out.push_str("  </annotation>\n");

    out.push_str("  <trackList>\n");
    for (i, track) in doc.tracks.iter().enumerate() {
        let path = track.path_str();
        let location = match style {
            LocationStyle::Verbatim => xml_escape(&path),
            LocationStyle::FileUri => xml_escape(&path_to_file_uri(&path)),
            LocationStyle::PercentEncoded => xml_escape(&percent_encode_path(&path)),
        };
        out.push_str("    <track>\n");
        let _ = writeln!(out, "      <location>{location}</location>");
        let _ = writeln!(out, "      <title>{}</title>", xml_escape(&track.display_name));
        match style {
            LocationStyle::PercentEncoded => {
                let _ = writeln!(out, "      <meta rel=\"trackNumber\">{}</meta>", i + 1);
            }
            _ => {
                let _ = writeln!(
                    out,
                    "      <meta rel=\"filename\">{}</meta>",
                    xml_escape(&track.file_name())
                );
            }
        }
        out.push_str("    </track>\n");
    }
    out.push_str("  </trackList>\n");
    out.push_str("</playlist>\n");
    out
}
