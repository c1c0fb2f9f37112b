//! ASX, WAX and WVX (Windows Media metafiles).

use std::fmt::Write as _;

use crate::error::FormatError;
use crate::library::{Track, is_media_str};

use super::document::{GENERATOR, PlaylistDocument, keys};
use super::format::PlaylistFormat;
use super::markup::{attr, child_text, is_named, parse_xml, text_of};
use super::text::{escape_bare_ampersands, location_to_path, xml_escape};

const LOCATION_ATTRS: &[&str] = &["href", "src"];

pub(crate) fn parse(text: &str, format: PlaylistFormat) -> Result<PlaylistDocument, FormatError> {
    let source = escape_bare_ampersands(text);
    let xml = parse_xml(&source)?;
    let root = xml.root_element();
    let mut doc = PlaylistDocument::empty(format);

    if let Some(title) = child_text(root, &["title"]) {
        doc.name = title;
    }
    for node in root.descendants().filter(|n| is_named(*n, "abstract")) {
        doc.apply_annotation(&text_of(node));
    }

    let entries: Vec<_> = root.descendants().filter(|n| is_named(*n, "entry")).collect();
    if entries.is_empty() {
        // Bare `<ref>` / `<media>` lists without `<entry>` wrappers.
        for node in root.descendants().filter(|n| n.is_element()) {
            if let Some(location) = attr(node, LOCATION_ATTRS) {
                push_track(&mut doc, location, attr(node, &["title"]).map(str::to_string));
            }
        }
        return Ok(doc);
    }

    for entry in entries {
        let location = entry
            .descendants()
            .filter(|n| is_named(*n, "ref"))
            .find_map(|n| attr(n, LOCATION_ATTRS))
            .or_else(|| attr(entry, LOCATION_ATTRS));
        let Some(location) = location else {
            continue;
        };
        let title = child_text(entry, &["title"])
            .or_else(|| attr(entry, &["title"]).map(str::to_string));
        push_track(&mut doc, location, title);
    }

    Ok(doc)
}

fn push_track(doc: &mut PlaylistDocument, location: &str, title: Option<String>) {
    let path = location_to_path(location, false);
    if is_media_str(&path) {
        doc.tracks.push(Track::with_title(&path, title.as_deref()));
    }
}

pub(crate) fn write(doc: &PlaylistDocument) -> String {
    let mut out = String::from("<ASX Version=\"3.0\">\n");
    let _ = writeln!(out, "<!-- Generated by {GENERATOR} on {} -->", doc.timestamp());
    let _ = writeln!(out, "<Title>{}</Title>", xml_escape(&doc.name));
    for (key, value) in doc.optional_entries() {
        let _ = writeln!(out, "<Abstract>{key}:{}</Abstract>", xml_escape(&value));
    }
    let _ = writeln!(out, "<Abstract>{}:{}</Abstract>", keys::TRACKS, doc.tracks.len());
    out.push('\n');

    for track in &doc.tracks {
        out.push_str("<Entry>\n");
        let _ = writeln!(out, "  <Title>{}</Title>", xml_escape(&track.display_name));
        let _ = writeln!(out, "  <Ref href=\"{}\" />", xml_escape(&track.path_str()));
        out.push_str("</Entry>\n\n");
    }

    out.push_str("</ASX>\n");
    out
}
