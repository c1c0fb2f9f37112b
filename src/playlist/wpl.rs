//! Windows Media Player `.wpl` (SMIL) playlists.

use std::fmt::Write as _;

use crate::error::FormatError;
use crate::library::{Track, default_display_name, is_media_str};

use super::document::{GENERATOR, PlaylistDocument, keys};
use super::format::PlaylistFormat;
use super::markup::{attr, is_named, parse_xml, text_of};
use super::text::{escape_bare_ampersands, location_to_path, xml_escape};

pub(crate) fn parse(text: &str) -> Result<PlaylistDocument, FormatError> {
    let source = escape_bare_ampersands(text);
    let xml = parse_xml(&source)?;
    let root = xml.root_element();
    let mut doc = PlaylistDocument::empty(PlaylistFormat::Wpl);

    if let Some(head) = root.children().find(|n| is_named(*n, "head")) {
        if let Some(title) = head.children().find(|n| is_named(*n, "title")) {
            doc.name = text_of(title);
        }
        for meta in head.children().filter(|n| is_named(*n, "meta")) {
            if attr(meta, &["name"]).is_some_and(|n| n.eq_ignore_ascii_case("ItemCount")) {
                doc.track_count = attr(meta, &["content"]).and_then(|c| c.trim().parse().ok());
            }
        }
    }
    for comment in root.descendants().filter(|n| n.is_comment()) {
        for line in comment.text().unwrap_or_default().lines() {
            doc.apply_annotation(line);
        }
    }

    for media in root.descendants().filter(|n| is_named(*n, "media")) {
        let Some(src) = attr(media, &["src"]) else {
            continue;
        };
        let path = location_to_path(src, false);
        if is_media_str(&path) {
            doc.tracks.push(Track::with_title(&path, attr(media, &["title"])));
        }
    }

    Ok(doc)
}

pub(crate) fn write(doc: &PlaylistDocument) -> String {
    let mut out = String::from("<?wpl version=\"1.0\"?>\n<smil>\n  <head>\n");
    let _ = writeln!(out, "    <meta name=\"Generator\" content=\"{GENERATOR}\"/>");
    let _ = writeln!(out, "    <meta name=\"ItemCount\" content=\"{}\"/>", doc.tracks.len());
    let _ = writeln!(out, "    <title>{}</title>", xml_escape(&doc.name));

    out.push_str("    <!--\n");
    let _ = writeln!(out, "      {}:{}", keys::GENERATED, doc.timestamp());
    for (key, value) in doc.optional_entries() {
        // `--` may not appear inside an XML comment.
        let _ = writeln!(out, "      {key}:{}", value.replace("--", "- -"));
    }
    out.push_str("    -->\n");
    out.push_str("  </head>\n  <body>\n    <seq>\n");

    for track in &doc.tracks {
        let src = xml_escape(&track.path_str());
        if track.display_name == default_display_name(&track.path) {
            let _ = writeln!(out, "      <media src=\"{src}\"/>");
        } else {
            let title = xml_escape(&track.display_name);
            let _ = writeln!(out, "      <media src=\"{src}\" title=\"{title}\"/>");
        }
    }

    out.push_str("    </seq>\n  </body>\n</smil>\n");
    out
}
