//! m3u, m3u8 and plain-text track lists.

use std::fmt::Write as _;
use std::time::Duration;

use crate::library::{Track, is_media_str};

use super::document::{GENERATOR, PlaylistDocument, keys};
use super::format::PlaylistFormat;
use super::text::{seconds_to_duration, unquote};

fn extinf(comment: &str) -> Option<&str> {
    let head = comment.get(..7)?;
    head.eq_ignore_ascii_case("EXTINF:").then(|| &comment[7..])
}

pub(crate) fn parse(text: &str, format: PlaylistFormat) -> PlaylistDocument {
    let mut doc = PlaylistDocument::empty(format);
    let mut pending: Option<(Option<Duration>, String)> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            if let Some(info) = extinf(comment) {
                // `#EXTINF:<seconds>[ attrs],<title>`
                let (length, title) = info.split_once(',').unwrap_or((info, ""));
                let secs = length
                    .split_whitespace()
                    .next()
                    .and_then(|s| s.parse::<f64>().ok())
                    .and_then(seconds_to_duration);
                pending = Some((secs, title.trim().to_string()));
            } else {
                doc.apply_annotation(comment);
            }
            continue;
        }

        let path = unquote(line);
        let info = pending.take();
        if !is_media_str(path) {
            continue;
        }
        let mut track = Track::with_title(path, info.as_ref().map(|(_, t)| t.as_str()));
        track.duration = info.and_then(|(d, _)| d);
        doc.tracks.push(track);
    }

    doc
}

pub(crate) fn write(doc: &PlaylistDocument, format: PlaylistFormat) -> String {
    let plain = format == PlaylistFormat::Txt;
    let mut out = String::new();

    if !plain {
        out.push_str("#EXTM3U\n");
    }
    let _ = writeln!(out, "#Made with {GENERATOR}");
    let _ = writeln!(out, "#{}:{}", keys::GENERATED, doc.timestamp());
    let name_key = if plain { keys::TRACKLIST } else { keys::PLAYLIST };
    let _ = writeln!(out, "#{name_key}:{}", doc.name);
    for (key, value) in doc.optional_entries() {
        let _ = writeln!(out, "#{key}:{value}");
    }
    let _ = writeln!(out, "#{}:{}", keys::TRACKS, doc.tracks.len());
    out.push('\n');

    for track in &doc.tracks {
        if !plain {
            let secs = track
                .duration
                .map(|d| d.as_secs().to_string())
                .unwrap_or_else(|| "-1".to_string());
            let _ = writeln!(out, "#EXTINF:{secs},{}", track.display_name);
        }
        let _ = writeln!(out, "{}", track.path_str());
    }

    out
}
