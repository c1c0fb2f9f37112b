//! INI-style `.pls` playlists.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;

use crate::library::{Track, is_media_str};

use super::document::{GENERATOR, PlaylistDocument, keys};
use super::format::PlaylistFormat;
use super::text::{seconds_to_duration, unquote};

#[derive(Default)]
struct Entry {
    file: Option<String>,
    title: Option<String>,
    length: Option<Duration>,
}

/// Split `File12` into `("file", 12)`.
fn indexed_key(key: &str) -> Option<(String, usize)> {
    let key = key.trim().to_ascii_lowercase();
    let split = key.find(|c: char| c.is_ascii_digit())?;
    let index = key[split..].parse().ok()?;
    Some((key[..split].to_string(), index))
}

pub(crate) fn parse(text: &str) -> PlaylistDocument {
    let mut doc = PlaylistDocument::empty(PlaylistFormat::Pls);
    let mut entries: BTreeMap<usize, Entry> = BTreeMap::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('[') {
            continue;
        }
        if let Some(comment) = line.strip_prefix(';').or_else(|| line.strip_prefix('#')) {
            doc.apply_annotation(comment);
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = unquote(value);

        if key.trim().eq_ignore_ascii_case("NumberOfEntries") {
            if doc.track_count.is_none() {
                doc.track_count = value.parse().ok();
            }
            continue;
        }

        let Some((name, index)) = indexed_key(key) else {
            continue;
        };
        let entry = entries.entry(index).or_default();
        match name.as_str() {
            "file" => entry.file = Some(value.to_string()),
            "title" => entry.title = Some(value.to_string()),
            "length" => {
                entry.length = value
                    .parse::<f64>()
                    .ok()
                    .and_then(seconds_to_duration);
            }
            _ => {}
        }
    }

    for entry in entries.into_values() {
        let Some(file) = entry.file.filter(|f| is_media_str(f)) else {
            continue;
        };
        let mut track = Track::with_title(&file, entry.title.as_deref());
        track.duration = entry.length;
        doc.tracks.push(track);
    }

    doc
}

pub(crate) fn write(doc: &PlaylistDocument) -> String {
    let mut out = String::from("[playlist]\n");
    let _ = writeln!(out, ";Made with {GENERATOR}");
    let _ = writeln!(out, ";{}:{}", keys::GENERATED, doc.timestamp());
    let _ = writeln!(out, ";{}:{}", keys::PLAYLIST, doc.name);
    for (key, value) in doc.optional_entries() {
        let _ = writeln!(out, ";{key}:{value}");
    }
    let _ = writeln!(out, "NumberOfEntries={}", doc.tracks.len());
    out.push_str("Version=2\n");

    for (i, track) in doc.tracks.iter().enumerate() {
        let n = i + 1;
        let length = track
            .duration
            .map(|d| d.as_secs().to_string())
            .unwrap_or_else(|| "-1".to_string());
        out.push('\n');
        let _ = writeln!(out, "File{n}={}", track.path_str());
        let _ = writeln!(out, "Title{n}={}", track.display_name);
        let _ = writeln!(out, "Length{n}={length}");
    }

    out
}
