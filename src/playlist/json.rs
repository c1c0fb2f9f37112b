//! JSON playlists: `{"meta": {...}, "tracks": [...]}`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::FormatError;
use crate::library::{Track, TrackMetadata, is_media_str};

use super::document::{GENERATOR, PlaylistDocument, keys};
use super::format::PlaylistFormat;
use super::text::location_to_path;

#[derive(Serialize)]
struct JsonPlaylist<'a> {
    meta: JsonMeta<'a>,
    tracks: Vec<JsonTrack>,
}

#[derive(Serialize)]
struct JsonMeta<'a> {
    name: &'a str,
    duration: Option<&'a str>,
    generator: &'static str,
    created: String,
    seed: Option<&'a str>,
    shadow_seed: Option<&'a str>,
    num_swaps: Option<usize>,
    reverse_step: Option<usize>,
    num_tracks: usize,
}

#[derive(Serialize)]
struct JsonTrack {
    path: String,
    filename: String,
    title: String,
}

fn str_field<'a>(obj: &'a Map<String, Value>, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| {
        obj.get(*name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    })
}

fn usize_field(obj: &Map<String, Value>, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|name| match obj.get(*name)? {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn read_meta(meta: &Map<String, Value>, doc: &mut PlaylistDocument) {
    if let Some(name) = str_field(meta, &["name", "title"]) {
        doc.name = name.to_string();
    }
    if let Some(created) = str_field(meta, &["created", "generated"]) {
        doc.apply_annotation(&format!("{}:{created}", keys::GENERATED));
    }
    doc.duration = str_field(meta, &["duration"]).map(str::to_string);
    doc.primary_seed = str_field(meta, &["seed"]).map(str::to_string);
    doc.shadow_seed = str_field(meta, &["shadow_seed"]).map(str::to_string);
    doc.swap_count = usize_field(meta, &["num_swaps"]);
    doc.reverse_step = usize_field(meta, &["reverse_step"]);
    doc.track_count = usize_field(meta, &["num_tracks", "tracks"]);
}

fn read_entry(entry: &Value) -> Option<Track> {
    let (raw, title, metadata) = match entry {
        Value::String(s) => (s.as_str(), None, None),
        Value::Object(obj) => {
            let raw = str_field(obj, &["path", "file", "location"])?;
            let title = str_field(obj, &["title", "name"]);
            let artist = str_field(obj, &["artist"]).map(str::to_string);
            let album = str_field(obj, &["album"]).map(str::to_string);
            let metadata = (artist.is_some() || album.is_some()).then(|| TrackMetadata {
                artist,
                album,
                title: title.map(str::to_string),
            });
            (raw, title, metadata)
        }
        _ => return None,
    };

    let path = location_to_path(raw, false);
    if !is_media_str(&path) {
        return None;
    }
    let mut track = Track::with_title(&path, title);
    track.metadata = metadata;
    Some(track)
}

pub(crate) fn parse(text: &str) -> Result<PlaylistDocument, FormatError> {
    let value: Value = serde_json::from_str(text)?;
    let mut doc = PlaylistDocument::empty(PlaylistFormat::Json);

    let entries = match &value {
        Value::Array(items) => items,
        Value::Object(obj) => {
            if let Some(Value::Object(meta)) = obj.get("meta") {
                read_meta(meta, &mut doc);
            }
            match obj.get("tracks").or_else(|| obj.get("items")) {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(FormatError::Structure(
                        "JSON playlist has no `tracks` or `items` array".to_string(),
                    ));
                }
            }
        }
        _ => {
            return Err(FormatError::Structure(
                "JSON playlist must be an object or an array".to_string(),
            ));
        }
    };

    doc.tracks = entries.iter().filter_map(read_entry).collect();
    Ok(doc)
}

pub(crate) fn write(doc: &PlaylistDocument) -> Vec<u8> {
    let playlist = JsonPlaylist {
        meta: JsonMeta {
            name: &doc.name,
            duration: doc.duration.as_deref().filter(|d| !d.is_empty()),
            generator: GENERATOR,
            created: doc.timestamp(),
            seed: doc.primary_seed.as_deref().filter(|s| !s.is_empty()),
            shadow_seed: doc.shadow_seed.as_deref().filter(|s| !s.is_empty()),
            num_swaps: doc.swap_count.filter(|n| *n > 0),
            reverse_step: doc.reverse_step.filter(|n| *n > 0),
            num_tracks: doc.tracks.len(),
        },
        tracks: doc
            .tracks
            .iter()
            .map(|t| JsonTrack {
                path: t.path_str(),
                filename: t.file_name(),
                title: t.display_name.clone(),
            })
            .collect(),
    };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    // Serializing plain structs of strings and integers into a Vec cannot fail.
    if playlist.serialize(&mut ser).is_ok() {
        buf.push(b'\n');
    }
    buf
}
