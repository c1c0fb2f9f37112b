use std::fs::File;
use std::path::{Path, PathBuf};

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::media::is_media_extension;
use super::model::{Track, TrackMetadata, renumber};

/// Tracks found under the scanned roots, plus paths that could not be used.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub tracks: Vec<Track>,
    pub failures: Vec<(PathBuf, String)>,
}

fn wanted_extension(path: &Path, settings: &LibrarySettings) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    if !is_media_extension(ext) {
        return false;
    }
    settings.extensions.is_empty()
        || settings
            .extensions
            .iter()
            .any(|e| e.trim().trim_start_matches('.').eq_ignore_ascii_case(ext))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Fill duration and tag metadata from the file itself. Unreadable tags are not an error.
fn read_tags(track: &mut Track, path: &Path) {
    let Ok(tagged) = lofty::read_from_path(path) else {
        debug!(path = %path.display(), "no readable tags");
        return;
    };
    track.duration = Some(tagged.properties().duration()).filter(|d| !d.is_zero());

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        let clean = |v: Option<std::borrow::Cow<'_, str>>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        let metadata = TrackMetadata {
            artist: clean(tag.artist()),
            album: clean(tag.album()),
            title: clean(tag.title()),
        };
        if metadata != TrackMetadata::default() {
            track.metadata = Some(metadata);
        }
    }
}

/// Sort into canonical order: names starting with a letter first, then by
/// lowercased file name. Stable, so equal keys keep their input order.
pub fn canonical_sort(tracks: &mut [Track]) {
    tracks.sort_by_cached_key(|t| {
        let name = t.file_name();
        let alpha = name.chars().next().is_some_and(char::is_alphabetic);
        (!alpha, name.to_lowercase())
    });
    renumber(tracks);
}

fn scan_root(root: &Path, settings: &LibrarySettings, report: &mut ScanReport) {
    if !root.is_dir() {
        warn!(root = %root.display(), "not a readable directory");
        report
            .failures
            .push((root.to_path_buf(), "not a readable directory".to_string()));
        return;
    }

    let mut walker = WalkDir::new(root).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                report.failures.push((path, err.to_string()));
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() && !path.is_file() {
            continue;
        }
        if !wanted_extension(path, settings) {
            continue;
        }
        if let Err(err) = File::open(path) {
            warn!(path = %path.display(), error = %err, "skipping unreadable file");
            report.failures.push((path.to_path_buf(), err.to_string()));
            continue;
        }

        let mut track = Track::new(path.to_string_lossy());
        track.size_bytes = entry.metadata().ok().map(|m| m.len());
        if settings.read_tags {
            read_tags(&mut track, path);
        }
        report.tracks.push(track);
    }
}

/// Collect media files under each root, in canonical order with dense positions.
///
/// Missing roots and unreadable files are recorded in the report and skipped.
pub fn scan(roots: &[PathBuf], settings: &LibrarySettings) -> ScanReport {
    let mut report = ScanReport::default();
    for root in roots {
        scan_root(root, settings, &mut report);
    }
    canonical_sort(&mut report.tracks);
    info!(
        roots = roots.len(),
        tracks = report.tracks.len(),
        failures = report.failures.len(),
        "scan complete"
    );
    report
}
