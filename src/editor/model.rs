use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::error::{FormatError, Result, ValidationError};
use crate::generator::{Generator, ShuffleRequest};
use crate::library::{Track, TrackFlag, canonical_sort, renumber};
use crate::playlist::{self, PlaylistDocument, PlaylistFormat, import_all};

/// Working state for one remix.
#[derive(Debug)]
pub struct Editor {
    document: PlaylistDocument,
    /// Canonical order of everything imported; every shuffle starts here.
    canonical: Vec<Track>,
    pub sources: Vec<PathBuf>,
    /// Inputs that could not be imported.
    pub failures: Vec<(PathBuf, FormatError)>,
}

/// `<stem>_mixed` for the first input, the default name for a remix.
pub fn suggested_name<P: AsRef<Path>>(paths: &[P]) -> String {
    let stem = paths
        .first()
        .and_then(|p| p.as_ref().file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "playlist".to_string());
    format!("{stem}_mixed")
}

impl Editor {
    /// Import `paths` and sort the merged tracks into canonical order.
    ///
    /// Files that fail to import are kept in [`Editor::failures`]; the rest load.
    pub fn open<P: AsRef<Path>>(paths: &[P], format: PlaylistFormat) -> Self {
        let report = import_all(paths);
        let mut tracks = report.tracks;
        canonical_sort(&mut tracks);

        info!(
            sources = paths.len(),
            tracks = tracks.len(),
            failures = report.failures.len(),
            "opened playlists"
        );

        Self {
            document: PlaylistDocument::new(suggested_name(paths), format, tracks.clone()),
            canonical: tracks,
            sources: paths.iter().map(|p| p.as_ref().to_path_buf()).collect(),
            failures: report.failures,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.document.tracks
    }

    /// The imported tracks in canonical order.
    pub fn canonical(&self) -> &[Track] {
        &self.canonical
    }

    pub fn name(&self) -> &str {
        &self.document.name
    }

    pub fn set_name(&mut self, name: &str) -> std::result::Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.document.name = name.to_string();
        Ok(())
    }

    pub fn format(&self) -> PlaylistFormat {
        self.document.format
    }

    pub fn set_format(&mut self, format: PlaylistFormat) {
        self.document.format = format;
    }

    /// Whether any track is loaded.
    pub fn has_tracks(&self) -> bool {
        !self.document.tracks.is_empty()
    }

    /// Shuffle the canonical order. Row edits made since the last shuffle are discarded.
    pub fn shuffle(
        &mut self,
        generator: &mut Generator,
        request: &ShuffleRequest,
        now: DateTime<Local>,
    ) -> Result<&PlaylistDocument> {
        let mut doc = generator.shuffle(self.canonical.clone(), request, now, &self.document.name)?;
        doc.format = self.document.format;
        self.document = doc;
        Ok(&self.document)
    }

    fn track_mut(&mut self, index: usize) -> std::result::Result<&mut Track, ValidationError> {
        let len = self.document.tracks.len();
        self.document
            .tracks
            .get_mut(index)
            .ok_or(ValidationError::TrackIndex { index, len })
    }

    pub fn rename(&mut self, index: usize, name: &str) -> std::result::Result<(), ValidationError> {
        self.track_mut(index)?.rename(name);
        Ok(())
    }

    /// Re-target a track. Relative paths resolve against the original folder.
    pub fn set_path(&mut self, index: usize, path: &str) -> std::result::Result<(), ValidationError> {
        self.track_mut(index)?.set_path(path);
        Ok(())
    }

    /// Revert a track's path and name to what was imported.
    pub fn restore(&mut self, index: usize) -> std::result::Result<(), ValidationError> {
        self.track_mut(index)?.restore();
        Ok(())
    }

    /// Move the track at `from` so it ends up at `to`.
    pub fn move_track(&mut self, from: usize, to: usize) -> std::result::Result<(), ValidationError> {
        let len = self.document.tracks.len();
        for index in [from, to] {
            if index >= len {
                return Err(ValidationError::TrackIndex { index, len });
            }
        }
        if from == to {
            return Ok(());
        }

        let mut track = self.document.tracks.remove(from);
        track.flags.remove(TrackFlag::Restored);
        track.flags.insert(TrackFlag::Moved);
        self.document.tracks.insert(to, track);
        renumber(&mut self.document.tracks);
        debug!(from, to, "moved track");
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> std::result::Result<Track, ValidationError> {
        let len = self.document.tracks.len();
        if index >= len {
            return Err(ValidationError::TrackIndex { index, len });
        }
        let track = self.document.tracks.remove(index);
        renumber(&mut self.document.tracks);
        self.document.track_count = Some(self.document.tracks.len());
        Ok(track)
    }

    /// The current list with its header, as it would be written.
    pub fn to_document(&self) -> PlaylistDocument {
        self.document.clone()
    }

    /// Write the current list into `dir` and return the saved path.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        playlist::save(&self.document, dir)
    }
}
