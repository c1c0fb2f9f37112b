use std::path::{Path, PathBuf};
use std::time::Duration;

/// Presentation-only status markers on a track.
///
/// Renderers switch on these to highlight edited rows; they never affect ordering.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TrackFlag {
    PathModified,
    NameModified,
    Moved,
    Restored,
}

impl TrackFlag {
    pub const ALL: [TrackFlag; 4] = [
        TrackFlag::PathModified,
        TrackFlag::NameModified,
        TrackFlag::Moved,
        TrackFlag::Restored,
    ];

    fn bit(self) -> u8 {
        match self {
            TrackFlag::PathModified => 1,
            TrackFlag::NameModified => 1 << 1,
            TrackFlag::Moved => 1 << 2,
            TrackFlag::Restored => 1 << 3,
        }
    }
}

/// A small set of [`TrackFlag`]s.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TrackFlags(u8);

impl TrackFlags {
    pub fn insert(&mut self, flag: TrackFlag) {
        self.0 |= flag.bit();
    }

    pub fn remove(&mut self, flag: TrackFlag) {
        self.0 &= !flag.bit();
    }

    pub fn contains(&self, flag: TrackFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = TrackFlag> + '_ {
        TrackFlag::ALL.into_iter().filter(|f| self.contains(*f))
    }
}

/// Tag-style metadata, filled only by playlist formats that carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
}

/// The format-independent track record every codec converges on.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Slash-normalized location.
    pub path: PathBuf,
    pub display_name: String,
    /// 1-based ordinal within its list.
    pub position: usize,
    original_path: PathBuf,
    /// Index of the input playlist this track was merged from.
    pub source_id: Option<usize>,
    pub flags: TrackFlags,
    pub metadata: Option<TrackMetadata>,
    pub duration: Option<Duration>,
    pub size_bytes: Option<u64>,
}

impl Track {
    /// Build a track from a raw path string; the display name defaults to the file stem.
    pub fn new(path: impl AsRef<str>) -> Self {
        let path = normalize_path(path.as_ref());
        let display_name = default_display_name(&path);
        Self {
            original_path: path.clone(),
            path,
            display_name,
            position: 0,
            source_id: None,
            flags: TrackFlags::default(),
            metadata: None,
            duration: None,
            size_bytes: None,
        }
    }

    /// Like [`Track::new`] but with an embedded title. Blank titles fall back to the stem.
    pub fn with_title(path: impl AsRef<str>, title: Option<&str>) -> Self {
        let mut track = Self::new(path);
        if let Some(t) = title.map(str::trim).filter(|t| !t.is_empty()) {
            track.display_name = t.to_string();
        }
        track
    }

    pub fn original_path(&self) -> &Path {
        &self.original_path
    }

    /// Path rendered with forward slashes, as stored in playlist files.
    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().replace('\\', "/")
    }

    /// File name including extension.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// User rename. Marks the track when the name differs from the file stem.
    pub fn rename(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() || name == self.display_name {
            return;
        }
        self.display_name = name.to_string();
        if self.display_name != default_display_name(&self.original_path) {
            self.flags.insert(TrackFlag::NameModified);
        } else {
            self.flags.remove(TrackFlag::NameModified);
        }
    }

    /// Re-target the path. A relative `new_path` is resolved against the directory
    /// of the original path, so a bare file name renames within the same folder.
    pub fn set_path(&mut self, new_path: &str) {
        let normalized = normalize_path(new_path.trim());
        if normalized.as_os_str().is_empty() {
            return;
        }
        let resolved = if normalized.is_relative() {
            match self.original_path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir.join(normalized),
                _ => normalized,
            }
        } else {
            normalized
        };
        self.path = resolved;
        if self.path != self.original_path {
            self.flags.insert(TrackFlag::PathModified);
        } else {
            self.flags.remove(TrackFlag::PathModified);
        }
    }

    /// Revert path and name to what was first loaded.
    pub fn restore(&mut self) {
        self.path = self.original_path.clone();
        self.display_name = default_display_name(&self.original_path);
        self.flags.clear();
        self.flags.insert(TrackFlag::Restored);
    }
}

/// Default display name: file name without its extension.
pub fn default_display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

/// Convert backslashes to forward slashes; case is preserved.
pub fn normalize_path(raw: &str) -> PathBuf {
    PathBuf::from(raw.replace('\\', "/"))
}

/// Reassign dense 1-based positions in list order.
pub fn renumber(tracks: &mut [Track]) {
    for (i, t) in tracks.iter_mut().enumerate() {
        t.position = i + 1;
    }
}
