use chrono::{Local, NaiveDateTime};

use crate::library::Track;

use super::format::PlaylistFormat;

/// Signature written into every generated playlist.
pub const GENERATOR: &str = "playmix";

/// Timestamp layout used by the `GENERATED` key.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header keys shared by every format's annotation syntax.
pub mod keys {
    pub const GENERATED: &str = "GENERATED";
    pub const PLAYLIST: &str = "PLAYLIST";
    pub const TRACKLIST: &str = "TRACKLIST";
    pub const DURATION: &str = "DURATION";
    pub const SEED: &str = "SEED";
    pub const SHADOW_SEED: &str = "SHADOW_SEED";
    pub const NUM_SWAPS: &str = "NUM_SWAPS";
    pub const REVERSE_STEP: &str = "REVERSE_STEP";
    pub const TRACKS: &str = "TRACKS";
}

/// An ordered track list plus the header metadata persisted alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistDocument {
    pub name: String,
    pub generated_at: Option<NaiveDateTime>,
    pub primary_seed: Option<String>,
    pub shadow_seed: Option<String>,
    pub swap_count: Option<usize>,
    pub reverse_step: Option<usize>,
    /// Formatted total duration.
    pub duration: Option<String>,
    /// Track count as declared by a parsed file. Writers always emit `tracks.len()`.
    pub track_count: Option<usize>,
    pub format: PlaylistFormat,
    pub tracks: Vec<Track>,
}

impl PlaylistDocument {
    pub fn new(name: impl Into<String>, format: PlaylistFormat, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            generated_at: None,
            primary_seed: None,
            shadow_seed: None,
            swap_count: None,
            reverse_step: None,
            duration: None,
            track_count: None,
            format,
            tracks,
        }
    }

    pub(crate) fn empty(format: PlaylistFormat) -> Self {
        Self::new(String::new(), format, Vec::new())
    }

    /// `GENERATED` value: the recorded time, or now when none was set.
    pub fn timestamp(&self) -> String {
        self.generated_at
            .unwrap_or_else(|| Local::now().naive_local())
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }

    /// Optional header entries in emission order. Swap count and reverse step are
    /// only meaningful when positive; blank seeds are treated as absent.
    pub(crate) fn optional_entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = Vec::new();
        if let Some(d) = self.duration.as_deref().filter(|d| !d.is_empty()) {
            entries.push((keys::DURATION, d.to_string()));
        }
        if let Some(s) = self.primary_seed.as_deref().filter(|s| !s.is_empty()) {
            entries.push((keys::SEED, s.to_string()));
        }
        if let Some(s) = self.shadow_seed.as_deref().filter(|s| !s.is_empty()) {
            entries.push((keys::SHADOW_SEED, s.to_string()));
        }
        if let Some(n) = self.swap_count.filter(|n| *n > 0) {
            entries.push((keys::NUM_SWAPS, n.to_string()));
        }
        if let Some(n) = self.reverse_step.filter(|n| *n > 0) {
            entries.push((keys::REVERSE_STEP, n.to_string()));
        }
        entries
    }

    /// Apply one `KEY:value` annotation read back from a file. Unknown keys are ignored.
    pub(crate) fn apply_annotation(&mut self, line: &str) {
        let Some((key, value)) = line.trim().split_once(':') else {
            return;
        };
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        match key.trim().to_ascii_uppercase().as_str() {
            keys::GENERATED => {
                self.generated_at = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok();
            }
            keys::PLAYLIST | keys::TRACKLIST => self.name = value.to_string(),
            keys::DURATION => self.duration = Some(value.to_string()),
            keys::SEED => self.primary_seed = Some(value.to_string()),
            keys::SHADOW_SEED => self.shadow_seed = Some(value.to_string()),
            keys::NUM_SWAPS => self.swap_count = value.parse().ok(),
            keys::REVERSE_STEP => self.reverse_step = value.parse().ok(),
            keys::TRACKS => self.track_count = value.parse().ok(),
            _ => {}
        }
    }
}
