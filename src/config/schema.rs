use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::playlist::PlaylistFormat;
use crate::seed::SeedFormat;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/playmix/config.toml` or `~/.config/playmix/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLAYMIX__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generator: GeneratorSettings,
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Container written by `generate` and `remix` unless overridden.
    pub playlist_format: PlaylistFormat,
    /// How derived seeds are rendered.
    pub seed_format: SeedFormat,
    /// Shuffle with a freshly derived shadow seed instead of the primary one.
    pub use_shadow_seed: bool,
    /// Where playlists are saved. Defaults to the current directory.
    pub output_dir: Option<PathBuf>,
    /// Default playlist name for `generate`.
    pub name: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            playlist_format: PlaylistFormat::M3u8,
            seed_format: SeedFormat::DigitsOnly,
            use_shadow_seed: false,
            output_dir: None,
            name: "playmix".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Narrow the media allow-list to these extensions (case-insensitive, without dot).
    /// Empty means the whole allow-list.
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Read durations and tags from media files while scanning.
    pub read_tags: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: Vec::new(),
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
            read_tags: true,
        }
    }
}
