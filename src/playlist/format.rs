use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported playlist containers.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaylistFormat {
    M3u,
    #[default]
    M3u8,
    Txt,
    Pls,
    Asx,
    Wax,
    Wvx,
    /// XSPF with paths written verbatim in `<location>`.
    Xspf,
    /// XSPF with percent-encoded `file:///` URIs in `<location>`.
    #[serde(rename = "xspf+url", alias = "xspf-url")]
    XspfUrl,
    Wpl,
    Json,
    Xml,
}

impl PlaylistFormat {
    pub const ALL: [PlaylistFormat; 12] = [
        PlaylistFormat::M3u,
        PlaylistFormat::M3u8,
        PlaylistFormat::Txt,
        PlaylistFormat::Pls,
        PlaylistFormat::Asx,
        PlaylistFormat::Wax,
        PlaylistFormat::Wvx,
        PlaylistFormat::Xspf,
        PlaylistFormat::XspfUrl,
        PlaylistFormat::Wpl,
        PlaylistFormat::Json,
        PlaylistFormat::Xml,
    ];

    /// Identifier used in configuration and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::M3u => "m3u",
            Self::M3u8 => "m3u8",
            Self::Txt => "txt",
            Self::Pls => "pls",
            Self::Asx => "asx",
            Self::Wax => "wax",
            Self::Wvx => "wvx",
            Self::Xspf => "xspf",
            Self::XspfUrl => "xspf+url",
            Self::Wpl => "wpl",
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }

    /// File extension (without dot) for saved playlists.
    pub fn extension(self) -> &'static str {
        match self {
            Self::XspfUrl => "xspf",
            other => other.name(),
        }
    }

    /// Detect the format from a file extension. `.xspf` reads as [`PlaylistFormat::Xspf`];
    /// its parser accepts both location styles.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .filter(|f| *f != Self::XspfUrl)
            .find(|f| f.extension() == ext)
    }

    pub fn is_xml(self) -> bool {
        matches!(
            self,
            Self::Asx | Self::Wax | Self::Wvx | Self::Xspf | Self::XspfUrl | Self::Wpl | Self::Xml
        )
    }
}

impl fmt::Display for PlaylistFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlaylistFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches('.').to_ascii_lowercase();
        if wanted == "xspf-url" {
            return Ok(Self::XspfUrl);
        }
        Self::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|f| f.name()).collect();
                format!("unknown playlist format {s:?} (expected one of: {})", known.join(", "))
            })
    }
}
