use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{FormatError, Result, ValidationError};
use crate::library::{Track, renumber};

use super::document::PlaylistDocument;
use super::format::PlaylistFormat;
use super::text::decode_text;
use super::xspf::LocationStyle;
use super::{asx, json, m3u, pls, wpl, xml, xspf};

/// Parse raw playlist bytes into tracks with dense positions.
pub fn parse(bytes: &[u8], format: PlaylistFormat) -> std::result::Result<Vec<Track>, FormatError> {
    parse_document(bytes, format).map(|doc| doc.tracks)
}

/// Parse raw playlist bytes, keeping any header keys the file carries.
pub fn parse_document(
    bytes: &[u8],
    format: PlaylistFormat,
) -> std::result::Result<PlaylistDocument, FormatError> {
    let latin1 = matches!(format, PlaylistFormat::M3u | PlaylistFormat::Txt | PlaylistFormat::Pls);
    let text = decode_text(bytes, latin1);

    let mut doc = match format {
        PlaylistFormat::M3u | PlaylistFormat::M3u8 | PlaylistFormat::Txt => m3u::parse(&text, format),
        PlaylistFormat::Pls => pls::parse(&text),
        PlaylistFormat::Asx | PlaylistFormat::Wax | PlaylistFormat::Wvx => asx::parse(&text, format)?,
        PlaylistFormat::Xspf | PlaylistFormat::XspfUrl => xspf::parse(&text, format)?,
        PlaylistFormat::Wpl => wpl::parse(&text)?,
        PlaylistFormat::Json => json::parse(&text)?,
        PlaylistFormat::Xml => xml::parse(&text)?,
    };

    renumber(&mut doc.tracks);
    debug!(%format, tracks = doc.tracks.len(), "parsed playlist");
    Ok(doc)
}

/// Serialize `doc` as `format`.
pub fn write(doc: &PlaylistDocument, format: PlaylistFormat) -> Vec<u8> {
    match format {
        PlaylistFormat::M3u | PlaylistFormat::M3u8 | PlaylistFormat::Txt => {
            m3u::write(doc, format).into_bytes()
        }
        PlaylistFormat::Pls => pls::write(doc).into_bytes(),
        PlaylistFormat::Asx | PlaylistFormat::Wax | PlaylistFormat::Wvx => asx::write(doc).into_bytes(),
        PlaylistFormat::Xspf => xspf::write(doc, LocationStyle::Verbatim).into_bytes(),
        PlaylistFormat::XspfUrl => xspf::write(doc, LocationStyle::FileUri).into_bytes(),
        PlaylistFormat::Wpl => wpl::write(doc).into_bytes(),
        PlaylistFormat::Json => json::write(doc),
        PlaylistFormat::Xml => xml::write(doc).into_bytes(),
    }
}

/// Read a playlist file, picking the format from its extension.
pub fn read_file(path: &Path) -> std::result::Result<PlaylistDocument, FormatError> {
    let format =
        PlaylistFormat::from_path(path).ok_or_else(|| FormatError::UnknownFormat(path.to_path_buf()))?;
    let bytes = fs::read(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&bytes, format)
}

/// Write `doc` into `dir` as `<name>.<ext>` and return the file path.
pub fn save(doc: &PlaylistDocument, dir: &Path) -> Result<PathBuf> {
    let name = doc.name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    // Keep the file inside `dir`.
    let stem: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();

    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{stem}.{}", doc.format.extension()));
    fs::write(&path, write(doc, doc.format))?;
    info!(path = %path.display(), format = %doc.format, tracks = doc.tracks.len(), "saved playlist");
    Ok(path)
}
