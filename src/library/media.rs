use std::path::Path;

/// Audio extensions accepted everywhere in the engine (lowercase, without dot).
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "flac", "ogg", "wav", "m4a", "aac", "wma", "opus", "aiff", "aif", "alac", "dsf", "dff",
    "mka", "ac3", "dts",
];

/// Video extensions accepted everywhere in the engine (lowercase, without dot).
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v", "mpg", "mpeg", "ts", "m2ts", "3gp",
    "vob", "ogv",
];

/// Iterate the full media allow-list.
pub fn media_extensions() -> impl Iterator<Item = &'static str> {
    AUDIO_EXTENSIONS.iter().chain(VIDEO_EXTENSIONS).copied()
}

/// Whether `ext` (with or without a leading dot, any case) is allow-listed.
pub fn is_media_extension(ext: &str) -> bool {
    let ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
    media_extensions().any(|e| e == ext)
}

/// Whether `path` ends in an allow-listed media extension.
pub fn is_media_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(is_media_extension)
        .unwrap_or(false)
}

/// String form of [`is_media_path`], used on raw playlist entries before they become paths.
pub fn is_media_str(raw: &str) -> bool {
    let raw = raw.trim();
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => is_media_extension(ext),
        _ => false,
    }
}
