//! Text helpers shared by the codecs: decoding, escaping and URI handling.

use std::borrow::Cow;
use std::time::Duration;

const UTF8_BOM: &[u8; 3] = b"\xEF\xBB\xBF";

/// Decode raw playlist bytes, dropping a UTF-8 BOM.
///
/// Invalid UTF-8 is read as Latin-1 when `latin1_fallback` is set (legacy m3u,
/// txt and pls files), otherwise replaced lossily.
pub(crate) fn decode_text(bytes: &[u8], latin1_fallback: bool) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) if latin1_fallback => bytes.iter().map(|&b| char::from(b)).collect(),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Escape XML special characters.
pub(crate) fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn starts_with_entity(rest: &str) -> bool {
    let body = match rest.find(';') {
        Some(end) => &rest[..end],
        None => return false,
    };
    if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    if let Some(dec) = body.strip_prefix('#') {
        return !dec.is_empty() && dec.chars().all(|c| c.is_ascii_digit());
    }
    let mut chars = body.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// Escape `&` characters that do not start an entity reference.
///
/// Some producers write raw ampersands into XML text; this makes their output
/// parseable without touching well-formed documents.
pub(crate) fn escape_bare_ampersands(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for (i, c) in s.char_indices() {
        if c == '&' && !starts_with_entity(&s[i + 1..]) {
            out.push_str("&amp;");
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Strip surrounding whitespace and one pair of matching quotes.
pub(crate) fn unquote(s: &str) -> &str {
    let s = s.trim();
    for q in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            return s[1..s.len() - 1].trim();
        }
    }
    s
}

/// A positive length field in seconds. Zero, negative, NaN and values too
/// large for a `Duration` all mean "unknown".
pub(crate) fn seconds_to_duration(secs: f64) -> Option<Duration> {
    if secs > 0.0 {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}

fn percent_decode(s: &str) -> String {
    urlencoding::decode(s)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| s.to_string())
}

fn has_drive_prefix(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 2 && b[0].is_ascii_alphabetic() && b[1] == b':'
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// Turn a playlist location into a filesystem path.
///
/// `file://` URIs are percent-decoded and mapped to local paths (`file:///C:/x`
/// becomes `C:/x`, `file://host/share` becomes `//host/share`). Locations without
/// a scheme are percent-decoded only when `decode_plain` is set.
pub(crate) fn location_to_path(raw: &str, decode_plain: bool) -> String {
    let raw = raw.trim();
    let Some(rest) = strip_prefix_ignore_case(raw, "file://") else {
        return if decode_plain {
            percent_decode(raw)
        } else {
            raw.to_string()
        };
    };

    let rest = strip_prefix_ignore_case(rest, "localhost/")
        .map(|r| format!("/{r}"))
        .unwrap_or_else(|| rest.to_string());
    let decoded = percent_decode(&rest);

    if let Some(after_slash) = decoded.strip_prefix('/') {
        if has_drive_prefix(after_slash) {
            return after_slash.to_string();
        }
        return decoded;
    }
    if has_drive_prefix(&decoded) {
        return decoded;
    }
    format!("//{decoded}")
}

/// Percent-encode a path, keeping `/` separators.
pub(crate) fn percent_encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// `file:///` URI for a slash-normalized path.
pub(crate) fn path_to_file_uri(path: &str) -> String {
    let encoded = percent_encode_path(path);
    if path.starts_with('/') {
        format!("file://{encoded}")
    } else {
        format!("file:///{encoded}")
    }
}
