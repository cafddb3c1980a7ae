//! Deterministic mapping between storage keys across pipeline stages.
//!
//! All functions here are pure and total: the same input always yields the
//! same output, and nothing ever fails. Redelivered events therefore
//! converge on the same output key and overwrite instead of duplicating.

use chrono::NaiveDateTime;

/// Final path segment of a key.
pub fn basename(key: &str) -> &str {
    match key.rfind('/') {
        Some(i) => &key[i + 1..],
        None => key,
    }
}

/// Remove exactly one trailing `.ext` from the final path segment.
///
/// Dots in directory names are left alone, and a leading dot of the
/// basename (e.g. `.env`) is not treated as an extension.
pub fn strip_extension(key: &str) -> &str {
    let base_start = key.rfind('/').map(|i| i + 1).unwrap_or(0);
    match key[base_start..].rfind('.') {
        Some(dot) if dot > 0 => &key[..base_start + dot],
        _ => key,
    }
}

/// Extension of the final path segment, including the dot, or `""`.
pub fn extension(key: &str) -> &str {
    let base = basename(key);
    match base.rfind('.') {
        Some(dot) if dot > 0 => &base[dot..],
        _ => "",
    }
}

/// Map an input key under `source_prefix` to an output key under
/// `dest_prefix`, preserving the directory structure in between and
/// swapping the extension for `dest_extension`.
///
/// A key outside `source_prefix` falls back to the basename alone. That is
/// a deliberate degraded mode, not an error: failing here would make the
/// whole event unprocessable.
pub fn derive_output_key(
    key: &str,
    source_prefix: &str,
    dest_prefix: &str,
    dest_extension: &str,
) -> String {
    match key.strip_prefix(source_prefix) {
        Some(relative) => format!("{dest_prefix}{}{dest_extension}", strip_extension(relative)),
        None => format!(
            "{dest_prefix}{}{dest_extension}",
            strip_extension(basename(key))
        ),
    }
}

/// Collision-resistant destination key for the ingestion producer:
/// `{prefix}{stem}_{YYYYmmdd_HHMMSS}{ext}`.
pub fn timestamped_key(prefix: &str, file_name: &str, now: NaiveDateTime) -> String {
    format!(
        "{prefix}{}_{}{}",
        strip_extension(file_name),
        now.format("%Y%m%d_%H%M%S"),
        extension(file_name),
    )
}

/// Reverse the transport-level encoding of an event key: `+` means space,
/// then percent-decode. Invalid sequences decode lossily rather than
/// failing, since an undecodable key must not poison the event.
pub fn decode_key(raw: &str) -> String {
    let unplussed = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(unplussed.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Percent-encode a key the way the storage substrate does in events:
/// each path segment encoded, separators left intact.
pub fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
