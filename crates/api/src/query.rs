//! Query-string parameter types and parsing helpers.
//!
//! Values are taken as raw strings so that malformed input is reported as a
//! field error through the [`Validator`] instead of a generic extractor
//! rejection.

use recordshelf_core::validator::Validator;
use serde::Deserialize;

/// Parameters accepted by `GET /albums`.
#[derive(Debug, Default, Deserialize)]
pub struct AlbumListParams {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Comma-separated genre list.
    pub genres: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort: Option<String>,
}

/// Parse an integer parameter, falling back to `default` when absent or
/// empty. A value that does not parse is recorded against `key`.
pub fn read_int(value: Option<&str>, default: i64, key: &str, v: &mut Validator) -> i64 {
    match value.map(str::trim) {
        None | Some("") => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            v.add_error(key, "must be an integer value");
            default
        }),
    }
}

/// Split a comma-separated parameter, dropping empty items.
pub fn read_csv(value: Option<&str>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
