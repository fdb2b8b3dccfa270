//! Album field rules and listing configuration.

use crate::filters::SortColumn;
use crate::validator::{unique, Validator};

/// Entity label used in error messages.
pub const ENTITY: &str = "Album";

/// Sort keys a caller may request when listing albums.
pub const SORT_SAFELIST: &[&str] = &["id", "title", "artist", "-id", "-title", "-artist"];

/// Sort key used when the caller does not pick one.
pub const DEFAULT_SORT: &str = "id";

/// Sortable album fields and the quoted column each resolves to.
pub const SORT_COLUMNS: &[SortColumn] = &[
    SortColumn { field: "id", column: "\"id\"" },
    SortColumn { field: "title", column: "\"title\"" },
    SortColumn { field: "artist", column: "\"artist\"" },
];

/// Check the fields an album must satisfy before it is written.
///
/// `genres` is `None` when the caller omitted the field entirely, which is
/// distinct from supplying an empty list.
pub fn validate_album(v: &mut Validator, title: &str, artist: &str, genres: Option<&[String]>) {
    v.check(!title.is_empty(), "title", "must be provided");
    v.check(!artist.is_empty(), "artist", "must be provided");

    match genres {
        Some(genres) => v.check(unique(genres), "genres", "must not contain duplicate values"),
        None => v.add_error("genres", "must be provided"),
    }
}
