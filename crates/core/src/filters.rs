//! Paging and sorting parameters for listing endpoints, plus the pagination
//! metadata derived from them.

use serde::Serialize;

use crate::validator::{permitted, Validator};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Page used when the caller does not supply one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// `page * page_size` may not exceed this, which bounds the OFFSET.
pub const MAX_RECORD_WINDOW: i64 = 10_000_000;

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Maps a sortable field name to the quoted SQL column it orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortColumn {
    pub field: &'static str,
    pub column: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Caller-chosen page window and sort key, checked against a server-defined
/// safelist.
#[derive(Debug, Clone)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    /// Field name, optionally prefixed with `-` for descending order.
    pub sort: String,
    pub sort_safelist: &'static [&'static str],
}

impl Filters {
    pub fn new(sort_safelist: &'static [&'static str], default_sort: &str) -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort: default_sort.to_string(),
            sort_safelist,
        }
    }

    /// Resolve the sort key to a quoted column through `columns`.
    ///
    /// Returns `None` when the key is not in the safelist or has no column
    /// mapping; the caller must refuse to build a query in that case.
    pub fn sort_column(&self, columns: &[SortColumn]) -> Option<&'static str> {
        if !permitted(&self.sort, self.sort_safelist) {
            return None;
        }
        let field = self.sort.strip_prefix('-').unwrap_or(&self.sort);
        columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.column)
    }

    pub fn sort_direction(&self) -> SortDirection {
        if self.sort.starts_with('-') {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Rows to skip before the current page. Never negative, even for
    /// filters that were not validated.
    pub fn offset(&self) -> i64 {
        self.page
            .saturating_sub(1)
            .max(0)
            .saturating_mul(self.page_size.max(0))
    }
}

/// Check page bounds and the sort key.
pub fn validate_filters(v: &mut Validator, filters: &Filters) {
    v.check(filters.page > 0, "page", "must be greater than zero");
    v.check(
        filters.page.saturating_mul(filters.page_size.max(1)) <= MAX_RECORD_WINDOW,
        "page",
        "must not reach beyond the first 10 million records",
    );
    v.check(filters.page_size > 0, "page_size", "must be greater than zero");
    v.check(
        filters.page_size <= MAX_PAGE_SIZE,
        "page_size",
        "must be a maximum of 100",
    );
    v.check(
        permitted(&filters.sort, filters.sort_safelist),
        "sort",
        "invalid sort value",
    );
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Page bookkeeping returned alongside a listing.
///
/// All fields are zero when nothing matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub current_page: i64,
    pub page_size: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub total_records: i64,
}

impl Metadata {
    /// Derive metadata from the match count taken before windowing.
    pub fn calculate(total_records: i64, page: i64, page_size: i64) -> Self {
        if total_records <= 0 || page_size <= 0 {
            return Self::default();
        }
        Self {
            current_page: page,
            page_size,
            first_page: 1,
            last_page: (total_records + page_size - 1) / page_size,
            total_records,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
