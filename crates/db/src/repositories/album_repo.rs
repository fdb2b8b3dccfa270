//! Repository for the `albums` table.
//!
//! Updates use the `version` column as an optimistic lock: a write only
//! lands when the caller's version matches the stored one, and each
//! successful write advances it by exactly one.

use recordshelf_core::album::SORT_COLUMNS;
use recordshelf_core::filters::{Filters, Metadata};
use recordshelf_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::album::{Album, AlbumSearch, CreateAlbum};
use crate::repositories::bounded;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, created_at, title, artist, genres, version";

/// Listing predicate. `$1` title, `$2` artist, `$3` required genres.
const SEARCH_PREDICATE: &str = "\
    (to_tsvector('simple', title) @@ plainto_tsquery('simple', $1) OR $1 = '') \
    AND (to_tsvector('simple', artist) @@ plainto_tsquery('simple', $2) OR $2 = '') \
    AND (genres @> $3 OR cardinality($3) = 0)";

/// Provides CRUD and search operations for albums.
pub struct AlbumRepo;

impl AlbumRepo {
    /// Insert a new album, returning the row with its assigned `id`,
    /// `created_at` and `version`.
    ///
    /// The input is expected to have been validated already.
    pub async fn create(pool: &PgPool, input: &CreateAlbum) -> Result<Album, StoreError> {
        let query = format!(
            "INSERT INTO albums (title, artist, genres) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let genres: &[String] = input.genres.as_deref().unwrap_or_default();
        bounded(
            "albums.create",
            sqlx::query_as::<_, Album>(&query)
                .bind(&input.title)
                .bind(&input.artist)
                .bind(genres)
                .fetch_one(pool),
        )
        .await
    }

    /// Find an album by id. Ids below 1 are never looked up.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Album, StoreError> {
        if id < 1 {
            return Err(StoreError::RecordNotFound);
        }
        let query = format!("SELECT {COLUMNS} FROM albums WHERE id = $1");
        bounded(
            "albums.find_by_id",
            sqlx::query_as::<_, Album>(&query)
                .bind(id)
                .fetch_optional(pool),
        )
        .await?
        .ok_or(StoreError::RecordNotFound)
    }

    /// List albums matching `search`, ordered by the requested sort key and
    /// then by `id` ascending, restricted to the page window in `filters`.
    ///
    /// Metadata is computed from the full match count, not the window. An
    /// unlisted sort key is rejected before any query is issued.
    pub async fn list(
        pool: &PgPool,
        search: &AlbumSearch,
        filters: &Filters,
    ) -> Result<(Vec<Album>, Metadata), StoreError> {
        let sort_column = filters
            .sort_column(SORT_COLUMNS)
            .ok_or_else(|| StoreError::UnsupportedSort(filters.sort.clone()))?;
        let direction = filters.sort_direction().as_sql();

        let count_query = format!("SELECT count(*) FROM albums WHERE {SEARCH_PREDICATE}");
        let page_query = format!(
            "SELECT {COLUMNS} FROM albums \
             WHERE {SEARCH_PREDICATE} \
             ORDER BY {sort_column} {direction}, id ASC \
             LIMIT $4 OFFSET $5"
        );

        let (albums, total) = bounded(
            "albums.list",
            fetch_page(pool, search, filters, &count_query, &page_query),
        )
        .await?;

        let metadata = Metadata::calculate(total, filters.page, filters.page_size);
        Ok((albums, metadata))
    }

    /// Write `album`'s fields if its `version` still matches the stored one.
    ///
    /// Returns the updated row carrying the incremented version. Zero
    /// matching rows means the album was changed or deleted by someone else;
    /// both cases are reported as [`StoreError::EditConflict`].
    pub async fn update(pool: &PgPool, album: &Album) -> Result<Album, StoreError> {
        let query = format!(
            "UPDATE albums SET \
                title = $1, \
                artist = $2, \
                genres = $3, \
                version = version + 1 \
             WHERE id = $4 AND version = $5 \
             RETURNING {COLUMNS}"
        );
        bounded(
            "albums.update",
            sqlx::query_as::<_, Album>(&query)
                .bind(&album.title)
                .bind(&album.artist)
                .bind(album.genres.as_slice())
                .bind(album.id)
                .bind(album.version)
                .fetch_optional(pool),
        )
        .await?
        .ok_or(StoreError::EditConflict)
    }

    /// Delete an album. Deleting a missing id is an error, not a no-op.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), StoreError> {
        if id < 1 {
            return Err(StoreError::RecordNotFound);
        }
        let result = bounded(
            "albums.delete",
            sqlx::query("DELETE FROM albums WHERE id = $1")
                .bind(id)
                .execute(pool),
        )
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::RecordNotFound);
        }
        Ok(())
    }
}

/// Count all matches, then fetch the requested window. Both statements run
/// in one read-only `REPEATABLE READ` transaction so the count and the rows
/// come from the same snapshot. The window query is skipped when nothing
/// matches.
async fn fetch_page(
    pool: &PgPool,
    search: &AlbumSearch,
    filters: &Filters,
    count_query: &str,
    page_query: &str,
) -> Result<(Vec<Album>, i64), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;

    let total: i64 = sqlx::query_scalar(count_query)
        .bind(&search.title)
        .bind(&search.artist)
        .bind(search.genres.as_slice())
        .fetch_one(&mut *tx)
        .await?;

    let albums = if total == 0 {
        Vec::new()
    } else {
        sqlx::query_as::<_, Album>(page_query)
            .bind(&search.title)
            .bind(&search.artist)
            .bind(search.genres.as_slice())
            .bind(filters.limit())
            .bind(filters.offset())
            .fetch_all(&mut *tx)
            .await?
    };

    tx.commit().await?;
    Ok((albums, total))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;
    use recordshelf_core::album::{DEFAULT_SORT, SORT_SAFELIST};
    use sqlx::postgres::PgPoolOptions;

    use super::*;

    /// A pool that fails any query that actually reaches it.
    fn unreachable_pool() -> PgPool {
        PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://recordshelf@127.0.0.1:1/recordshelf")
            .unwrap()
    }

    #[tokio::test]
    async fn unreachable_pool_reports_unavailable() {
        let pool = unreachable_pool();
        let err = AlbumRepo::find_by_id(&pool, 1).await.unwrap_err();
        assert!(err.is_unavailable(), "got {err:?}");
        assert_eq!(err.operation(), Some("albums.find_by_id"));
    }

    #[tokio::test]
    async fn find_by_non_positive_id_skips_backend() {
        let pool = unreachable_pool();
        assert_matches!(AlbumRepo::find_by_id(&pool, 0).await, Err(StoreError::RecordNotFound));
        assert_matches!(AlbumRepo::find_by_id(&pool, -3).await, Err(StoreError::RecordNotFound));
    }

    #[tokio::test]
    async fn delete_non_positive_id_skips_backend() {
        let pool = unreachable_pool();
        assert_matches!(AlbumRepo::delete(&pool, 0).await, Err(StoreError::RecordNotFound));
    }

    #[tokio::test]
    async fn list_on_unreachable_pool_reports_unavailable() {
        let pool = unreachable_pool();
        let filters = Filters::new(SORT_SAFELIST, DEFAULT_SORT);

        let err = AlbumRepo::list(&pool, &AlbumSearch::default(), &filters)
            .await
            .unwrap_err();
        assert!(err.is_unavailable(), "got {err:?}");
        assert_eq!(err.operation(), Some("albums.list"));
    }

    #[tokio::test]
    async fn list_rejects_unlisted_sort_before_querying() {
        let pool = unreachable_pool();
        let mut filters = Filters::new(SORT_SAFELIST, DEFAULT_SORT);
        filters.sort = "nonexistent_field".into();

        let result = AlbumRepo::list(&pool, &AlbumSearch::default(), &filters).await;
        assert_matches!(result, Err(StoreError::UnsupportedSort(key)) if key == "nonexistent_field");
    }
}
