//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every call is bounded by
//! [`QUERY_TIMEOUT`] and never retried.

use std::future::Future;
use std::time::Duration;

use crate::error::StoreError;

pub mod album_repo;

pub use album_repo::AlbumRepo;

/// Upper bound on a single store operation, including pool acquisition.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Run `fut` under [`QUERY_TIMEOUT`], tagging failures with `operation`.
pub(crate) async fn bounded<T, F>(operation: &'static str, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(QUERY_TIMEOUT, fut).await {
        Ok(result) => result.map_err(|source| StoreError::Unavailable { operation, source }),
        Err(_) => {
            tracing::warn!(
                operation,
                timeout_ms = QUERY_TIMEOUT.as_millis() as u64,
                "Store operation timed out"
            );
            Err(StoreError::Timeout {
                operation,
                timeout: QUERY_TIMEOUT,
            })
        }
    }
}
