pub mod album;
pub mod health;

use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// ```text
/// /albums          list, create
/// /albums/{id}     get, update (PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/albums", album::router())
}

/// Fallback for paths no route matches.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
