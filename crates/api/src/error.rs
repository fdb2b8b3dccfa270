use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use recordshelf_core::error::CoreError;
use recordshelf_db::error::StoreError;
use serde_json::{json, Value};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`StoreError`] and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `recordshelf_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An error from the album store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route or resource matches the request path.
    #[error("Not found")]
    NotFound,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";
const EDIT_CONFLICT_MESSAGE: &str =
    "unable to update the record due to an edit conflict, please try again";
const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::ValidationFailed(fields) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    json!(fields),
                ),
                CoreError::EditConflict { .. } => (
                    StatusCode::CONFLICT,
                    "EDIT_CONFLICT",
                    json!(EDIT_CONFLICT_MESSAGE),
                ),
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", json!(msg)),
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", json!(NOT_FOUND_MESSAGE)),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - `RecordNotFound` maps to 404.
/// - `EditConflict` maps to 409.
/// - `UnsupportedSort` maps to 422, reported against the `sort` field.
/// - Backend failures map to 500 with a sanitized message; the cause is logged.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, Value) {
    match err {
        StoreError::RecordNotFound => {
            (StatusCode::NOT_FOUND, "NOT_FOUND", json!(NOT_FOUND_MESSAGE))
        }
        StoreError::EditConflict => (
            StatusCode::CONFLICT,
            "EDIT_CONFLICT",
            json!(EDIT_CONFLICT_MESSAGE),
        ),
        StoreError::UnsupportedSort(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "VALIDATION_ERROR",
            json!({ "sort": "invalid sort value" }),
        ),
        StoreError::Timeout { .. } | StoreError::Unavailable { .. } => {
            tracing::error!(
                operation = err.operation().unwrap_or("unknown"),
                error = %err,
                "Store unavailable"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                json!(INTERNAL_MESSAGE),
            )
        }
    }
}
