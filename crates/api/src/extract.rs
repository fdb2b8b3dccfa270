//! Request extractors whose rejections are reported as [`AppError`].
//!
//! Axum's stock `Json` and `Path` extractors answer malformed input with a
//! plain-text body. These wrappers keep every failure inside the JSON
//! `{error, code}` envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use recordshelf_core::types::DbId;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body. Any failure to read or decode it is a `400`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::BadRequest(json_rejection_message(&rejection))),
        }
    }
}

fn json_rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonSyntaxError(_) => "body contains badly-formed JSON".to_string(),
        JsonRejection::MissingJsonContentType(_) => {
            "body must be sent with content-type application/json".to_string()
        }
        JsonRejection::JsonDataError(err) => err.body_text(),
        other => other.body_text(),
    }
}

/// The `{id}` path segment. A segment that is not an integer names no
/// record, so it is reported as `404` like any other unknown id.
#[derive(Debug, Clone, Copy)]
pub struct IdParam(pub DbId);

impl<S> FromRequestParts<S> for IdParam
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "Unparseable id parameter");
                AppError::NotFound
            })?;
        Ok(Self(id))
    }
}
