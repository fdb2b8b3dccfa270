//! Handlers for the `/albums` resource.
//!
//! Request bodies and query strings are validated here; the store only
//! ever sees input that has already passed the album and filter rules.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use recordshelf_core::album::{DEFAULT_SORT, ENTITY, SORT_SAFELIST};
use recordshelf_core::error::CoreError;
use recordshelf_core::filters::{validate_filters, Filters, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use recordshelf_core::validator::Validator;
use recordshelf_db::models::album::{AlbumSearch, CreateAlbum, UpdateAlbum};
use recordshelf_db::repositories::AlbumRepo;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::extract::{IdParam, JsonBody};
use crate::query::{read_csv, read_int, AlbumListParams};
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

/// Optional request header carrying the version the client last saw.
pub const EXPECTED_VERSION_HEADER: &str = "x-expected-version";

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /v1/albums?title=&artist=&genres=&page=&page_size=&sort=
///
/// List albums matching the text and genre filters, one page at a time.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<AlbumListParams>,
) -> AppResult<impl IntoResponse> {
    let mut v = Validator::new();

    let search = AlbumSearch {
        title: params.title.unwrap_or_default(),
        artist: params.artist.unwrap_or_default(),
        genres: read_csv(params.genres.as_deref()),
    };

    let mut filters = Filters::new(SORT_SAFELIST, DEFAULT_SORT);
    filters.page = read_int(params.page.as_deref(), DEFAULT_PAGE, "page", &mut v);
    filters.page_size = read_int(
        params.page_size.as_deref(),
        DEFAULT_PAGE_SIZE,
        "page_size",
        &mut v,
    );
    if let Some(sort) = params.sort.filter(|s| !s.is_empty()) {
        filters.sort = sort;
    }

    validate_filters(&mut v, &filters);
    v.finish()?;

    let (albums, metadata) = AlbumRepo::list(&state.pool, &search, &filters).await?;
    Ok(Json(PaginatedResponse {
        data: albums,
        metadata,
    }))
}

/// POST /v1/albums
///
/// Create a new album. Responds with `Location` pointing at the new resource.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateAlbum>,
) -> AppResult<impl IntoResponse> {
    let mut v = Validator::new();
    input.validate(&mut v);
    v.finish()?;

    let album = AlbumRepo::create(&state.pool, &input).await?;
    tracing::info!(album_id = album.id, "Album created");

    let location = format!("/v1/albums/{}", album.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(DataResponse { data: album }),
    ))
}

/// GET /v1/albums/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> AppResult<impl IntoResponse> {
    let album = AlbumRepo::find_by_id(&state.pool, id).await?;
    Ok(Json(DataResponse { data: album }))
}

/// PATCH /v1/albums/{id}
///
/// Apply a partial update. Fields absent from the body keep their current
/// value. When `X-Expected-Version` is sent and no longer matches, the
/// request fails with a conflict before anything is written.
pub async fn update(
    State(state): State<AppState>,
    IdParam(id): IdParam,
    headers: HeaderMap,
    JsonBody(patch): JsonBody<UpdateAlbum>,
) -> AppResult<impl IntoResponse> {
    let mut album = AlbumRepo::find_by_id(&state.pool, id).await?;

    if let Some(expected) = expected_version(&headers)? {
        if expected != album.version {
            return Err(AppError::Core(CoreError::EditConflict { entity: ENTITY, id }));
        }
    }

    album.apply(patch);

    let mut v = Validator::new();
    album.validate(&mut v);
    v.finish()?;

    let album = AlbumRepo::update(&state.pool, &album).await?;
    Ok(Json(DataResponse { data: album }))
}

/// DELETE /v1/albums/{id}
pub async fn delete(
    State(state): State<AppState>,
    IdParam(id): IdParam,
) -> AppResult<impl IntoResponse> {
    AlbumRepo::delete(&state.pool, id).await?;
    tracing::info!(album_id = id, "Album deleted");
    Ok(Json(DataResponse {
        data: json!({ "message": "album deleted" }),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read `X-Expected-Version`, if present.
fn expected_version(headers: &HeaderMap) -> AppResult<Option<i32>> {
    let Some(value) = headers.get(EXPECTED_VERSION_HEADER) else {
        return Ok(None);
    };
    value
        .to_str()
        .ok()
        .and_then(|s| s.trim().parse::<i32>().ok())
        .map(Some)
        .ok_or_else(|| {
            AppError::BadRequest(format!("{EXPECTED_VERSION_HEADER} must be an integer"))
        })
}
