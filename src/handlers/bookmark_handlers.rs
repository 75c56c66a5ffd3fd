//! HTTP handlers for the `/api/bookmarks` resource.
//! Validate input, call the repository, and sanitize every bookmark on its
//! way out. Storage faults are passed up unchanged as 500s.

use crate::{
    errors::AppError,
    handlers::json_body::JsonOrEmpty,
    models::bookmark::{Bookmark, CreateBookmarkBody, UpdateBookmarkBody},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use tracing::info;

/// Path of a single bookmark, as sent in `Location`.
pub fn bookmark_location(id: i64) -> String {
    format!("/api/bookmarks/{}", id)
}

/// GET `/api/bookmarks`
pub async fn list_bookmarks(
    State(state): State<AppState>,
) -> Result<Json<Vec<Bookmark>>, AppError> {
    let bookmarks = state.bookmarks.list_all().await?;
    let sanitized = bookmarks
        .iter()
        .map(|b| b.sanitized(state.sanitizer.as_ref()))
        .collect();
    Ok(Json(sanitized))
}

/// POST `/api/bookmarks`
pub async fn create_bookmark(
    State(state): State<AppState>,
    JsonOrEmpty(body): JsonOrEmpty<CreateBookmarkBody>,
) -> Result<impl IntoResponse, AppError> {
    let new = body
        .validate()
        .map_err(|err| AppError::bad_request(err.to_string()))?;

    let bookmark = state.bookmarks.insert(new).await?;
    info!("Bookmark with id {} created", bookmark.id);

    Ok((
        StatusCode::CREATED,
        location_header(bookmark.id)?,
        Json(bookmark.sanitized(state.sanitizer.as_ref())),
    ))
}

/// GET `/api/bookmarks/{id}`
pub async fn get_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Bookmark>, AppError> {
    let bookmark = require_bookmark(&state, &id).await?;
    Ok(Json(bookmark.sanitized(state.sanitizer.as_ref())))
}

/// PATCH `/api/bookmarks/{id}` — merge the supplied fields, answer 204 + Location.
pub async fn update_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<JsonOrEmpty<UpdateBookmarkBody>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    // Existence first: a missing target is 404 whatever the body says.
    let existing = require_bookmark(&state, &id).await?;

    let JsonOrEmpty(body) = payload?;
    let patch = body
        .validate()
        .map_err(|err| AppError::bad_request(err.to_string()))?;

    let updated = state.bookmarks.update(existing.id, patch).await?;
    info!("Bookmark with id {} updated", updated.id);

    Ok((StatusCode::NO_CONTENT, location_header(updated.id)?))
}

/// DELETE `/api/bookmarks/{id}`
pub async fn delete_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let existing = require_bookmark(&state, &id).await?;

    // Zero rows means a concurrent delete won the race.
    if state.bookmarks.delete(existing.id).await? == 0 {
        return Err(AppError::bookmark_not_found());
    }
    info!("Bookmark with id {} deleted", existing.id);

    Ok(StatusCode::NO_CONTENT)
}

/// Load the bookmark addressed by a raw path segment, or fail with the shared 404.
///
/// A segment that is not an integer cannot name a row.
pub async fn require_bookmark(state: &AppState, raw_id: &str) -> Result<Bookmark, AppError> {
    let Ok(id) = raw_id.parse::<i64>() else {
        return Err(AppError::bookmark_not_found());
    };

    state
        .bookmarks
        .get_by_id(id)
        .await?
        .ok_or_else(AppError::bookmark_not_found)
}

fn location_header(id: i64) -> Result<HeaderMap, AppError> {
    let value = HeaderValue::from_str(&bookmark_location(id))
        .map_err(|err| AppError::internal(format!("invalid Location header: {}", err)))?;
    let mut headers = HeaderMap::new();
    headers.insert(header::LOCATION, value);
    Ok(headers)
}
