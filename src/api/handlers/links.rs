//! Handlers for link management endpoints (create, list, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "code": "mylink"   // optional, 6-8 alphanumeric characters
/// }
/// ```
///
/// # Responses
///
/// - **201 Created** with the link, including its composed `short_url`
/// - **400 Bad Request** for an invalid URL or code shape
/// - **409 Conflict** when the supplied code belongs to an active link
/// - **500 Internal Server Error** when auto-generation exhausts its
///   attempt budget
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(&payload.url, payload.code)
        .await?;

    let short_url = state.link_service.short_url(&link.code);

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, short_url)),
    ))
}

/// Lists all active links, newest first.
///
/// # Endpoint
///
/// `GET /links`
///
/// Soft-deleted links are excluded. No pagination.
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    let body = links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.code);
            LinkResponse::from_link(link, short_url)
        })
        .collect();

    Ok(Json(body))
}

/// Soft-deletes a short link.
///
/// # Endpoint
///
/// `DELETE /links/{code}`
///
/// The row is kept; its code becomes available for reuse, which resets the
/// click counters for the next occupant. Deleting an already-deleted link
/// succeeds; only a code that never existed yields **404 Not Found**.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
