//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// A successful lookup atomically bumps the link's click counter and
/// `last_clicked` timestamp before answering **302 Found** with the target
/// in the `Location` header. The counter update and the redirect are not
/// atomic with each other, but the update itself is a single store
/// operation, so concurrent redirects never lose a count.
///
/// # Errors
///
/// Returns 404 Not Found when the code is unknown or the link has been
/// soft-deleted; nothing is counted in that case.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target_url = state.link_service.resolve_link(&code).await?;

    tracing::debug!(code = %code, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, target_url)]))
}
