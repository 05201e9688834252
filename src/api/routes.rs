//! Link management route configuration.

use crate::api::handlers::{create_link_handler, delete_link_handler, list_links_handler};
use crate::api::middleware::rate_limit;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// The link management routes, rate limited per client IP.
///
/// # Endpoints
///
/// - `POST   /links`         - Create a short link (custom or generated code)
/// - `GET    /links`         - List active links, newest first
/// - `DELETE /links/{code}`  - Soft-delete a link
pub fn link_routes(behind_proxy: bool) -> Router<AppState> {
    let router = Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route("/links/{code}", delete(delete_link_handler));

    if behind_proxy {
        router.layer(rate_limit::proxy_layer())
    } else {
        router.layer(rate_limit::layer())
    }
}
