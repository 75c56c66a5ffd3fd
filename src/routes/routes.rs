//! Defines routes for the bookmarks API.
//!
//! ## Structure
//! - **Health endpoints** (public)
//!   - `GET    /healthz` — liveness
//!   - `GET    /readyz`  — storage readiness
//!
//! - **Bookmark endpoints** (bearer token required)
//!   - `GET    /api/bookmarks`      — list bookmarks
//!   - `POST   /api/bookmarks`      — create bookmark
//!   - `GET    /api/bookmarks/{id}` — fetch one bookmark
//!   - `PATCH  /api/bookmarks/{id}` — partial update
//!   - `DELETE /api/bookmarks/{id}` — delete bookmark

use crate::{
    handlers::{
        bookmark_handlers::{
            create_bookmark, delete_bookmark, get_bookmark, list_bookmarks, update_bookmark,
        },
        health_handlers::{healthz, readyz},
    },
    middleware::auth::require_api_token,
    state::AppState,
};
use axum::{Router, middleware, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Routes under `/api`, all behind the token gate.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route(
            "/bookmarks/{id}",
            get(get_bookmark)
                .patch(update_bookmark)
                .delete(delete_bookmark),
        )
        .route_layer(middleware::from_fn_with_state(state, require_api_token))
}

/// Build the complete application router with its state applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
