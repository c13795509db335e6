mod shared;

pub use shared::*;

use axum::{Json, Router, routing::get};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::db::AppState;
use crate::signing::SHARED_WISHLIST_PATH;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route(SHARED_WISHLIST_PATH, get(view_shared_wishlist))
        // Shared links are opened from other sites' embeds and emails
        .layer(CorsLayer::permissive())
}
