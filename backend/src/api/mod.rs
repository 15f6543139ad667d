//! API module
//!
//! HTTP request handlers for campers, activities and signups, and the
//! router that wires them together.

pub mod activities;
pub mod campers;
pub mod middleware;
pub mod signups;
pub mod utils;

use crate::camp::CampDb;
use crate::error::AppError;
use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Build the application router around a shared store handle
pub fn router(db: Arc<CampDb>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route(
            "/campers",
            get(campers::list_campers).post(campers::create_camper),
        )
        .route(
            "/campers/:id",
            get(campers::get_camper)
                .patch(campers::update_camper)
                .delete(campers::delete_camper),
        )
        .route("/activities", get(activities::list_activities))
        .route("/activities/:id", delete(activities::delete_activity))
        .route("/signups", post(signups::create_signup))
        .fallback(not_found)
        // The last layer added is the outermost: CORS, then tracing, then request ids
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(db)
}

async fn home() -> &'static str {
    ""
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn not_found() -> AppError {
    AppError::NotFound
}
