// src/server/mod.rs

//! HTTP surface of the relay:
//! - POST /anal      - sentiment score for a piece of text
//! - POST /new_email - rewrite an email in a requested tone
//! - GET  /health    - liveness check

pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/anal", post(handlers::analyze_sentiment))
        .route("/new_email", post(handlers::rewrite_email))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
