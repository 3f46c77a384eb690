//! HTTP API surface.
//!
//! Thin axum handlers mapping REST routes onto the service layer; one
//! module per resource.

pub mod events;
pub mod participants;
pub mod raffles;
pub mod stats;

use crate::AppState;
use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Body for delete-style endpoints
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Build the full application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(participants::routes())
        .merge(events::routes())
        .merge(raffles::routes())
        .merge(stats::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
