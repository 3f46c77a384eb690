use crate::api::OkResponse;
use crate::error::AppResult;
use crate::models::Event;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct EventRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/:id", delete(delete_event))
}

async fn list_events(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Event>>> {
    Ok(Json(state.event_service.list().await?))
}

async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EventRequest>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let event = state
        .event_service
        .create(
            &body.name,
            &body.date,
            body.time.as_deref(),
            body.location.as_deref(),
            body.notes.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    state.event_service.remove(&id).await?;
    Ok(Json(OkResponse::ok()))
}
