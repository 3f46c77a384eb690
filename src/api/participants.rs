use crate::api::OkResponse;
use crate::error::AppResult;
use crate::models::Participant;
use crate::services::{ParticipantRoster, SeedSummary};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_family: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeedRequest {
    #[serde(default)]
    pub count: i64,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/participants",
            get(list_participants)
                .post(create_participant)
                .delete(clear_participants),
        )
        .route(
            "/api/participants/:id",
            put(update_participant).delete(delete_participant),
        )
        .route("/api/participants/seed", post(seed_participants))
}

async fn list_participants(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ParticipantRoster>> {
    Ok(Json(state.participant_service.list().await?))
}

async fn create_participant(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ParticipantRequest>,
) -> AppResult<(StatusCode, Json<Participant>)> {
    let participant = state
        .participant_service
        .register(&body.name, body.is_family)
        .await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

async fn update_participant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<ParticipantRequest>,
) -> AppResult<Json<Participant>> {
    let participant = state
        .participant_service
        .update(&id, &body.name, body.is_family)
        .await?;
    Ok(Json(participant))
}

async fn delete_participant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    state.participant_service.remove(&id).await?;
    Ok(Json(OkResponse::ok()))
}

async fn clear_participants(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<OkResponse>> {
    state.participant_service.clear().await?;
    Ok(Json(OkResponse::ok()))
}

async fn seed_participants(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SeedRequest>>,
) -> AppResult<(StatusCode, Json<SeedSummary>)> {
    let count = body.map(|Json(b)| b.count).unwrap_or(0);
    let summary = state.participant_service.seed(count).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}
