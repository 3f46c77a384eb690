use crate::api::OkResponse;
use crate::error::AppResult;
use crate::models::RaffleWithWinners;
use crate::services::RevealOutcome;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaffleRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default = "default_raffle_type")]
    pub raffle_type: String,
    #[serde(default)]
    pub count: i64,
    #[serde(default = "default_audience")]
    pub raffle_audience: String,
    #[serde(default)]
    pub exclude_previous_winners: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_raffle_type() -> String {
    "Minor".to_string()
}

fn default_audience() -> String {
    "everyone".to_string()
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/raffles",
            get(list_raffles).post(create_raffle).delete(clear_raffles),
        )
        .route("/api/raffles/:id/draw", put(draw_raffle))
        .route("/api/raffles/:id/reveal", put(reveal_next_winner))
}

async fn list_raffles(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<RaffleWithWinners>>> {
    Ok(Json(state.raffle_service.list().await?))
}

async fn create_raffle(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RaffleRequest>,
) -> AppResult<(StatusCode, Json<RaffleWithWinners>)> {
    let raffle = state
        .raffle_service
        .create_draft(
            &body.title,
            body.event_id.as_deref(),
            body.event_name.as_deref(),
            &body.raffle_type,
            body.count,
            &body.raffle_audience,
            body.exclude_previous_winners,
            body.notes.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(raffle)))
}

async fn draw_raffle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<RaffleWithWinners>> {
    Ok(Json(state.raffle_service.draw(&id).await?))
}

async fn reveal_next_winner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<RevealOutcome>> {
    Ok(Json(state.raffle_service.reveal_next(&id).await?))
}

async fn clear_raffles(State(state): State<Arc<AppState>>) -> AppResult<Json<OkResponse>> {
    state.raffle_service.clear().await?;
    Ok(Json(OkResponse::ok()))
}
