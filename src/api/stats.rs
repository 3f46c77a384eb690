use crate::error::AppResult;
use crate::models::RaffleStatus;
use crate::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_participants: usize,
    pub next_raffle_number: i64,
    pub last_added: Option<NaiveDateTime>,
    pub total_events: usize,
    pub total_raffles: usize,
    pub pending_draws: usize,
    pub last_draw: Option<NaiveDateTime>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/stats", get(stats))
}

async fn stats(State(state): State<Arc<AppState>>) -> AppResult<Json<StatsResponse>> {
    let roster = state.participant_service.list().await?;
    let events = state.event_service.list().await?;
    let raffles = state.raffle_service.list().await?;

    let pending_draws = raffles
        .iter()
        .filter(|r| {
            matches!(
                r.raffle.status_enum(),
                RaffleStatus::Pending | RaffleStatus::Drawing
            )
        })
        .count();

    let last_draw = raffles
        .iter()
        .filter(|r| r.raffle.is_drawn())
        .map(|r| r.raffle.drawn_at.unwrap_or(r.raffle.created_at))
        .max();

    Ok(Json(StatsResponse {
        total_participants: roster.participants.len(),
        next_raffle_number: roster.next_raffle_number,
        last_added: roster.participants.first().map(|p| p.created_at),
        total_events: events.len(),
        total_raffles: raffles.len(),
        pending_draws,
        last_draw,
    }))
}
