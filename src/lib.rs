//! Raffler Backend Library
//!
//! This module exposes the backend components for use by tests and other consumers.

pub mod api;
pub mod config;
pub mod database;
pub mod draw;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use database::Database;
use repositories::*;
use services::*;
use std::sync::Arc;

/// Application state containing all repositories and services
pub struct AppState {
    pub database: Database,
    pub participant_repo: Arc<ParticipantRepository>,
    pub event_repo: Arc<EventRepository>,
    pub raffle_repo: Arc<RaffleRepository>,
    pub participant_service: Arc<ParticipantService>,
    pub event_service: Arc<EventService>,
    pub raffle_service: Arc<RaffleService>,
}

impl AppState {
    /// Create a new AppState with initialized repositories and services
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        let database = Database::new(pool.clone());
        let participant_repo = Arc::new(ParticipantRepository::new(pool.clone()));
        let event_repo = Arc::new(EventRepository::new(pool.clone()));
        let raffle_repo = Arc::new(RaffleRepository::new(pool));

        Self {
            database,
            participant_service: Arc::new(ParticipantService::new(participant_repo.clone())),
            event_service: Arc::new(EventService::new(event_repo.clone())),
            raffle_service: Arc::new(RaffleService::new(
                raffle_repo.clone(),
                participant_repo.clone(),
            )),
            participant_repo,
            event_repo,
            raffle_repo,
        }
    }
}
