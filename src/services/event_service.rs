use crate::error::{AppError, AppResult, RepositoryError};
use crate::models::Event;
use crate::repositories::EventRepository;
use std::sync::Arc;
use tracing::info;

/// Service for managing events
pub struct EventService {
    event_repo: Arc<EventRepository>,
}

impl EventService {
    pub fn new(event_repo: Arc<EventRepository>) -> Self {
        Self { event_repo }
    }

    /// All events, earliest date first
    pub async fn list(&self) -> AppResult<Vec<Event>> {
        self.event_repo
            .find_all()
            .await
            .map_err(|e| RepositoryError::from(e).into())
    }

    /// Create a new event
    pub async fn create(
        &self,
        name: &str,
        date: &str,
        time: Option<&str>,
        location: Option<&str>,
        notes: Option<&str>,
    ) -> AppResult<Event> {
        let name = name.trim();
        if name.is_empty() || date.trim().is_empty() {
            return Err(AppError::Validation("Name and date are required".into()));
        }

        let event = self
            .event_repo
            .create(name, date, time, location, notes)
            .await
            .map_err(RepositoryError::from)?;

        info!("Created event {} ({})", event.name, event.id);
        Ok(event)
    }

    /// Delete one event
    pub async fn remove(&self, id: &str) -> AppResult<()> {
        let removed = self
            .event_repo
            .delete(id)
            .await
            .map_err(RepositoryError::from)?;

        if !removed {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }
}
