use crate::error::{option_to_result, AppError, AppResult, RepositoryError};
use crate::models::Participant;
use crate::repositories::ParticipantRepository;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Participant list plus the number the next registration will receive
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRoster {
    pub participants: Vec<Participant>,
    pub next_raffle_number: i64,
}

/// Result of bulk-seeding test participants
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub added: i64,
    pub next_raffle_number: i64,
}

/// Service for managing participants
pub struct ParticipantService {
    participant_repo: Arc<ParticipantRepository>,
}

impl ParticipantService {
    pub fn new(participant_repo: Arc<ParticipantRepository>) -> Self {
        Self { participant_repo }
    }

    /// All participants plus the next raffle number
    pub async fn list(&self) -> AppResult<ParticipantRoster> {
        let participants = self
            .participant_repo
            .find_all()
            .await
            .map_err(RepositoryError::from)?;
        let next_raffle_number = self
            .participant_repo
            .next_raffle_number()
            .await
            .map_err(RepositoryError::from)?;

        Ok(ParticipantRoster {
            participants,
            next_raffle_number,
        })
    }

    /// Register a new participant
    pub async fn register(&self, name: &str, is_family: bool) -> AppResult<Participant> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Name is required".into()));
        }

        let participant = self
            .participant_repo
            .create(name, is_family)
            .await
            .map_err(RepositoryError::from)?;

        info!(
            "Registered participant {} (#{})",
            participant.name, participant.raffle_number
        );
        Ok(participant)
    }

    /// Edit name and family flag
    pub async fn update(&self, id: &str, name: &str, is_family: bool) -> AppResult<Participant> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Name is required".into()));
        }

        let updated = self
            .participant_repo
            .update(id, name, is_family)
            .await
            .map_err(RepositoryError::from)?;

        option_to_result(updated, "Participant not found")
    }

    /// Delete one participant
    pub async fn remove(&self, id: &str) -> AppResult<()> {
        let removed = self
            .participant_repo
            .delete(id)
            .await
            .map_err(RepositoryError::from)?;

        if !removed {
            return Err(AppError::NotFound("Participant not found".into()));
        }
        Ok(())
    }

    /// Delete every participant
    pub async fn clear(&self) -> AppResult<()> {
        let removed = self
            .participant_repo
            .delete_all()
            .await
            .map_err(RepositoryError::from)?;
        info!("Cleared {} participants", removed);
        Ok(())
    }

    /// Bulk-generate test participants.
    ///
    /// The first `min(40, count)` are flagged as family; created-at
    /// timestamps are staggered one second apart so list ordering stays
    /// stable.
    pub async fn seed(&self, count: i64) -> AppResult<SeedSummary> {
        let count = if count <= 0 { 400 } else { count };

        let start = self
            .participant_repo
            .next_raffle_number()
            .await
            .map_err(RepositoryError::from)?;
        let now = chrono::Utc::now().naive_utc();
        let family_quota = count.min(40);

        let generated: Vec<Participant> = (0..count)
            .map(|index| {
                let raffle_number = start + index;
                Participant {
                    id: Uuid::new_v4().to_string(),
                    name: format!("Test Participant {:03}", raffle_number),
                    is_family: index < family_quota,
                    raffle_number,
                    created_at: now - chrono::Duration::seconds(index),
                }
            })
            .collect();

        self.participant_repo
            .insert_many(&generated)
            .await
            .map_err(RepositoryError::from)?;

        let next_raffle_number = self
            .participant_repo
            .next_raffle_number()
            .await
            .map_err(RepositoryError::from)?;

        info!("Seeded {} test participants", count);
        Ok(SeedSummary {
            added: count,
            next_raffle_number,
        })
    }
}
