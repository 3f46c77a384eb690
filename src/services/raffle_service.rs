use crate::draw;
use crate::error::{option_to_result, AppError, AppResult, RepositoryError};
use crate::models::{Raffle, RaffleAudience, RaffleStatus, RaffleType, RaffleWithWinners, Winner};
use crate::repositories::{ParticipantRepository, RaffleRepository};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Result of revealing one winner of a Major draw
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealOutcome {
    pub revealed: Winner,
    pub remaining: i64,
    pub raffle: RaffleWithWinners,
}

/// The raffle state machine.
///
/// Owns the lifecycle pending -> drawing -> drawn (Major) and
/// pending -> drawn (Minor). Selection happens once, at draw time; reveals
/// only walk the pre-assigned sort order.
pub struct RaffleService {
    raffle_repo: Arc<RaffleRepository>,
    participant_repo: Arc<ParticipantRepository>,
}

impl RaffleService {
    pub fn new(
        raffle_repo: Arc<RaffleRepository>,
        participant_repo: Arc<ParticipantRepository>,
    ) -> Self {
        Self {
            raffle_repo,
            participant_repo,
        }
    }

    /// All raffles with their winner rows, newest first
    pub async fn list(&self) -> AppResult<Vec<RaffleWithWinners>> {
        let raffles = self
            .raffle_repo
            .find_all()
            .await
            .map_err(RepositoryError::from)?;

        let mut out = Vec::with_capacity(raffles.len());
        for raffle in raffles {
            let winners = self
                .raffle_repo
                .winners_for(&raffle.id)
                .await
                .map_err(RepositoryError::from)?;
            out.push(RaffleWithWinners { raffle, winners });
        }
        Ok(out)
    }

    /// Create a draft raffle: validation only, no drawing logic
    pub async fn create_draft(
        &self,
        title: &str,
        event_id: Option<&str>,
        event_name: Option<&str>,
        raffle_type: &str,
        count: i64,
        raffle_audience: &str,
        exclude_previous_winners: bool,
        notes: Option<&str>,
    ) -> AppResult<RaffleWithWinners> {
        let title = title.trim();
        if title.is_empty() || count < 1 {
            return Err(AppError::Validation("Title and count are required".into()));
        }

        let raffle_type = RaffleType::from_str(raffle_type).map_err(AppError::Validation)?;
        let audience = RaffleAudience::from_str(raffle_audience).map_err(AppError::Validation)?;

        let raffle = Raffle::new(
            title.to_string(),
            event_id.map(str::to_string),
            event_name.map(str::to_string),
            raffle_type,
            count,
            audience,
            exclude_previous_winners,
            notes.map(str::to_string),
        );

        self.raffle_repo
            .create(&raffle)
            .await
            .map_err(RepositoryError::from)?;

        info!("Created {} raffle draft {} ({})", raffle.raffle_type, raffle.title, raffle.id);
        Ok(RaffleWithWinners {
            raffle,
            winners: Vec::new(),
        })
    }

    /// Draw winners for a raffle.
    ///
    /// The eligible pool is evaluated fresh at draw time, so participants
    /// registered after the draft was created can still win. Re-invoking on
    /// a raffle in drawing state resets it: the existing winner rows are
    /// discarded and a fresh selection is made.
    pub async fn draw(&self, raffle_id: &str) -> AppResult<RaffleWithWinners> {
        let raffle = option_to_result(
            self.raffle_repo
                .find_by_id(raffle_id)
                .await
                .map_err(RepositoryError::from)?,
            "Raffle not found",
        )?;

        if raffle.is_drawn() {
            return Err(AppError::AlreadyDrawn("Raffle already drawn".into()));
        }

        let participants = self
            .participant_repo
            .find_all()
            .await
            .map_err(RepositoryError::from)?;

        let previous_winner_ids = if raffle.exclude_previous_winners {
            self.raffle_repo
                .previous_winner_ids()
                .await
                .map_err(RepositoryError::from)?
        } else {
            HashSet::new()
        };

        let pool = draw::eligible_pool(
            &participants,
            raffle.audience_enum(),
            raffle.exclude_previous_winners,
            &previous_winner_ids,
        );

        let winners = draw::select_winners(&pool, raffle.count.max(0) as usize)
            .map_err(|e| AppError::InsufficientPool(e.to_string()))?;

        match raffle.raffle_type_enum() {
            RaffleType::Major => {
                // All winners staged unrevealed; reveals advance the draw
                self.raffle_repo
                    .save_draw_transition(&raffle.id, RaffleStatus::Drawing, None, &winners, true)
                    .await
                    .map_err(RepositoryError::from)?;
            }
            RaffleType::Minor => {
                let drawn_at = chrono::Utc::now().naive_utc();
                self.raffle_repo
                    .save_draw_transition(
                        &raffle.id,
                        RaffleStatus::Drawn,
                        Some(drawn_at),
                        &winners,
                        false,
                    )
                    .await
                    .map_err(RepositoryError::from)?;
            }
        }

        info!(
            "Drew {} winners for raffle {} ({})",
            winners.len(),
            raffle.title,
            raffle.id
        );

        self.details(raffle_id).await
    }

    /// Reveal the next pending winner of a Major draw
    pub async fn reveal_next(&self, raffle_id: &str) -> AppResult<RevealOutcome> {
        let Some((revealed, remaining)) = self
            .raffle_repo
            .reveal_next(raffle_id)
            .await
            .map_err(RepositoryError::from)?
        else {
            return Err(AppError::NothingToReveal(
                "No pending winners to reveal".into(),
            ));
        };

        info!(
            "Revealed winner {} for raffle {} ({} remaining)",
            revealed.participant_name, raffle_id, remaining
        );

        let raffle = self.details(raffle_id).await?;
        Ok(RevealOutcome {
            revealed,
            remaining,
            raffle,
        })
    }

    /// Remove all raffles and winners
    pub async fn clear(&self) -> AppResult<()> {
        self.raffle_repo
            .delete_all()
            .await
            .map_err(RepositoryError::from)?;
        info!("Cleared all raffles");
        Ok(())
    }

    /// One raffle with its winner rows
    pub async fn details(&self, raffle_id: &str) -> AppResult<RaffleWithWinners> {
        let raffle = option_to_result(
            self.raffle_repo
                .find_by_id(raffle_id)
                .await
                .map_err(RepositoryError::from)?,
            "Raffle not found",
        )?;

        let winners = self
            .raffle_repo
            .winners_for(&raffle.id)
            .await
            .map_err(RepositoryError::from)?;

        Ok(RaffleWithWinners { raffle, winners })
    }
}
