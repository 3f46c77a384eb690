use crate::models::{Participant, Raffle, RaffleStatus, Winner};
use chrono::NaiveDateTime;
use sqlx::{Result as SqlxResult, SqlitePool};
use std::collections::HashSet;

/// Repository for raffle and winner data access.
///
/// Every write that touches both the raffle row and its winner rows runs in
/// a single transaction, so readers never observe winners without the
/// matching status.
pub struct RaffleRepository {
    pool: SqlitePool,
}

impl RaffleRepository {
    /// Create a new RaffleRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All raffles, newest first
    pub async fn find_all(&self) -> SqlxResult<Vec<Raffle>> {
        sqlx::query_as::<_, Raffle>(
            r#"
            SELECT id, title, event_id, event_name, raffle_type, count,
                   raffle_audience, exclude_previous_winners, notes, status,
                   created_at, drawn_at
            FROM raffles
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Find a raffle by id
    pub async fn find_by_id(&self, id: &str) -> SqlxResult<Option<Raffle>> {
        sqlx::query_as::<_, Raffle>(
            r#"
            SELECT id, title, event_id, event_name, raffle_type, count,
                   raffle_audience, exclude_previous_winners, notes, status,
                   created_at, drawn_at
            FROM raffles
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert a draft raffle built by the service layer
    pub async fn create(&self, raffle: &Raffle) -> SqlxResult<()> {
        sqlx::query(
            r#"
            INSERT INTO raffles
                (id, title, event_id, event_name, raffle_type, count,
                 raffle_audience, exclude_previous_winners, notes, status,
                 created_at, drawn_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&raffle.id)
        .bind(&raffle.title)
        .bind(&raffle.event_id)
        .bind(&raffle.event_name)
        .bind(&raffle.raffle_type)
        .bind(raffle.count)
        .bind(&raffle.raffle_audience)
        .bind(raffle.exclude_previous_winners)
        .bind(&raffle.notes)
        .bind(&raffle.status)
        .bind(raffle.created_at)
        .bind(raffle.drawn_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Winner rows for one raffle in reveal order
    pub async fn winners_for(&self, raffle_id: &str) -> SqlxResult<Vec<Winner>> {
        sqlx::query_as::<_, Winner>(
            r#"
            SELECT id, raffle_id, participant_id, participant_name,
                   raffle_number, is_pending, sort_order
            FROM raffle_winners
            WHERE raffle_id = ?
            ORDER BY sort_order ASC
            "#,
        )
        .bind(raffle_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Ids of participants who won a completed raffle.
    ///
    /// Restricted to non-pending rows of drawn raffles, so winners awaiting
    /// reveal in another Major draw are not excluded.
    pub async fn previous_winner_ids(&self) -> SqlxResult<HashSet<String>> {
        let ids = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT rw.participant_id
            FROM raffle_winners rw
            JOIN raffles r ON rw.raffle_id = r.id
            WHERE r.status = 'drawn' AND rw.is_pending = 0
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    /// Apply a draw transition atomically: discard any existing winner rows,
    /// insert the fresh selection with contiguous sort order, and update the
    /// raffle status in one transaction.
    pub async fn save_draw_transition(
        &self,
        raffle_id: &str,
        status: RaffleStatus,
        drawn_at: Option<NaiveDateTime>,
        winners: &[Participant],
        is_pending: bool,
    ) -> SqlxResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM raffle_winners WHERE raffle_id = ?")
            .bind(raffle_id)
            .execute(&mut *tx)
            .await?;

        for (sort_order, winner) in winners.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO raffle_winners
                    (raffle_id, participant_id, participant_name, raffle_number,
                     is_pending, sort_order)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(raffle_id)
            .bind(&winner.id)
            .bind(&winner.name)
            .bind(winner.raffle_number)
            .bind(is_pending)
            .bind(sort_order as i64)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE raffles SET status = ?, drawn_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(drawn_at)
            .bind(raffle_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Reveal the next pending winner (lowest sort order) of a Major draw.
    ///
    /// Returns the revealed winner and the number still pending, or `None`
    /// when the raffle is unknown or has nothing left to reveal. The final
    /// reveal moves the raffle to drawn and stamps `drawn_at`, all in the
    /// same transaction.
    pub async fn reveal_next(&self, raffle_id: &str) -> SqlxResult<Option<(Winner, i64)>> {
        let mut tx = self.pool.begin().await?;

        let next = sqlx::query_as::<_, Winner>(
            r#"
            SELECT id, raffle_id, participant_id, participant_name,
                   raffle_number, is_pending, sort_order
            FROM raffle_winners
            WHERE raffle_id = ? AND is_pending = 1
            ORDER BY sort_order ASC
            LIMIT 1
            "#,
        )
        .bind(raffle_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut winner) = next else {
            return Ok(None);
        };

        sqlx::query("UPDATE raffle_winners SET is_pending = 0 WHERE id = ?")
            .bind(winner.id)
            .execute(&mut *tx)
            .await?;

        let remaining: i64 = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM raffle_winners WHERE raffle_id = ? AND is_pending = 1",
        )
        .bind(raffle_id)
        .fetch_one(&mut *tx)
        .await?;

        if remaining == 0 {
            sqlx::query("UPDATE raffles SET status = ?, drawn_at = ? WHERE id = ?")
                .bind(RaffleStatus::Drawn.as_str())
                .bind(chrono::Utc::now().naive_utc())
                .bind(raffle_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        winner.is_pending = false;
        Ok(Some((winner, remaining)))
    }

    /// Remove all raffles and their winner rows
    pub async fn delete_all(&self) -> SqlxResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM raffle_winners")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM raffles").execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(())
    }
}
