use crate::models::Participant;
use sqlx::{Result as SqlxResult, SqlitePool};

/// Repository for participant data access
pub struct ParticipantRepository {
    pool: SqlitePool,
}

impl ParticipantRepository {
    /// Create a new ParticipantRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All participants, newest first
    pub async fn find_all(&self) -> SqlxResult<Vec<Participant>> {
        sqlx::query_as::<_, Participant>(
            r#"
            SELECT id, name, is_family, raffle_number, created_at
            FROM participants
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Find a participant by id
    pub async fn find_by_id(&self, id: &str) -> SqlxResult<Option<Participant>> {
        sqlx::query_as::<_, Participant>(
            r#"
            SELECT id, name, is_family, raffle_number, created_at
            FROM participants
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// The raffle number the next registration will receive
    pub async fn next_raffle_number(&self) -> SqlxResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(MAX(raffle_number), 0) + 1 FROM participants",
        )
        .fetch_one(&self.pool)
        .await
    }

    /// Register a new participant.
    ///
    /// Raffle number assignment and the insert run in one transaction so
    /// numbers stay unique and monotonic.
    pub async fn create(&self, name: &str, is_family: bool) -> SqlxResult<Participant> {
        let mut tx = self.pool.begin().await?;

        let next: i64 = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(MAX(raffle_number), 0) + 1 FROM participants",
        )
        .fetch_one(&mut *tx)
        .await?;

        let participant = Participant::new(name.to_string(), is_family, next);

        sqlx::query(
            r#"
            INSERT INTO participants (id, name, is_family, raffle_number, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&participant.id)
        .bind(&participant.name)
        .bind(participant.is_family)
        .bind(participant.raffle_number)
        .bind(participant.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(participant)
    }

    /// Bulk-insert pre-built participants (used by seeding) in one transaction
    pub async fn insert_many(&self, participants: &[Participant]) -> SqlxResult<()> {
        let mut tx = self.pool.begin().await?;

        for p in participants {
            sqlx::query(
                r#"
                INSERT INTO participants (id, name, is_family, raffle_number, created_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(&p.id)
            .bind(&p.name)
            .bind(p.is_family)
            .bind(p.raffle_number)
            .bind(p.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Update name and family flag; returns the updated row if it existed
    pub async fn update(
        &self,
        id: &str,
        name: &str,
        is_family: bool,
    ) -> SqlxResult<Option<Participant>> {
        let result = sqlx::query(
            "UPDATE participants SET name = ?, is_family = ? WHERE id = ?",
        )
        .bind(name)
        .bind(is_family)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Delete one participant; true if a row was removed
    pub async fn delete(&self, id: &str) -> SqlxResult<bool> {
        let result = sqlx::query("DELETE FROM participants WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every participant
    pub async fn delete_all(&self) -> SqlxResult<u64> {
        let result = sqlx::query("DELETE FROM participants")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
