use crate::models::Event;
use sqlx::{Result as SqlxResult, SqlitePool};

/// Repository for event data access
pub struct EventRepository {
    pool: SqlitePool,
}

impl EventRepository {
    /// Create a new EventRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All events, earliest date first
    pub async fn find_all(&self) -> SqlxResult<Vec<Event>> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, date, time, location, notes, created_at
            FROM events
            ORDER BY date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Find an event by id
    pub async fn find_by_id(&self, id: &str) -> SqlxResult<Option<Event>> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, date, time, location, notes, created_at
            FROM events
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert a new event
    pub async fn create(
        &self,
        name: &str,
        date: &str,
        time: Option<&str>,
        location: Option<&str>,
        notes: Option<&str>,
    ) -> SqlxResult<Event> {
        let event = Event::new(
            name.to_string(),
            date.to_string(),
            time.map(str::to_string),
            location.map(str::to_string),
            notes.map(str::to_string),
        );

        sqlx::query(
            r#"
            INSERT INTO events (id, name, date, time, location, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.id)
        .bind(&event.name)
        .bind(&event.date)
        .bind(&event.time)
        .bind(&event.location)
        .bind(&event.notes)
        .bind(event.created_at)
        .execute(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete one event; true if a row was removed
    pub async fn delete(&self, id: &str) -> SqlxResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
