use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An organizer-created event that raffles can be attached to
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub date: String,
    pub time: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Event {
    /// Create a new Event
    pub fn new(
        name: String,
        date: String,
        time: Option<String>,
        location: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            date,
            time,
            location,
            notes,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
