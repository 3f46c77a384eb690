use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered participant, the unit of the eligibility pool
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub is_family: bool,
    pub raffle_number: i64,
    pub created_at: NaiveDateTime,
}

impl Participant {
    /// Create a new Participant with a fresh id and the given raffle number
    pub fn new(name: String, is_family: bool, raffle_number: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            is_family,
            raffle_number,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
