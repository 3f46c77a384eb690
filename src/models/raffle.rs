use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::Winner;

/// Raffle presentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaffleType {
    /// Winners are selected and revealed in a single atomic step
    Minor,
    /// Winners are pre-selected but revealed one at a time
    Major,
}

impl RaffleType {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "minor" => Ok(RaffleType::Minor),
            "major" => Ok(RaffleType::Major),
            _ => Err(format!("Invalid raffle type: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            RaffleType::Minor => "Minor",
            RaffleType::Major => "Major",
        }
    }
}

impl From<String> for RaffleType {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or(RaffleType::Minor)
    }
}

impl From<RaffleType> for String {
    fn from(raffle_type: RaffleType) -> Self {
        raffle_type.as_str().to_string()
    }
}

/// Which slice of the participant list a raffle draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaffleAudience {
    Everyone,
    Family,
    #[serde(rename = "non-family")]
    NonFamily,
}

impl RaffleAudience {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "everyone" => Ok(RaffleAudience::Everyone),
            "family" => Ok(RaffleAudience::Family),
            "non-family" => Ok(RaffleAudience::NonFamily),
            _ => Err(format!("Invalid raffle audience: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            RaffleAudience::Everyone => "everyone",
            RaffleAudience::Family => "family",
            RaffleAudience::NonFamily => "non-family",
        }
    }
}

impl From<String> for RaffleAudience {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or(RaffleAudience::Everyone)
    }
}

impl From<RaffleAudience> for String {
    fn from(audience: RaffleAudience) -> Self {
        audience.as_str().to_string()
    }
}

/// Raffle lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaffleStatus {
    /// No winners yet
    Pending,
    /// Major draw in progress, some winners still unrevealed
    Drawing,
    /// Terminal, all winners revealed
    Drawn,
}

impl RaffleStatus {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RaffleStatus::Pending),
            "drawing" => Ok(RaffleStatus::Drawing),
            "drawn" => Ok(RaffleStatus::Drawn),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            RaffleStatus::Pending => "pending",
            RaffleStatus::Drawing => "drawing",
            RaffleStatus::Drawn => "drawn",
        }
    }
}

impl From<String> for RaffleStatus {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or(RaffleStatus::Pending)
    }
}

impl From<RaffleStatus> for String {
    fn from(status: RaffleStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Raffle model representing one prize draw
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Raffle {
    pub id: String,
    pub title: String,
    pub event_id: Option<String>,
    /// Denormalized at creation time, never re-synced with the event
    pub event_name: Option<String>,
    pub raffle_type: String, // Stored as TEXT, use RaffleType enum for type safety
    pub count: i64,
    pub raffle_audience: String, // Stored as TEXT, use RaffleAudience enum for type safety
    pub exclude_previous_winners: bool,
    pub notes: Option<String>,
    pub status: String, // Stored as TEXT, use RaffleStatus enum for type safety
    pub created_at: NaiveDateTime,
    pub drawn_at: Option<NaiveDateTime>,
}

impl Raffle {
    /// Create a new draft Raffle (status pending, no winners)
    pub fn new(
        title: String,
        event_id: Option<String>,
        event_name: Option<String>,
        raffle_type: RaffleType,
        count: i64,
        raffle_audience: RaffleAudience,
        exclude_previous_winners: bool,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            event_id,
            event_name,
            raffle_type: raffle_type.as_str().to_string(),
            count,
            raffle_audience: raffle_audience.as_str().to_string(),
            exclude_previous_winners,
            notes,
            status: RaffleStatus::Pending.as_str().to_string(),
            created_at: chrono::Utc::now().naive_utc(),
            drawn_at: None,
        }
    }

    /// Get status as an enum
    pub fn status_enum(&self) -> RaffleStatus {
        RaffleStatus::from_str(&self.status).unwrap_or(RaffleStatus::Pending)
    }

    /// Get raffle type as an enum
    pub fn raffle_type_enum(&self) -> RaffleType {
        RaffleType::from_str(&self.raffle_type).unwrap_or(RaffleType::Minor)
    }

    /// Get audience as an enum
    pub fn audience_enum(&self) -> RaffleAudience {
        RaffleAudience::from_str(&self.raffle_audience).unwrap_or(RaffleAudience::Everyone)
    }

    /// Check if the raffle has completed its draw
    pub fn is_drawn(&self) -> bool {
        self.status_enum() == RaffleStatus::Drawn
    }
}

/// A raffle together with its winner rows, as served by the API
#[derive(Debug, Clone, Serialize)]
pub struct RaffleWithWinners {
    #[serde(flatten)]
    pub raffle: Raffle,
    pub winners: Vec<Winner>,
}
