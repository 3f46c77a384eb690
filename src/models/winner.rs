use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A winner row attached to a raffle.
///
/// Name and raffle number are snapshots taken at draw time, so historical
/// results survive later edits or deletion of the participant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip)]
    pub raffle_id: String,
    pub participant_id: String,
    #[serde(rename = "name")]
    pub participant_name: String,
    pub raffle_number: i64,
    pub is_pending: bool,
    pub sort_order: i64,
}
