use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Append-only audit row for an individual send attempt, reported back by the
/// automation pipeline.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct EmailLogEntry {
    pub id: i64,
    pub subscriber_id: i64,
    pub subject: String,
    pub status: String,
    pub sent_at: String,
}
