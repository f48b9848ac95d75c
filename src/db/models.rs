use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `questions` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct DbQuestion {
    pub id: i64,
    pub option_a: String,
    pub option_b: String,
    pub option_a_votes: i64,
    pub option_b_votes: i64,
    pub is_flagged: bool,
    pub created_at: DateTime<Utc>,
}
