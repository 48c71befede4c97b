use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Stream {
    pub id: i64,
    pub name: String,
    pub code: String,
    /// Program or principal leader managing the stream
    pub leader_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub stream_id: i64,
    pub name: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}
