use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A capacity-limited room. Occupancy = guests with this exhibition_id
/// and no revoked_at.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Exhibition {
    pub id: String,
    pub name: String,
    pub capacity: i64,
    pub room_id: String,
    pub updated_at: DateTime<Utc>,
}
