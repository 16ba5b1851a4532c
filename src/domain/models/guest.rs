use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One admitted person. The wristband code is the primary key; guests are
/// never physically deleted, check-out only sets `revoked_at`.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Guest {
    pub id: String,
    pub term_id: String,
    pub reservation_id: String,
    pub is_spare: bool,
    pub registered_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub is_force_revoked: bool,
    /// Current room, None = not inside any exhibition.
    pub exhibition_id: Option<String>,
}

impl Guest {
    pub fn admitted(
        id: String,
        term_id: String,
        reservation_id: String,
        is_spare: bool,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            term_id,
            reservation_id,
            is_spare,
            registered_at,
            revoked_at: None,
            is_force_revoked: false,
            exhibition_id: None,
        }
    }
}
