use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An admission window. A term maps to a wristband color via its
/// guest_type; it is immutable once created.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Term {
    pub id: String,
    pub enter_scheduled_time: DateTime<Utc>,
    pub exit_scheduled_time: DateTime<Utc>,
    pub guest_type: String,
}
