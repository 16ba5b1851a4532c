use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A pre-registered party. `member_all` caps the number of regular
/// (non-spare) check-ins and doubles as the revocation-cascade threshold.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Reservation {
    pub id: String,
    pub term_id: String,
    pub member_all: i64,
}
