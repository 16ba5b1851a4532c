use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogType {
    CheckIn,
    CheckOut,
    Enter,
    Exit,
    RegisterSpare,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::CheckIn => "check-in",
            LogType::CheckOut => "check-out",
            LogType::Enter => "enter",
            LogType::Exit => "exit",
            LogType::RegisterSpare => "register-spare",
        }
    }
}

/// Append-only audit row. Never mutated or deleted.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ActivityLogEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub guest_id: String,
    pub exhibition_id: Option<String>,
    pub log_type: String,
    /// false marks best-effort bulk entries pending reconciliation.
    pub verified: bool,
}

/// The shape a transition hands to the store; the store assigns the id.
#[derive(Debug, Clone)]
pub struct ActivityLogDraft {
    pub timestamp: DateTime<Utc>,
    pub guest_id: String,
    pub exhibition_id: Option<String>,
    pub log_type: LogType,
    pub verified: bool,
}
