//! Batch admission processing. Items are applied strictly in order, each
//! in its own atomic unit; one item's failure never rolls back or blocks
//! the others. The response array is positionally 1:1 with the input.

use crate::domain::models::operator::{Capability, Operator};
use crate::domain::ports::Clock;
use crate::domain::services::admission::{AdmissionService, Transition};
use crate::error::{AppError, ErrorCode};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BulkResult {
    pub is_applied: bool,
    pub code: Option<&'static str>,
}

impl BulkResult {
    fn applied() -> Self {
        Self {
            is_applied: true,
            code: None,
        }
    }

    fn rejected(code: ErrorCode) -> Self {
        Self {
            is_applied: false,
            code: Some(code.as_str()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BulkCommand {
    command: String,
    guest_id: String,
    reservation_id: Option<String>,
    timestamp: String,
}

pub struct BulkUpdateService {
    admission: Arc<AdmissionService>,
    clock: Arc<dyn Clock>,
}

impl BulkUpdateService {
    pub fn new(admission: Arc<AdmissionService>, clock: Arc<dyn Clock>) -> Self {
        Self { admission, clock }
    }

    pub async fn process(&self, operator: &Operator, items: &[Value]) -> Vec<BulkResult> {
        let mut results = Vec::with_capacity(items.len());
        for item in items {
            results.push(self.process_item(operator, item).await);
        }
        info!(
            total = items.len(),
            applied = results.iter().filter(|r| r.is_applied).count(),
            "bulk update processed"
        );
        results
    }

    async fn process_item(&self, operator: &Operator, item: &Value) -> BulkResult {
        // 1. structural validation
        let Ok(cmd) = serde_json::from_value::<BulkCommand>(item.clone()) else {
            return BulkResult::rejected(ErrorCode::BadRequest);
        };
        let known = matches!(
            cmd.command.as_str(),
            "enter" | "exit" | "check-in" | "check-out" | "register-spare"
        );
        if !known {
            return BulkResult::rejected(ErrorCode::BadRequest);
        }
        let needs_reservation = matches!(cmd.command.as_str(), "check-in" | "register-spare");
        if needs_reservation && cmd.reservation_id.is_none() {
            return BulkResult::rejected(ErrorCode::BadRequest);
        }

        // 2. capability check
        let required = match cmd.command.as_str() {
            "enter" | "exit" => Capability::Exhibition,
            _ => Capability::Executive,
        };
        if !operator.can(required) {
            return BulkResult::rejected(ErrorCode::Forbidden);
        }

        // 3. client timestamp, must not be in the future
        let Some(at) = parse_timestamp(&cmd.timestamp) else {
            return BulkResult::rejected(ErrorCode::InvalidTimestamp);
        };
        if at > self.clock.now() {
            return BulkResult::rejected(ErrorCode::InvalidTimestamp);
        }

        // 4. dispatch; the client timestamp is the effective event time
        let t = Transition::replayed(at);
        let outcome = match cmd.command.as_str() {
            "check-in" => {
                self.admission
                    .check_in(&cmd.guest_id, cmd.reservation_id.as_deref().unwrap_or(""), t)
                    .await
            }
            "register-spare" => {
                self.admission
                    .register_spare(&cmd.guest_id, cmd.reservation_id.as_deref().unwrap_or(""), t)
                    .await
            }
            "check-out" => self.admission.check_out(&cmd.guest_id, t).await,
            // exhibition terminals operate one room: their id is the room id
            "enter" => self.admission.enter(&cmd.guest_id, &operator.id, t).await,
            "exit" => self.admission.exit(&cmd.guest_id, &operator.id, t).await,
            _ => unreachable!("command validated above"),
        };

        match outcome {
            Ok(_) => BulkResult::applied(),
            Err(AppError::Code(code)) => BulkResult::rejected(code),
            Err(err) => {
                error!(command = %cmd.command, guest_id = %cmd.guest_id, "bulk item failed: {err}");
                BulkResult::rejected(ErrorCode::InternalError)
            }
        }
    }
}

/// RFC 3339, or a bare "YYYY-MM-DD hh:mm:ss" read as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
