use crate::domain::guest_types::GuestTypeTable;
use crate::domain::models::{guest::Guest, term::Term};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct TermResponse {
    pub id: String,
    pub enter_scheduled_time: DateTime<Utc>,
    pub exit_scheduled_time: DateTime<Utc>,
    pub guest_type: String,
    pub class: String,
}

/// The guest representation returned by every transition endpoint.
#[derive(Serialize)]
pub struct GuestResponse {
    pub id: String,
    pub is_spare: bool,
    pub registered_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub exhibition_id: Option<String>,
    pub term: TermResponse,
}

impl GuestResponse {
    pub fn build(guest: Guest, term: Term, guest_types: &GuestTypeTable) -> Self {
        let class = guest_types
            .class_of(&term.guest_type)
            .unwrap_or("General")
            .to_string();
        Self {
            id: guest.id,
            is_spare: guest.is_spare,
            registered_at: guest.registered_at,
            revoked_at: guest.revoked_at,
            exhibition_id: guest.exhibition_id,
            term: TermResponse {
                id: term.id,
                enter_scheduled_time: term.enter_scheduled_time,
                exit_scheduled_time: term.exit_scheduled_time,
                guest_type: term.guest_type,
                class,
            },
        }
    }
}
