//! The guest admission state machine: check-in, register-spare,
//! check-out, enter and exit. Each method is one transition; all reads
//! and writes that can race go through the repository's atomic unit.

use crate::domain::guest_types::GuestTypeTable;
use crate::domain::models::{
    activity_log::{ActivityLogDraft, LogType},
    guest::Guest,
    term::Term,
};
use crate::domain::ports::{ExhibitionRepository, GuestRepository, ReservationRepository};
use crate::domain::services::reservation_gate;
use crate::domain::wristband;
use crate::error::{AppError, ErrorCode};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Effective event time for one transition. Live requests stamp the
/// server clock and verified log entries; bulk replay carries the
/// client-supplied timestamp and leaves entries unverified for later
/// reconciliation.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub at: DateTime<Utc>,
    pub verified: bool,
}

impl Transition {
    pub fn live(at: DateTime<Utc>) -> Self {
        Self { at, verified: true }
    }

    pub fn replayed(at: DateTime<Utc>) -> Self {
        Self {
            at,
            verified: false,
        }
    }
}

pub struct AdmissionService {
    guests: Arc<dyn GuestRepository>,
    reservations: Arc<dyn ReservationRepository>,
    exhibitions: Arc<dyn ExhibitionRepository>,
    guest_types: GuestTypeTable,
}

impl AdmissionService {
    pub fn new(
        guests: Arc<dyn GuestRepository>,
        reservations: Arc<dyn ReservationRepository>,
        exhibitions: Arc<dyn ExhibitionRepository>,
        guest_types: GuestTypeTable,
    ) -> Self {
        Self {
            guests,
            reservations,
            exhibitions,
            guest_types,
        }
    }

    pub async fn check_in(
        &self,
        guest_id: &str,
        reservation_id: &str,
        t: Transition,
    ) -> Result<(Guest, Term), AppError> {
        self.admit(guest_id, reservation_id, false, t).await
    }

    pub async fn register_spare(
        &self,
        guest_id: &str,
        reservation_id: &str,
        t: Transition,
    ) -> Result<(Guest, Term), AppError> {
        self.admit(guest_id, reservation_id, true, t).await
    }

    /// Shared body of check-in and register-spare. Error precedence:
    /// reservation resolution, gate, wristband format/checksum, color,
    /// uniqueness.
    async fn admit(
        &self,
        guest_id: &str,
        reservation_id: &str,
        is_spare: bool,
        t: Transition,
    ) -> Result<(Guest, Term), AppError> {
        let code = wristband::normalize(guest_id);

        let (reservation, term) = self
            .reservations
            .find_with_term(reservation_id)
            .await?
            .ok_or(ErrorCode::ReservationNotFound)?;

        let guest_count = self.guests.count_by_reservation(&reservation.id).await?;
        let gate_error = if is_spare {
            reservation_gate::check_spare_eligibility(&term, guest_count, t.at)
        } else {
            reservation_gate::check_eligibility(&term, reservation.member_all, guest_count, t.at)
        };
        if let Some(code) = gate_error {
            return Err(code.into());
        }

        let prefix = self
            .guest_types
            .prefix_of(&term.guest_type)
            .ok_or(AppError::Internal)?;
        wristband::assert_wearable(&code, prefix).map_err(AppError::Code)?;
        if self.guests.find_by_id(&code).await?.is_some() {
            return Err(ErrorCode::AlreadyUsedWristband.into());
        }

        let guest = Guest::admitted(
            code.clone(),
            term.id.clone(),
            reservation.id.clone(),
            is_spare,
            t.at,
        );
        let log = ActivityLogDraft {
            timestamp: t.at,
            guest_id: code,
            exhibition_id: None,
            log_type: if is_spare {
                LogType::RegisterSpare
            } else {
                LogType::CheckIn
            },
            verified: t.verified,
        };
        // the cap is re-verified inside the store's transaction
        let member_cap = (!is_spare).then_some(reservation.member_all);
        let created = self.guests.register(&guest, member_cap, &log).await?;

        info!(guest_id = %created.id, reservation_id = %reservation.id, is_spare, "guest admitted");
        Ok((created, term))
    }

    pub async fn check_out(&self, guest_id: &str, t: Transition) -> Result<(Guest, Term), AppError> {
        let code = wristband::normalize(guest_id);
        let (guest, term) = self
            .guests
            .find_with_term(&code)
            .await?
            .ok_or(ErrorCode::GuestNotFound)?;
        if guest.revoked_at.is_some() {
            return Err(ErrorCode::GuestAlreadyCheckedOut.into());
        }

        let reservation = self
            .reservations
            .find_by_id(&guest.reservation_id)
            .await?
            .ok_or(AppError::Internal)?;

        let log = ActivityLogDraft {
            timestamp: t.at,
            guest_id: guest.id.clone(),
            exhibition_id: None,
            log_type: LogType::CheckOut,
            verified: t.verified,
        };
        // the repository runs the revocation cascade in the same unit
        let (updated, cascaded) = self
            .guests
            .check_out(&guest.id, &reservation, t.at, &log)
            .await?;
        if cascaded > 0 {
            info!(
                reservation_id = %reservation.id,
                cascaded,
                "party complete, force-revoked remaining guests"
            );
        }

        info!(guest_id = %updated.id, "guest checked out");
        Ok((updated, term))
    }

    pub async fn enter(
        &self,
        guest_id: &str,
        exhibition_id: &str,
        t: Transition,
    ) -> Result<(Guest, Term), AppError> {
        let code = wristband::normalize(guest_id);
        let (guest, term) = self
            .guests
            .find_with_term(&code)
            .await?
            .ok_or(ErrorCode::GuestNotFound)?;
        let exhibition = self
            .exhibitions
            .find_by_id(exhibition_id)
            .await?
            .ok_or(ErrorCode::ExhibitionNotFound)?;

        if guest.revoked_at.is_some() {
            return Err(ErrorCode::GuestAlreadyCheckedOut.into());
        }
        // re-entering a *different* room just overwrites the location;
        // no exit log is emitted for the room being left
        if guest.exhibition_id.as_deref() == Some(exhibition.id.as_str()) {
            return Err(ErrorCode::GuestAlreadyEntered.into());
        }
        let occupants = self.exhibitions.count_occupants(&exhibition.id).await?;
        if occupants >= exhibition.capacity {
            return Err(ErrorCode::PeopleLimitExceeded.into());
        }
        if t.at >= term.exit_scheduled_time {
            return Err(ErrorCode::ExitTimeExceeded.into());
        }

        let log = ActivityLogDraft {
            timestamp: t.at,
            guest_id: guest.id.clone(),
            exhibition_id: Some(exhibition.id.clone()),
            log_type: LogType::Enter,
            verified: t.verified,
        };
        let updated = self
            .guests
            .enter_exhibition(&guest.id, &exhibition.id, exhibition.capacity, &log)
            .await?;

        info!(guest_id = %updated.id, exhibition_id = %exhibition.id, "guest entered");
        Ok((updated, term))
    }

    pub async fn exit(
        &self,
        guest_id: &str,
        exhibition_id: &str,
        t: Transition,
    ) -> Result<(Guest, Term), AppError> {
        let code = wristband::normalize(guest_id);
        let (guest, term) = self
            .guests
            .find_with_term(&code)
            .await?
            .ok_or(ErrorCode::GuestNotFound)?;
        let exhibition = self
            .exhibitions
            .find_by_id(exhibition_id)
            .await?
            .ok_or(ErrorCode::ExhibitionNotFound)?;

        if guest.revoked_at.is_some() {
            return Err(ErrorCode::GuestAlreadyCheckedOut.into());
        }

        // exiting while not inside any room is a legal operator
        // correction; the log still names the requested exhibition
        let log = ActivityLogDraft {
            timestamp: t.at,
            guest_id: guest.id.clone(),
            exhibition_id: Some(exhibition.id.clone()),
            log_type: LogType::Exit,
            verified: t.verified,
        };
        let updated = self.guests.exit_exhibition(&guest.id, &log).await?;

        info!(guest_id = %updated.id, exhibition_id = %exhibition.id, "guest exited");
        Ok((updated, term))
    }
}
