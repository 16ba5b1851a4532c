use crate::domain::models::{
    activity_log::{ActivityLogDraft, ActivityLogEntry},
    exhibition::Exhibition,
    guest::Guest,
    reservation::Reservation,
    term::Term,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Ambient time made explicit so transitions stay deterministic in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[async_trait]
pub trait TermRepository: Send + Sync {
    async fn create(&self, term: &Term) -> Result<Term, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Term>, AppError>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn create(&self, reservation: &Reservation) -> Result<Reservation, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, AppError>;
    async fn find_with_term(&self, id: &str) -> Result<Option<(Reservation, Term)>, AppError>;
}

#[async_trait]
pub trait ExhibitionRepository: Send + Sync {
    async fn create(&self, exhibition: &Exhibition) -> Result<Exhibition, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Exhibition>, AppError>;
    /// Guests currently inside: exhibition_id matches, revoked_at null.
    async fn count_occupants(&self, id: &str) -> Result<i64, AppError>;
}

/// Guest state plus the transitions that must be atomic with their audit
/// log entry. Capacity recounts happen inside the adapter's transaction;
/// the Postgres adapter locks the owning row first.
#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Guest>, AppError>;
    async fn find_with_term(&self, id: &str) -> Result<Option<(Guest, Term)>, AppError>;
    async fn count_by_reservation(&self, reservation_id: &str) -> Result<i64, AppError>;

    /// Insert the guest and its log entry in one unit. `member_cap` is
    /// re-checked under the transaction for regular check-ins and None
    /// for spares. A duplicate id surfaces as ALREADY_USED_WRISTBAND.
    async fn register(
        &self,
        guest: &Guest,
        member_cap: Option<i64>,
        log: &ActivityLogDraft,
    ) -> Result<Guest, AppError>;

    /// Set revoked_at, clear the room, append the log entry, then run
    /// the revocation cascade if the party's revoked count crossed
    /// `member_all` — all in one unit. An already-revoked guest fails
    /// with GUEST_ALREADY_CHECKED_OUT. Returns the guest and the number
    /// of open guests the cascade force-revoked.
    async fn check_out(
        &self,
        guest_id: &str,
        reservation: &Reservation,
        revoked_at: DateTime<Utc>,
        log: &ActivityLogDraft,
    ) -> Result<(Guest, u64), AppError>;

    /// Move the guest into the room if the recount stays under capacity,
    /// appending the log entry. Fails with PEOPLE_LIMIT_EXCEEDED, or
    /// GUEST_ALREADY_CHECKED_OUT if the guest was revoked meanwhile.
    async fn enter_exhibition(
        &self,
        guest_id: &str,
        exhibition_id: &str,
        capacity: i64,
        log: &ActivityLogDraft,
    ) -> Result<Guest, AppError>;

    /// Clear the guest's room and append the log entry. Valid even when
    /// the guest is not inside any room.
    async fn exit_exhibition(
        &self,
        guest_id: &str,
        log: &ActivityLogDraft,
    ) -> Result<Guest, AppError>;
}

/// Read side of the audit trail; writes happen inside the guest
/// repository's transactions.
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn list_by_guest(&self, guest_id: &str) -> Result<Vec<ActivityLogEntry>, AppError>;
}
