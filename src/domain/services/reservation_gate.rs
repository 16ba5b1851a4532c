//! Reservation eligibility gates. Pure functions over data the caller
//! already resolved, so the boundary conditions are trivially testable.

use crate::domain::models::term::Term;
use crate::error::ErrorCode;
use chrono::{DateTime, Utc};

/// May this reservation accept a regular check-in right now?
/// Eligible iff `enter_scheduled_time <= now < exit_scheduled_time` and
/// the party still has free slots (spares count against the cap here).
pub fn check_eligibility(
    term: &Term,
    member_all: i64,
    guest_count: i64,
    now: DateTime<Utc>,
) -> Option<ErrorCode> {
    if now < term.enter_scheduled_time || now >= term.exit_scheduled_time {
        return Some(ErrorCode::OutOfReservationTime);
    }
    if guest_count >= member_all {
        return Some(ErrorCode::AllMemberCheckedIn);
    }
    None
}

/// May this reservation accept a spare? Requires at least one prior
/// check-in and only the exit bound of the window; spares may be added
/// mid-window regardless of the enter bound.
pub fn check_spare_eligibility(
    term: &Term,
    guest_count: i64,
    now: DateTime<Utc>,
) -> Option<ErrorCode> {
    if guest_count == 0 {
        return Some(ErrorCode::NoMemberCheckedIn);
    }
    if now >= term.exit_scheduled_time {
        return Some(ErrorCode::ExitTimeExceeded);
    }
    None
}
