pub mod sqlite_activity_log_repo;
pub mod sqlite_exhibition_repo;
pub mod sqlite_guest_repo;
pub mod sqlite_reservation_repo;
pub mod sqlite_term_repo;

pub mod postgres_activity_log_repo;
pub mod postgres_exhibition_repo;
pub mod postgres_guest_repo;
pub mod postgres_reservation_repo;
pub mod postgres_term_repo;
