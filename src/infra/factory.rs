use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, PgPool, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::guest_types::GuestTypeTable;
use crate::domain::ports::{Clock, SystemClock};
use crate::domain::services::{admission::AdmissionService, bulk_update::BulkUpdateService};
use crate::infra::repositories::{
    postgres_activity_log_repo::PostgresActivityLogRepo,
    postgres_exhibition_repo::PostgresExhibitionRepo, postgres_guest_repo::PostgresGuestRepo,
    postgres_reservation_repo::PostgresReservationRepo, postgres_term_repo::PostgresTermRepo,
    sqlite_activity_log_repo::SqliteActivityLogRepo, sqlite_exhibition_repo::SqliteExhibitionRepo,
    sqlite_guest_repo::SqliteGuestRepo, sqlite_reservation_repo::SqliteReservationRepo,
    sqlite_term_repo::SqliteTermRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let guest_types = GuestTypeTable::builtin();

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let guest_repo = Arc::new(PostgresGuestRepo::new(pool.clone()));
        let reservation_repo = Arc::new(PostgresReservationRepo::new(pool.clone()));
        let exhibition_repo = Arc::new(PostgresExhibitionRepo::new(pool.clone()));

        let admission = Arc::new(AdmissionService::new(
            guest_repo.clone(),
            reservation_repo.clone(),
            exhibition_repo.clone(),
            guest_types.clone(),
        ));
        let bulk = Arc::new(BulkUpdateService::new(admission.clone(), clock.clone()));

        AppState {
            config: config.clone(),
            term_repo: Arc::new(PostgresTermRepo::new(pool.clone())),
            reservation_repo,
            exhibition_repo,
            guest_repo,
            activity_log_repo: Arc::new(PostgresActivityLogRepo::new(pool.clone())),
            admission,
            bulk,
            clock,
            guest_types: Arc::new(guest_types),
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        build_sqlite_state(config.clone(), pool)
    }
}

/// SQLite wiring, shared with the integration-test harness.
pub fn build_sqlite_state(config: Config, pool: SqlitePool) -> AppState {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let guest_types = GuestTypeTable::builtin();

    let guest_repo = Arc::new(SqliteGuestRepo::new(pool.clone()));
    let reservation_repo = Arc::new(SqliteReservationRepo::new(pool.clone()));
    let exhibition_repo = Arc::new(SqliteExhibitionRepo::new(pool.clone()));

    let admission = Arc::new(AdmissionService::new(
        guest_repo.clone(),
        reservation_repo.clone(),
        exhibition_repo.clone(),
        guest_types.clone(),
    ));
    let bulk = Arc::new(BulkUpdateService::new(admission.clone(), clock.clone()));

    AppState {
        config,
        term_repo: Arc::new(SqliteTermRepo::new(pool.clone())),
        reservation_repo,
        exhibition_repo,
        guest_repo,
        activity_log_repo: Arc::new(SqliteActivityLogRepo::new(pool)),
        admission,
        bulk,
        clock,
        guest_types: Arc::new(guest_types),
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
