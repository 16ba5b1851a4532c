use crate::domain::models::{
    activity_log::ActivityLogDraft, guest::Guest, reservation::Reservation, term::Term,
};
use crate::domain::ports::GuestRepository;
use crate::domain::services::revocation;
use crate::error::{is_unique_violation, AppError, ErrorCode};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};

pub struct SqliteGuestRepo {
    pool: SqlitePool,
}

impl SqliteGuestRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn insert_log(tx: &mut Transaction<'_, Sqlite>, log: &ActivityLogDraft) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO activity_logs (timestamp, guest_id, exhibition_id, log_type, verified)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(log.timestamp)
    .bind(&log.guest_id)
    .bind(&log.exhibition_id)
    .bind(log.log_type.as_str())
    .bind(log.verified)
    .execute(&mut **tx)
    .await
    .map_err(AppError::Database)?;
    Ok(())
}

#[async_trait]
impl GuestRepository for SqliteGuestRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<Guest>, AppError> {
        sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_with_term(&self, id: &str) -> Result<Option<(Guest, Term)>, AppError> {
        let Some(guest) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let term = sqlx::query_as::<_, Term>("SELECT * FROM terms WHERE id = ?")
            .bind(&guest.term_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(Some((guest, term)))
    }

    async fn count_by_reservation(&self, reservation_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM guests WHERE reservation_id = ?")
            .bind(reservation_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn register(
        &self,
        guest: &Guest,
        member_cap: Option<i64>,
        log: &ActivityLogDraft,
    ) -> Result<Guest, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        if let Some(cap) = member_cap {
            let count: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM guests WHERE reservation_id = ?")
                    .bind(&guest.reservation_id)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(AppError::Database)?;
            if count >= cap {
                return Err(ErrorCode::AllMemberCheckedIn.into());
            }
        }

        let created = sqlx::query_as::<_, Guest>(
            "INSERT INTO guests (id, term_id, reservation_id, is_spare, registered_at, revoked_at, is_force_revoked, exhibition_id)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&guest.id)
        .bind(&guest.term_id)
        .bind(&guest.reservation_id)
        .bind(guest.is_spare)
        .bind(guest.registered_at)
        .bind(guest.revoked_at)
        .bind(guest.is_force_revoked)
        .bind(&guest.exhibition_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Code(ErrorCode::AlreadyUsedWristband)
            } else {
                AppError::Database(e)
            }
        })?;

        insert_log(&mut tx, log).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn check_out(
        &self,
        guest_id: &str,
        reservation: &Reservation,
        revoked_at: DateTime<Utc>,
        log: &ActivityLogDraft,
    ) -> Result<(Guest, u64), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // the revoked guard makes the precondition part of the write, so
        // a concurrent check-out cannot slip in between read and update
        let updated = sqlx::query_as::<_, Guest>(
            "UPDATE guests SET revoked_at = ?, exhibition_id = NULL
             WHERE id = ? AND revoked_at IS NULL
             RETURNING *",
        )
        .bind(revoked_at)
        .bind(guest_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or(ErrorCode::GuestAlreadyCheckedOut)?;

        insert_log(&mut tx, log).await?;

        let revoked: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM guests WHERE reservation_id = ? AND revoked_at IS NOT NULL",
        )
        .bind(&reservation.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        let mut cascaded = 0;
        if revocation::threshold_crossed(revoked, reservation.member_all) {
            cascaded = sqlx::query(
                "UPDATE guests SET revoked_at = ?, is_force_revoked = TRUE, exhibition_id = NULL
                 WHERE reservation_id = ? AND revoked_at IS NULL",
            )
            .bind(revoked_at)
            .bind(&reservation.id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .rows_affected();
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok((updated, cascaded))
    }

    async fn enter_exhibition(
        &self,
        guest_id: &str,
        exhibition_id: &str,
        capacity: i64,
        log: &ActivityLogDraft,
    ) -> Result<Guest, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // authoritative recount; SQLite serializes writers so this cannot
        // interleave with another admission
        let occupants: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM guests WHERE exhibition_id = ? AND revoked_at IS NULL",
        )
        .bind(exhibition_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::Database)?;
        if occupants >= capacity {
            return Err(ErrorCode::PeopleLimitExceeded.into());
        }

        let updated = sqlx::query_as::<_, Guest>(
            "UPDATE guests SET exhibition_id = ?
             WHERE id = ? AND revoked_at IS NULL
             RETURNING *",
        )
        .bind(exhibition_id)
        .bind(guest_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or(ErrorCode::GuestAlreadyCheckedOut)?;

        insert_log(&mut tx, log).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn exit_exhibition(
        &self,
        guest_id: &str,
        log: &ActivityLogDraft,
    ) -> Result<Guest, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let updated = sqlx::query_as::<_, Guest>(
            "UPDATE guests SET exhibition_id = NULL
             WHERE id = ? AND revoked_at IS NULL
             RETURNING *",
        )
        .bind(guest_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .ok_or(ErrorCode::GuestAlreadyCheckedOut)?;

        insert_log(&mut tx, log).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }
}
