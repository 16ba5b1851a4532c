use crate::domain::models::{reservation::Reservation, term::Term};
use crate::domain::ports::ReservationRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteReservationRepo {
    pool: SqlitePool,
}

impl SqliteReservationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for SqliteReservationRepo {
    async fn create(&self, reservation: &Reservation) -> Result<Reservation, AppError> {
        sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (id, term_id, member_all)
             VALUES (?, ?, ?)
             RETURNING *",
        )
        .bind(&reservation.id)
        .bind(&reservation.term_id)
        .bind(reservation.member_all)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_with_term(&self, id: &str) -> Result<Option<(Reservation, Term)>, AppError> {
        let Some(reservation) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let term = sqlx::query_as::<_, Term>("SELECT * FROM terms WHERE id = ?")
            .bind(&reservation.term_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(Some((reservation, term)))
    }
}
