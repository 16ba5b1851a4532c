use crate::domain::models::{reservation::Reservation, term::Term};
use crate::domain::ports::ReservationRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresReservationRepo {
    pool: PgPool,
}

impl PostgresReservationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepo {
    async fn create(&self, reservation: &Reservation) -> Result<Reservation, AppError> {
        sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (id, term_id, member_all)
             VALUES ($1, $2, $3)
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
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_with_term(&self, id: &str) -> Result<Option<(Reservation, Term)>, AppError> {
        let Some(reservation) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let term = sqlx::query_as::<_, Term>("SELECT * FROM terms WHERE id = $1")
            .bind(&reservation.term_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(Some((reservation, term)))
    }
}
