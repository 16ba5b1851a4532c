use crate::domain::models::exhibition::Exhibition;
use crate::domain::ports::ExhibitionRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresExhibitionRepo {
    pool: PgPool,
}

impl PostgresExhibitionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExhibitionRepository for PostgresExhibitionRepo {
    async fn create(&self, exhibition: &Exhibition) -> Result<Exhibition, AppError> {
        sqlx::query_as::<_, Exhibition>(
            "INSERT INTO exhibitions (id, name, capacity, room_id, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(&exhibition.id)
        .bind(&exhibition.name)
        .bind(exhibition.capacity)
        .bind(&exhibition.room_id)
        .bind(exhibition.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Exhibition>, AppError> {
        sqlx::query_as::<_, Exhibition>("SELECT * FROM exhibitions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_occupants(&self, id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM guests WHERE exhibition_id = $1 AND revoked_at IS NULL",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
