use crate::domain::models::activity_log::ActivityLogEntry;
use crate::domain::ports::ActivityLogRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresActivityLogRepo {
    pool: PgPool,
}

impl PostgresActivityLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityLogRepository for PostgresActivityLogRepo {
    async fn list_by_guest(&self, guest_id: &str) -> Result<Vec<ActivityLogEntry>, AppError> {
        sqlx::query_as::<_, ActivityLogEntry>(
            "SELECT * FROM activity_logs WHERE guest_id = $1 ORDER BY id ASC",
        )
        .bind(guest_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
