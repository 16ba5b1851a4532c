use crate::domain::models::activity_log::ActivityLogEntry;
use crate::domain::ports::ActivityLogRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteActivityLogRepo {
    pool: SqlitePool,
}

impl SqliteActivityLogRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityLogRepository for SqliteActivityLogRepo {
    async fn list_by_guest(&self, guest_id: &str) -> Result<Vec<ActivityLogEntry>, AppError> {
        sqlx::query_as::<_, ActivityLogEntry>(
            "SELECT * FROM activity_logs WHERE guest_id = ? ORDER BY id ASC",
        )
        .bind(guest_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
