use crate::domain::models::term::Term;
use crate::domain::ports::TermRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteTermRepo {
    pool: SqlitePool,
}

impl SqliteTermRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TermRepository for SqliteTermRepo {
    async fn create(&self, term: &Term) -> Result<Term, AppError> {
        sqlx::query_as::<_, Term>(
            "INSERT INTO terms (id, enter_scheduled_time, exit_scheduled_time, guest_type)
             VALUES (?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&term.id)
        .bind(term.enter_scheduled_time)
        .bind(term.exit_scheduled_time)
        .bind(&term.guest_type)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Term>, AppError> {
        sqlx::query_as::<_, Term>("SELECT * FROM terms WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
