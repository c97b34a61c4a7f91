use sqlx::SqlitePool;

use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct StockRepository {
    pool: SqlitePool,
}

impl StockRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn add(&self, service_id: i64, content: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO stock (service_id, content) VALUES (?, ?)")
            .bind(service_id)
            .bind(content)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn count(&self, service_id: i64) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stock WHERE service_id = ?")
            .bind(service_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Atomic FIFO consumption: one statement selects the oldest remaining
    /// item, deletes it and hands back its content. Concurrent callers can
    /// never receive the same row.
    pub async fn fetch_and_remove(&self, service_id: i64) -> Result<Option<String>, StoreError> {
        let content: Option<String> = sqlx::query_scalar(
            "DELETE FROM stock
             WHERE id = (SELECT id FROM stock WHERE service_id = ? ORDER BY id LIMIT 1)
             RETURNING content",
        )
        .bind(service_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(content)
    }
}
