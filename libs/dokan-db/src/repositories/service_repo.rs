use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::models::store::{Service, ServiceKind};

#[derive(Debug, Clone)]
pub struct ServiceRepository {
    pool: SqlitePool,
}

impl ServiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        price: i64,
        kind: ServiceKind,
        description: Option<&str>,
        question: Option<&str>,
    ) -> Result<i64, StoreError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO services (name, price, kind, description, question)
             VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(name)
        .bind(price)
        .bind(kind)
        .bind(description)
        .bind(question)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Service>, StoreError> {
        let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(service)
    }

    pub async fn list(&self) -> Result<Vec<Service>, StoreError> {
        let services = sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(services)
    }

    /// Deletes the service; its stock cascades away, historical orders keep
    /// a NULL back-reference. Returns false when the id did not exist.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let res = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() == 1)
    }

    pub async fn update_price(&self, id: i64, price: i64) -> Result<bool, StoreError> {
        let res = sqlx::query("UPDATE services SET price = ? WHERE id = ?")
            .bind(price)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() == 1)
    }
}
