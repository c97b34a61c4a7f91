use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::models::store::RedeemCode;

#[derive(Debug, Clone)]
pub struct RedeemRepository {
    pool: SqlitePool,
}

impl RedeemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns false when the code string is already taken.
    pub async fn create(&self, code: &str, amount: i64, max_uses: i64) -> Result<bool, StoreError> {
        let res = sqlx::query(
            "INSERT OR IGNORE INTO redeem_codes (code, amount, max_uses) VALUES (?, ?, ?)",
        )
        .bind(code)
        .bind(amount)
        .bind(max_uses)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    pub async fn get(&self, code: &str) -> Result<Option<RedeemCode>, StoreError> {
        let row = sqlx::query_as::<_, RedeemCode>("SELECT * FROM redeem_codes WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn list(&self) -> Result<Vec<RedeemCode>, StoreError> {
        let rows =
            sqlx::query_as::<_, RedeemCode>("SELECT * FROM redeem_codes ORDER BY created_at")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    pub async fn delete(&self, code: &str) -> Result<bool, StoreError> {
        let res = sqlx::query("DELETE FROM redeem_codes WHERE code = ?")
            .bind(code)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() == 1)
    }

    pub async fn history_exists(&self, user_id: i64, code: &str) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM redeem_history WHERE user_id = ? AND code = ?)",
        )
        .bind(user_id)
        .bind(code)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
