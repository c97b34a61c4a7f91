use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::models::store::User;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn exists(&self, user_id: i64) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = ?)")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Idempotent registration. Returns true only when the row was created,
    /// so repeat /start invocations report "not new" and can never re-credit
    /// a referral.
    pub async fn insert_if_absent(
        &self,
        user_id: i64,
        first_name: Option<&str>,
        username: Option<&str>,
        referrer_id: Option<i64>,
    ) -> Result<bool, StoreError> {
        let res = sqlx::query(
            "INSERT OR IGNORE INTO users (user_id, first_name, username, referrer_id)
             VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(first_name)
        .bind(username)
        .bind(referrer_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    /// Relative balance adjustment. Negative amounts deduct without a floor;
    /// purchase debits go through the guarded settlement path instead.
    pub async fn credit(&self, user_id: i64, amount: i64) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET balance = balance + ? WHERE user_id = ?")
            .bind(amount)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// One statement keeps balance, referral count and lifetime earnings
    /// consistent with each other.
    pub async fn credit_referral(&self, referrer_id: i64, amount: i64) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE users
             SET balance = balance + ?,
                 total_referrals = total_referrals + 1,
                 total_earned = total_earned + ?
             WHERE user_id = ?",
        )
        .bind(amount)
        .bind(amount)
        .bind(referrer_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Guarded daily-bonus claim: credits and stamps today's date in one
    /// statement. Returns false when the user already claimed on `today`.
    pub async fn try_claim_daily(
        &self,
        user_id: i64,
        amount: i64,
        today: NaiveDate,
    ) -> Result<bool, StoreError> {
        let res = sqlx::query(
            "UPDATE users SET balance = balance + ?, last_daily_claim = ?
             WHERE user_id = ?
               AND (last_daily_claim IS NULL OR last_daily_claim <> ?)",
        )
        .bind(amount)
        .bind(today)
        .bind(user_id)
        .bind(today)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    pub async fn set_language(&self, user_id: i64, lang: &str) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET language = ? WHERE user_id = ?")
            .bind(lang)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn top_by_balance(&self, limit: i64) -> Result<Vec<User>, StoreError> {
        let users =
            sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY balance DESC LIMIT ?")
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;
        Ok(users)
    }

    /// Every registered user id, for broadcast fan-out.
    pub async fn all_ids(&self) -> Result<Vec<i64>, StoreError> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT user_id FROM users ORDER BY user_id")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }
}
