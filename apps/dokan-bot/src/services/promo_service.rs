use rand::distr::Alphanumeric;
use rand::Rng;
use sqlx::SqlitePool;
use tracing::info;

use dokan_db::error::StoreError;
use dokan_db::models::store::RedeemCode;
use dokan_db::repositories::redeem_repo::RedeemRepository;

const CODE_LEN: usize = 8;

/// Redeem-code issuance and redemption. Codes are shared vouchers limited
/// by total uses and by one use per user, enforced by the history table.
#[derive(Debug, Clone)]
pub struct PromoService {
    pool: SqlitePool,
    codes: RedeemRepository,
}

impl PromoService {
    pub fn new(pool: SqlitePool) -> Self {
        let codes = RedeemRepository::new(pool.clone());
        Self { pool, codes }
    }

    /// Redeems `code` for `user_id` and returns the credited amount.
    ///
    /// One transaction: guarded use-count increment (first, so racing
    /// redeemers serialize), per-user history check, history insert and
    /// balance credit. All of it commits together or not at all.
    pub async fn redeem(&self, user_id: i64, code: &str) -> Result<i64, StoreError> {
        let code = code.trim().to_uppercase();

        let mut tx = self.pool.begin().await?;

        let consumed = sqlx::query(
            "UPDATE redeem_codes SET used_count = used_count + 1
             WHERE code = ? AND used_count < max_uses",
        )
        .bind(&code)
        .execute(&mut *tx)
        .await?;
        if consumed.rows_affected() == 0 {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM redeem_codes WHERE code = ?)")
                    .bind(&code)
                    .fetch_one(&mut *tx)
                    .await?;
            return Err(if exists {
                StoreError::Exhausted
            } else {
                StoreError::NotFound("code")
            });
        }

        let already: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM redeem_history WHERE user_id = ? AND code = ?)",
        )
        .bind(user_id)
        .bind(&code)
        .fetch_one(&mut *tx)
        .await?;
        if already {
            // Dropping the transaction undoes the increment.
            return Err(StoreError::AlreadyUsed);
        }

        sqlx::query("INSERT INTO redeem_history (user_id, code) VALUES (?, ?)")
            .bind(user_id)
            .bind(&code)
            .execute(&mut *tx)
            .await?;

        let amount: i64 = sqlx::query_scalar("SELECT amount FROM redeem_codes WHERE code = ?")
            .bind(&code)
            .fetch_one(&mut *tx)
            .await?;

        let credited = sqlx::query("UPDATE users SET balance = balance + ? WHERE user_id = ?")
            .bind(amount)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        if credited.rows_affected() == 0 {
            return Err(StoreError::NotFound("user"));
        }

        tx.commit().await?;

        info!(user_id, code = %code, amount, "redeem code consumed");
        Ok(amount)
    }

    /// Generates a fresh 8-character code worth `amount` per use.
    pub async fn create_code(&self, amount: i64, max_uses: i64) -> Result<String, StoreError> {
        if amount <= 0 {
            return Err(StoreError::Validation(
                "bonus amount must be positive".to_string(),
            ));
        }
        if max_uses <= 0 {
            return Err(StoreError::Validation(
                "max uses must be positive".to_string(),
            ));
        }

        let code: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(CODE_LEN)
            .map(char::from)
            .collect::<String>()
            .to_uppercase();

        if !self.codes.create(&code, amount, max_uses).await? {
            return Err(StoreError::Validation(
                "generated code collided, try again".to_string(),
            ));
        }
        info!(code = %code, amount, max_uses, "redeem code created");
        Ok(code)
    }

    pub async fn list_codes(&self) -> Result<Vec<RedeemCode>, StoreError> {
        self.codes.list().await
    }

    pub async fn delete_code(&self, code: &str) -> Result<(), StoreError> {
        if !self.codes.delete(&code.trim().to_uppercase()).await? {
            return Err(StoreError::NotFound("code"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;
    use dokan_db::repositories::user_repo::UserRepository;

    async fn seed_user(pool: &SqlitePool, user_id: i64) -> UserRepository {
        let users = UserRepository::new(pool.clone());
        users
            .insert_if_absent(user_id, Some("U"), None, None)
            .await
            .unwrap();
        users
    }

    #[tokio::test]
    async fn redeeming_twice_credits_once() {
        let pool = test_pool().await;
        let promo = PromoService::new(pool.clone());
        let users = seed_user(&pool, 1).await;

        let code = promo.create_code(25, 10).await.unwrap();
        assert_eq!(code.len(), CODE_LEN);

        assert_eq!(promo.redeem(1, &code).await.unwrap(), 25);
        assert!(matches!(
            promo.redeem(1, &code).await,
            Err(StoreError::AlreadyUsed)
        ));

        let user = users.get(1).await.unwrap().unwrap();
        assert_eq!(user.balance, 25);

        // The failed attempt must not have burned a use.
        let stored = promo.list_codes().await.unwrap();
        assert_eq!(stored[0].used_count, 1);
    }

    #[tokio::test]
    async fn unknown_and_exhausted_codes_are_distinguished() {
        let pool = test_pool().await;
        let promo = PromoService::new(pool.clone());
        seed_user(&pool, 1).await;
        seed_user(&pool, 2).await;

        assert!(matches!(
            promo.redeem(1, "NOPE1234").await,
            Err(StoreError::NotFound("code"))
        ));

        let code = promo.create_code(10, 1).await.unwrap();
        promo.redeem(1, &code).await.unwrap();
        assert!(matches!(
            promo.redeem(2, &code).await,
            Err(StoreError::Exhausted)
        ));
    }

    #[tokio::test]
    async fn concurrent_redemption_of_a_last_use_respects_the_cap() {
        let pool = test_pool().await;
        let promo = PromoService::new(pool.clone());
        seed_user(&pool, 1).await;
        seed_user(&pool, 2).await;

        let code = promo.create_code(40, 1).await.unwrap();

        let a = {
            let promo = promo.clone();
            let code = code.clone();
            tokio::spawn(async move { promo.redeem(1, &code).await })
        };
        let b = {
            let promo = promo.clone();
            let code = code.clone();
            tokio::spawn(async move { promo.redeem(2, &code).await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let ok = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(ok, 1, "exactly one concurrent redeemer wins");
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(StoreError::Exhausted))));

        let stored = promo.list_codes().await.unwrap();
        assert_eq!(stored[0].used_count, 1);
    }

    #[tokio::test]
    async fn multi_use_codes_serve_distinct_users() {
        let pool = test_pool().await;
        let promo = PromoService::new(pool.clone());
        let users = seed_user(&pool, 1).await;
        seed_user(&pool, 2).await;

        let code = promo.create_code(15, 2).await.unwrap();
        assert_eq!(promo.redeem(1, &code).await.unwrap(), 15);
        assert_eq!(promo.redeem(2, &code).await.unwrap(), 15);

        let stored = promo.list_codes().await.unwrap();
        assert_eq!(stored[0].used_count, 2);
        assert_eq!(users.get(1).await.unwrap().unwrap().balance, 15);
        assert_eq!(users.get(2).await.unwrap().unwrap().balance, 15);
    }

    #[tokio::test]
    async fn lowercase_entry_matches_the_stored_code() {
        let pool = test_pool().await;
        let promo = PromoService::new(pool.clone());
        seed_user(&pool, 1).await;

        let code = promo.create_code(5, 1).await.unwrap();
        assert_eq!(promo.redeem(1, &code.to_lowercase()).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn code_creation_validates_numbers() {
        let pool = test_pool().await;
        let promo = PromoService::new(pool.clone());

        assert!(matches!(
            promo.create_code(0, 5).await,
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            promo.create_code(10, 0).await,
            Err(StoreError::Validation(_))
        ));
    }
}
