use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use dokan_db::error::StoreError;
use dokan_db::models::store::User;
use dokan_db::repositories::user_repo::UserRepository;

use crate::services::settings_service::SettingsService;

/// Fixed daily check-in bonus in taka.
pub const DAILY_BONUS: i64 = 10;

#[derive(Debug, Clone)]
pub struct ReferralCredit {
    pub referrer_id: i64,
    pub amount: i64,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub is_new: bool,
    /// Present only when a new registration credited a referrer.
    pub referral: Option<ReferralCredit>,
}

#[derive(Debug, Clone)]
pub struct UserService {
    users: UserRepository,
    settings: SettingsService,
}

impl UserService {
    pub fn new(pool: SqlitePool, settings: SettingsService) -> Self {
        Self {
            users: UserRepository::new(pool),
            settings,
        }
    }

    /// Registers the user on first contact. Registration is idempotent, and
    /// the referral credit rides on the "row was created" outcome, so a
    /// repeat /start can never credit the referrer a second time.
    pub async fn register(
        &self,
        user_id: i64,
        first_name: Option<&str>,
        username: Option<&str>,
        referrer_id: Option<i64>,
    ) -> Result<Registration, StoreError> {
        // Self-referrals and unknown referrers are silently dropped; the
        // reference is set once at creation and never changed afterwards.
        let referrer_id = match referrer_id.filter(|id| *id != user_id) {
            Some(id) => self.users.exists(id).await?.then_some(id),
            None => None,
        };

        let is_new = self
            .users
            .insert_if_absent(user_id, first_name, username, referrer_id)
            .await?;
        if !is_new {
            return Ok(Registration {
                is_new: false,
                referral: None,
            });
        }

        info!(user_id, ?referrer_id, "new user registered");

        let mut referral = None;
        if let Some(referrer_id) = referrer_id {
            let amount = self.settings.ref_bonus().await;
            if amount > 0 {
                self.users.credit_referral(referrer_id, amount).await?;
                info!(referrer_id, amount, "referral bonus credited");
                referral = Some(ReferralCredit {
                    referrer_id,
                    amount,
                });
            }
        }

        Ok(Registration {
            is_new: true,
            referral,
        })
    }

    /// Daily check-in, calendar-date granularity in UTC. The guarded update
    /// credits and stamps the date in one statement.
    pub async fn claim_daily(&self, user_id: i64) -> Result<i64, StoreError> {
        let today = Utc::now().date_naive();
        if self.users.try_claim_daily(user_id, DAILY_BONUS, today).await? {
            return Ok(DAILY_BONUS);
        }
        if !self.users.exists(user_id).await? {
            return Err(StoreError::NotFound("user"));
        }
        Err(StoreError::AlreadyClaimed)
    }

    pub async fn get(&self, user_id: i64) -> Result<Option<User>, StoreError> {
        self.users.get(user_id).await
    }

    pub async fn set_language(&self, user_id: i64, lang: &str) -> Result<(), StoreError> {
        self.users.set_language(user_id, lang).await
    }

    /// Signed admin balance adjustment (/pay).
    pub async fn adjust_balance(&self, user_id: i64, amount: i64) -> Result<(), StoreError> {
        if !self.users.exists(user_id).await? {
            return Err(StoreError::NotFound("user"));
        }
        self.users.credit(user_id, amount).await
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        self.users.count().await
    }

    pub async fn top_by_balance(&self, limit: i64) -> Result<Vec<User>, StoreError> {
        self.users.top_by_balance(limit).await
    }

    pub async fn all_ids(&self) -> Result<Vec<i64>, StoreError> {
        self.users.all_ids().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;

    async fn service(pool: &SqlitePool) -> UserService {
        let settings = SettingsService::new(pool.clone()).await.unwrap();
        UserService::new(pool.clone(), settings)
    }

    #[tokio::test]
    async fn referral_credit_happens_exactly_once() {
        let pool = test_pool().await;
        let users = service(&pool).await;

        users.register(1, Some("Ref"), None, None).await.unwrap();

        let reg = users
            .register(2, Some("New"), None, Some(1))
            .await
            .unwrap();
        assert!(reg.is_new);
        let credit = reg.referral.expect("referrer credited");
        assert_eq!(credit.referrer_id, 1);
        assert_eq!(credit.amount, 10);

        // Repeat /start: not new, no second credit.
        let reg = users
            .register(2, Some("New"), None, Some(1))
            .await
            .unwrap();
        assert!(!reg.is_new);
        assert!(reg.referral.is_none());

        let referrer = users.get(1).await.unwrap().unwrap();
        assert_eq!(referrer.balance, 10);
        assert_eq!(referrer.total_referrals, 1);
        assert_eq!(referrer.total_earned, 10);
    }

    #[tokio::test]
    async fn self_and_unknown_referrers_are_ignored() {
        let pool = test_pool().await;
        let users = service(&pool).await;

        let reg = users.register(5, Some("A"), None, Some(5)).await.unwrap();
        assert!(reg.is_new);
        assert!(reg.referral.is_none());

        let reg = users
            .register(6, Some("B"), None, Some(12345))
            .await
            .unwrap();
        assert!(reg.referral.is_none());
        assert_eq!(users.get(6).await.unwrap().unwrap().referrer_id, None);
    }

    #[tokio::test]
    async fn referral_bonus_follows_the_setting() {
        let pool = test_pool().await;
        let users = service(&pool).await;
        users.register(1, Some("Ref"), None, None).await.unwrap();

        let settings = SettingsService::new(pool.clone()).await.unwrap();
        settings.set("ref_bonus", "25").await.unwrap();
        // The registering service reads through its own cache.
        let users = UserService::new(pool.clone(), settings);

        let reg = users.register(2, Some("New"), None, Some(1)).await.unwrap();
        assert_eq!(reg.referral.unwrap().amount, 25);
        assert_eq!(users.get(1).await.unwrap().unwrap().balance, 25);
    }

    #[tokio::test]
    async fn daily_claim_reports_already_claimed() {
        let pool = test_pool().await;
        let users = service(&pool).await;
        users.register(9, Some("D"), None, None).await.unwrap();

        assert_eq!(users.claim_daily(9).await.unwrap(), DAILY_BONUS);
        assert!(matches!(
            users.claim_daily(9).await,
            Err(StoreError::AlreadyClaimed)
        ));
        assert!(matches!(
            users.claim_daily(404).await,
            Err(StoreError::NotFound("user"))
        ));
        assert_eq!(users.get(9).await.unwrap().unwrap().balance, DAILY_BONUS);
    }

    #[tokio::test]
    async fn adjust_balance_requires_an_existing_user() {
        let pool = test_pool().await;
        let users = service(&pool).await;
        users.register(3, Some("C"), None, None).await.unwrap();

        users.adjust_balance(3, 100).await.unwrap();
        users.adjust_balance(3, -30).await.unwrap();
        assert_eq!(users.get(3).await.unwrap().unwrap().balance, 70);

        assert!(matches!(
            users.adjust_balance(999, 10).await,
            Err(StoreError::NotFound("user"))
        ));
    }
}
