use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::info;

use dokan_db::error::StoreError;
use dokan_db::models::store::{OrderDetail, OrderStatus, Service, ServiceKind};
use dokan_db::repositories::order_repo::OrderRepository;
use dokan_db::repositories::service_repo::ServiceRepository;
use dokan_db::repositories::stock_repo::StockRepository;
use dokan_db::repositories::user_repo::UserRepository;

use crate::services::notification_service::Notify;

const MANUAL_PLACEHOLDER: &str = "Manual Delivery Pending";

/// Snapshot taken when a purchase is initiated. Settlement charges exactly
/// this price, so a concurrent admin price edit never touches an in-flight
/// purchase or the order history.
#[derive(Debug, Clone)]
pub struct PendingPurchase {
    pub user_id: i64,
    pub service_id: i64,
    pub service_name: String,
    pub price: i64,
    pub kind: ServiceKind,
    pub question: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SettledOrder {
    pub order_id: i64,
    pub service_name: String,
    pub price: i64,
    pub status: OrderStatus,
    /// Delivered payload for auto services, None while manual fulfillment
    /// is pending.
    pub content: Option<String>,
}

#[derive(Debug)]
pub enum ConfirmOutcome {
    /// The service wants user input first; show the prompt and settle once
    /// the reply arrives.
    NeedsInput(String),
    Settled(SettledOrder),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveAction {
    Complete,
    Refund,
}

#[derive(Debug, Clone)]
pub struct ResolvedOrder {
    pub order_id: i64,
    pub user_id: i64,
    pub service_name: String,
    pub price: i64,
    pub action: ResolveAction,
}

/// The purchase state machine. Every compound mutation runs as one
/// transaction whose first statement is a guarded UPDATE, so concurrent
/// settlements serialize on the write lock and losers observe committed
/// state instead of racing it.
#[derive(Clone)]
pub struct StoreService {
    pool: SqlitePool,
    users: UserRepository,
    services: ServiceRepository,
    stock: StockRepository,
    orders: OrderRepository,
    notifier: Arc<dyn Notify>,
}

impl StoreService {
    pub fn new(pool: SqlitePool, notifier: Arc<dyn Notify>) -> Self {
        let users = UserRepository::new(pool.clone());
        let services = ServiceRepository::new(pool.clone());
        let stock = StockRepository::new(pool.clone());
        let orders = OrderRepository::new(pool.clone());
        Self {
            pool,
            users,
            services,
            stock,
            orders,
            notifier,
        }
    }

    /// Validates a purchase attempt and snapshots the service. Performs no
    /// mutation; the balance and stock checks here are advisory and are
    /// re-verified inside the settlement transaction.
    pub async fn initiate(
        &self,
        user_id: i64,
        service_id: i64,
    ) -> Result<PendingPurchase, StoreError> {
        let service = self
            .services
            .get(service_id)
            .await?
            .ok_or(StoreError::NotFound("service"))?;
        let user = self
            .users
            .get(user_id)
            .await?
            .ok_or(StoreError::NotFound("user"))?;

        if user.balance < service.price {
            return Err(StoreError::InsufficientBalance);
        }
        if service.kind == ServiceKind::Auto && self.stock.count(service_id).await? == 0 {
            return Err(StoreError::OutOfStock);
        }

        Ok(PendingPurchase {
            user_id,
            service_id,
            service_name: service.name,
            price: service.price,
            kind: service.kind,
            question: service.question,
        })
    }

    /// Either asks for the required input or settles immediately.
    pub async fn confirm(&self, pending: &PendingPurchase) -> Result<ConfirmOutcome, StoreError> {
        if let Some(question) = &pending.question {
            return Ok(ConfirmOutcome::NeedsInput(question.clone()));
        }
        let settled = self.settle(pending, None).await?;
        Ok(ConfirmOutcome::Settled(settled))
    }

    pub async fn supply_input(
        &self,
        pending: &PendingPurchase,
        input: &str,
    ) -> Result<SettledOrder, StoreError> {
        self.settle(pending, Some(input)).await
    }

    /// The authoritative step: debit, consume stock, record the order,
    /// all in one transaction or not at all.
    pub async fn settle(
        &self,
        pending: &PendingPurchase,
        input: Option<&str>,
    ) -> Result<SettledOrder, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Guarded debit first. It takes the write lock and closes the race
        // window between the advisory check at initiate and now; the balance
        // can never go negative through this path.
        let debited = sqlx::query(
            "UPDATE users SET balance = balance - ? WHERE user_id = ? AND balance >= ?",
        )
        .bind(pending.price)
        .bind(pending.user_id)
        .bind(pending.price)
        .execute(&mut *tx)
        .await?;
        if debited.rows_affected() == 0 {
            return Err(StoreError::InsufficientBalance);
        }

        let (content, status) = match pending.kind {
            ServiceKind::Auto => {
                let content: Option<String> = sqlx::query_scalar(
                    "DELETE FROM stock
                     WHERE id = (SELECT id FROM stock WHERE service_id = ? ORDER BY id LIMIT 1)
                     RETURNING content",
                )
                .bind(pending.service_id)
                .fetch_optional(&mut *tx)
                .await?;
                match content {
                    Some(content) => (Some(content), OrderStatus::Completed),
                    // Depletion discovered here overrides initiate's check;
                    // dropping the transaction returns the debit.
                    None => return Err(StoreError::OutOfStock),
                }
            }
            ServiceKind::Manual => (None, OrderStatus::Pending),
        };

        let order_id: i64 = sqlx::query_scalar(
            "INSERT INTO orders (user_id, service_id, content, price, status, user_input)
             VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(pending.user_id)
        .bind(pending.service_id)
        .bind(content.as_deref().unwrap_or(MANUAL_PLACEHOLDER))
        .bind(pending.price)
        .bind(status)
        .bind(input)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            order_id,
            user_id = pending.user_id,
            service = %pending.service_name,
            status = status.as_str(),
            "order settled"
        );

        let admin_text = match status {
            OrderStatus::Completed => format!(
                "⚡ <b>Auto Service Sold</b>\nOrder: #{}\nUser: <code>{}</code>\nService: {}\nPrice: {} TK",
                order_id, pending.user_id, pending.service_name, pending.price
            ),
            _ => {
                let mut text = format!(
                    "🛒 <b>New Order Request</b>\nOrder: #{}\nUser: <code>{}</code>\nService: {}\nPrice: {} TK",
                    order_id, pending.user_id, pending.service_name, pending.price
                );
                if let Some(input) = input {
                    text.push_str(&format!(
                        "\n\n📝 <b>User Input</b>: <code>{}</code>",
                        escape_html(input)
                    ));
                }
                text
            }
        };
        self.notifier.notify_admins(&admin_text).await;

        Ok(SettledOrder {
            order_id,
            service_name: pending.service_name.clone(),
            price: pending.price,
            status,
            content,
        })
    }

    /// Admin resolution of a pending order. The status transition is
    /// guarded, so a second invocation reports `AlreadyResolved` and a
    /// refund can never credit twice.
    pub async fn resolve(
        &self,
        order_id: i64,
        action: ResolveAction,
    ) -> Result<ResolvedOrder, StoreError> {
        let target = match action {
            ResolveAction::Complete => OrderStatus::Completed,
            ResolveAction::Refund => OrderStatus::Refunded,
        };

        let mut tx = self.pool.begin().await?;

        let moved = sqlx::query("UPDATE orders SET status = ? WHERE id = ? AND status = 'pending'")
            .bind(target)
            .bind(order_id)
            .execute(&mut *tx)
            .await?;
        if moved.rows_affected() == 0 {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM orders WHERE id = ?)")
                    .bind(order_id)
                    .fetch_one(&mut *tx)
                    .await?;
            return Err(if exists {
                StoreError::AlreadyResolved
            } else {
                StoreError::NotFound("order")
            });
        }

        let (user_id, price, service_name): (i64, i64, Option<String>) = sqlx::query_as(
            "SELECT o.user_id, o.price, s.name
             FROM orders o LEFT JOIN services s ON o.service_id = s.id
             WHERE o.id = ?",
        )
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

        if action == ResolveAction::Refund {
            sqlx::query("UPDATE users SET balance = balance + ? WHERE user_id = ?")
                .bind(price)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        let service_name = service_name.unwrap_or_else(|| "unknown".to_string());
        info!(
            order_id,
            user_id,
            action = ?action,
            "order resolved"
        );

        let buyer_text = match action {
            ResolveAction::Complete => format!(
                "✅ <b>Order Complete</b>\n\nYour account is active, you can check it now.\n\nService: {}",
                service_name
            ),
            ResolveAction::Refund => format!(
                "↩️ Order #{} refunded. {} TK returned to your balance.",
                order_id, price
            ),
        };
        self.notifier.notify_user(user_id, &buyer_text).await;

        Ok(ResolvedOrder {
            order_id,
            user_id,
            service_name,
            price,
            action,
        })
    }

    pub async fn pending_orders(&self) -> Result<Vec<OrderDetail>, StoreError> {
        self.orders.pending().await
    }

    pub async fn order(&self, order_id: i64) -> Result<Option<OrderDetail>, StoreError> {
        self.orders.get(order_id).await
    }

    pub async fn service(&self, service_id: i64) -> Result<Option<Service>, StoreError> {
        self.services.get(service_id).await
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_pool, RecordingNotifier};
    use dokan_db::repositories::redeem_repo::RedeemRepository;

    async fn setup() -> (SqlitePool, StoreService, Arc<RecordingNotifier>) {
        let pool = test_pool().await;
        let notifier = Arc::new(RecordingNotifier::default());
        let service = StoreService::new(pool.clone(), notifier.clone());
        (pool, service, notifier)
    }

    async fn seed_user(pool: &SqlitePool, user_id: i64, balance: i64) {
        let users = UserRepository::new(pool.clone());
        users
            .insert_if_absent(user_id, Some("Test"), None, None)
            .await
            .unwrap();
        users.credit(user_id, balance).await.unwrap();
    }

    async fn balance_of(pool: &SqlitePool, user_id: i64) -> i64 {
        UserRepository::new(pool.clone())
            .get(user_id)
            .await
            .unwrap()
            .unwrap()
            .balance
    }

    #[tokio::test]
    async fn manual_purchase_runs_the_full_state_machine() {
        let (pool, store, notifier) = setup().await;
        seed_user(&pool, 10, 100).await;
        let sid = ServiceRepository::new(pool.clone())
            .create("Gmail Setup", 50, ServiceKind::Manual, None, Some("Enter Gmail"))
            .await
            .unwrap();

        let pending = store.initiate(10, sid).await.unwrap();
        assert_eq!(pending.price, 50);

        let prompt = match store.confirm(&pending).await.unwrap() {
            ConfirmOutcome::NeedsInput(prompt) => prompt,
            other => panic!("expected input prompt, got {other:?}"),
        };
        assert_eq!(prompt, "Enter Gmail");

        let settled = store
            .supply_input(&pending, "test@gmail.com")
            .await
            .unwrap();
        assert_eq!(settled.status, OrderStatus::Pending);
        assert_eq!(settled.content, None);
        assert_eq!(balance_of(&pool, 10).await, 50);

        let order = store.order(settled.order_id).await.unwrap().unwrap();
        assert_eq!(order.user_input.as_deref(), Some("test@gmail.com"));
        assert_eq!(order.status, OrderStatus::Pending);

        let admin_msgs = notifier.admin_msgs.lock().unwrap().clone();
        assert_eq!(admin_msgs.len(), 1);
        assert!(admin_msgs[0].contains("New Order Request"));
        assert!(admin_msgs[0].contains("test@gmail.com"));

        let resolved = store
            .resolve(settled.order_id, ResolveAction::Complete)
            .await
            .unwrap();
        assert_eq!(resolved.service_name, "Gmail Setup");
        let order = store.order(settled.order_id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Completed);

        let user_msgs = notifier.user_msgs.lock().unwrap().clone();
        assert_eq!(user_msgs.len(), 1);
        assert_eq!(user_msgs[0].0, 10);
        assert!(user_msgs[0].1.contains("active"));
    }

    #[tokio::test]
    async fn auto_purchase_settles_immediately() {
        let (pool, store, _notifier) = setup().await;
        seed_user(&pool, 20, 20).await;
        let sid = ServiceRepository::new(pool.clone())
            .create("Netflix Key", 20, ServiceKind::Auto, None, None)
            .await
            .unwrap();
        let stock = StockRepository::new(pool.clone());
        stock.add(sid, "key1").await.unwrap();

        let pending = store.initiate(20, sid).await.unwrap();
        let settled = match store.confirm(&pending).await.unwrap() {
            ConfirmOutcome::Settled(settled) => settled,
            other => panic!("expected settlement, got {other:?}"),
        };

        assert_eq!(settled.status, OrderStatus::Completed);
        assert_eq!(settled.content.as_deref(), Some("key1"));
        assert_eq!(balance_of(&pool, 20).await, 0);
        assert_eq!(stock.count(sid).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn initiate_reports_specific_rejections_without_mutating() {
        let (pool, store, _notifier) = setup().await;
        seed_user(&pool, 30, 5).await;
        let sid = ServiceRepository::new(pool.clone())
            .create("Pricey", 50, ServiceKind::Auto, None, None)
            .await
            .unwrap();

        assert!(matches!(
            store.initiate(30, 999).await,
            Err(StoreError::NotFound("service"))
        ));
        assert!(matches!(
            store.initiate(30, sid).await,
            Err(StoreError::InsufficientBalance)
        ));

        seed_user(&pool, 31, 100).await;
        assert!(matches!(
            store.initiate(31, sid).await,
            Err(StoreError::OutOfStock)
        ));
        assert_eq!(balance_of(&pool, 30).await, 5);
        assert_eq!(balance_of(&pool, 31).await, 100);
    }

    #[tokio::test]
    async fn concurrent_settlements_never_double_issue_stock() {
        let (pool, store, _notifier) = setup().await;
        let sid = ServiceRepository::new(pool.clone())
            .create("Keys", 10, ServiceKind::Auto, None, None)
            .await
            .unwrap();
        let stock = StockRepository::new(pool.clone());
        for i in 0..3 {
            stock.add(sid, &format!("key-{i}")).await.unwrap();
        }

        let mut pendings = Vec::new();
        for uid in 0..5 {
            seed_user(&pool, 100 + uid, 10).await;
            pendings.push(store.initiate(100 + uid, sid).await.unwrap());
        }

        let mut handles = Vec::new();
        for pending in pendings {
            let store = store.clone();
            handles.push(tokio::spawn(
                async move { store.settle(&pending, None).await },
            ));
        }

        let mut issued = Vec::new();
        let mut out_of_stock = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(settled) => issued.push(settled.content.unwrap()),
                Err(StoreError::OutOfStock) => out_of_stock += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        issued.sort();
        issued.dedup();
        assert_eq!(issued.len(), 3, "each stocked key issued exactly once");
        assert_eq!(out_of_stock, 2);
        assert_eq!(stock.count(sid).await.unwrap(), 0);

        // The losers' debits rolled back with their transactions.
        let mut total = 0;
        for uid in 0..5 {
            total += balance_of(&pool, 100 + uid).await;
        }
        assert_eq!(total, 20);
    }

    #[tokio::test]
    async fn racing_settlements_for_one_user_cannot_overdraw() {
        let (pool, store, _notifier) = setup().await;
        seed_user(&pool, 40, 50).await;
        let sid = ServiceRepository::new(pool.clone())
            .create("VIP", 50, ServiceKind::Manual, None, None)
            .await
            .unwrap();

        let first = store.initiate(40, sid).await.unwrap();
        let second = first.clone();

        let a = {
            let store = store.clone();
            tokio::spawn(async move { store.settle(&first, None).await })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move { store.settle(&second, None).await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1, "only one settlement may debit");
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(StoreError::InsufficientBalance))));
        assert_eq!(balance_of(&pool, 40).await, 0);
    }

    #[tokio::test]
    async fn refund_credits_once_and_resolution_is_terminal() {
        let (pool, store, _notifier) = setup().await;
        seed_user(&pool, 50, 80).await;
        let sid = ServiceRepository::new(pool.clone())
            .create("Manual Svc", 80, ServiceKind::Manual, None, None)
            .await
            .unwrap();

        let pending = store.initiate(50, sid).await.unwrap();
        let settled = store.settle(&pending, None).await.unwrap();
        assert_eq!(balance_of(&pool, 50).await, 0);

        let resolved = store
            .resolve(settled.order_id, ResolveAction::Refund)
            .await
            .unwrap();
        assert_eq!(resolved.price, 80);
        assert_eq!(balance_of(&pool, 50).await, 80);

        assert!(matches!(
            store.resolve(settled.order_id, ResolveAction::Refund).await,
            Err(StoreError::AlreadyResolved)
        ));
        assert!(matches!(
            store
                .resolve(settled.order_id, ResolveAction::Complete)
                .await,
            Err(StoreError::AlreadyResolved)
        ));
        assert_eq!(balance_of(&pool, 50).await, 80, "no double credit");

        assert!(matches!(
            store.resolve(9999, ResolveAction::Complete).await,
            Err(StoreError::NotFound("order"))
        ));
    }

    #[tokio::test]
    async fn settlement_charges_the_initiate_snapshot() {
        let (pool, store, _notifier) = setup().await;
        seed_user(&pool, 60, 100).await;
        let services = ServiceRepository::new(pool.clone());
        let sid = services
            .create("Volatile", 40, ServiceKind::Manual, None, None)
            .await
            .unwrap();

        let pending = store.initiate(60, sid).await.unwrap();
        // Price edit lands between initiate and settle.
        services.update_price(sid, 90).await.unwrap();

        let settled = store.settle(&pending, None).await.unwrap();
        assert_eq!(settled.price, 40);
        assert_eq!(balance_of(&pool, 60).await, 60);
        let order = store.order(settled.order_id).await.unwrap().unwrap();
        assert_eq!(order.price, 40);
    }

    // Redeem repo is exercised here only to keep the shared pool helper
    // honest about migrations being applied.
    #[tokio::test]
    async fn test_pool_applies_migrations() {
        let pool = test_pool().await;
        let codes = RedeemRepository::new(pool);
        assert!(codes.list().await.unwrap().is_empty());
    }
}
