use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use sqlx::SqlitePool;

use dokan_db::init_db;
use dokan_db::models::store::ServiceKind;
use dokan_db::repositories::redeem_repo::RedeemRepository;
use dokan_db::repositories::service_repo::ServiceRepository;
use dokan_db::repositories::stock_repo::StockRepository;
use dokan_db::repositories::user_repo::UserRepository;

static NEXT_DB: AtomicU32 = AtomicU32::new(0);

async fn test_pool() -> SqlitePool {
    let n = NEXT_DB.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "dokan-db-test-{}-{}.db",
        std::process::id(),
        n
    ));
    let _ = std::fs::remove_file(&path);
    init_db(&format!("sqlite://{}", path.display()))
        .await
        .expect("test database")
}

#[tokio::test]
async fn stock_is_consumed_oldest_first() {
    let pool = test_pool().await;
    let services = ServiceRepository::new(pool.clone());
    let stock = StockRepository::new(pool.clone());

    let sid = services
        .create("Netflix", 50, ServiceKind::Auto, None, None)
        .await
        .unwrap();
    for content in ["key1", "key2", "key3"] {
        stock.add(sid, content).await.unwrap();
    }

    assert_eq!(stock.count(sid).await.unwrap(), 3);
    assert_eq!(stock.fetch_and_remove(sid).await.unwrap().as_deref(), Some("key1"));
    assert_eq!(stock.fetch_and_remove(sid).await.unwrap().as_deref(), Some("key2"));
    assert_eq!(stock.fetch_and_remove(sid).await.unwrap().as_deref(), Some("key3"));
    assert_eq!(stock.fetch_and_remove(sid).await.unwrap(), None);
}

#[tokio::test]
async fn concurrent_fetches_never_share_an_item() {
    let pool = test_pool().await;
    let services = ServiceRepository::new(pool.clone());
    let stock = StockRepository::new(pool.clone());

    let sid = services
        .create("Spotify", 30, ServiceKind::Auto, None, None)
        .await
        .unwrap();
    for i in 0..8 {
        stock.add(sid, &format!("item-{i}")).await.unwrap();
    }

    let mut handles = Vec::new();
    for _ in 0..12 {
        let stock = stock.clone();
        handles.push(tokio::spawn(async move {
            stock.fetch_and_remove(sid).await.unwrap()
        }));
    }

    let mut issued = Vec::new();
    for handle in handles {
        if let Some(content) = handle.await.unwrap() {
            issued.push(content);
        }
    }

    let distinct: HashSet<_> = issued.iter().cloned().collect();
    assert_eq!(issued.len(), 8, "exactly the stocked items are issued");
    assert_eq!(distinct.len(), 8, "no item is issued twice");
    assert_eq!(stock.count(sid).await.unwrap(), 0);
}

#[tokio::test]
async fn registration_is_idempotent() {
    let pool = test_pool().await;
    let users = UserRepository::new(pool.clone());

    assert!(users
        .insert_if_absent(100, Some("Munna"), Some("munna"), None)
        .await
        .unwrap());
    assert!(!users
        .insert_if_absent(100, Some("Munna"), Some("munna"), Some(200))
        .await
        .unwrap());

    let user = users.get(100).await.unwrap().unwrap();
    assert_eq!(user.balance, 0);
    // The repeat insert must not retrofit a referrer.
    assert_eq!(user.referrer_id, None);
}

#[tokio::test]
async fn referral_credit_updates_all_three_counters() {
    let pool = test_pool().await;
    let users = UserRepository::new(pool.clone());

    users.insert_if_absent(1, Some("Ref"), None, None).await.unwrap();
    users.credit_referral(1, 10).await.unwrap();
    users.credit_referral(1, 10).await.unwrap();

    let user = users.get(1).await.unwrap().unwrap();
    assert_eq!(user.balance, 20);
    assert_eq!(user.total_referrals, 2);
    assert_eq!(user.total_earned, 20);
}

#[tokio::test]
async fn daily_claim_is_once_per_calendar_day() {
    let pool = test_pool().await;
    let users = UserRepository::new(pool.clone());
    users.insert_if_absent(7, Some("A"), None, None).await.unwrap();

    let today = Utc::now().date_naive();
    assert!(users.try_claim_daily(7, 10, today).await.unwrap());
    assert!(!users.try_claim_daily(7, 10, today).await.unwrap());

    let user = users.get(7).await.unwrap().unwrap();
    assert_eq!(user.balance, 10);
    assert_eq!(user.last_daily_claim, Some(today));

    // A later calendar day unlocks the bonus again.
    let tomorrow = today.succ_opt().unwrap();
    assert!(users.try_claim_daily(7, 10, tomorrow).await.unwrap());
    assert_eq!(users.get(7).await.unwrap().unwrap().balance, 20);
}

#[tokio::test]
async fn duplicate_code_strings_are_rejected() {
    let pool = test_pool().await;
    let codes = RedeemRepository::new(pool.clone());

    assert!(codes.create("BONUS100", 100, 5).await.unwrap());
    assert!(!codes.create("BONUS100", 50, 1).await.unwrap());

    let code = codes.get("BONUS100").await.unwrap().unwrap();
    assert_eq!(code.amount, 100);
    assert_eq!(code.max_uses, 5);
    assert_eq!(code.used_count, 0);
}

#[tokio::test]
async fn deleting_a_service_cascades_stock_but_preserves_orders() {
    let pool = test_pool().await;
    let services = ServiceRepository::new(pool.clone());
    let stock = StockRepository::new(pool.clone());
    let orders = dokan_db::repositories::order_repo::OrderRepository::new(pool.clone());

    let sid = services
        .create("VPN", 80, ServiceKind::Manual, None, Some("Enter Gmail"))
        .await
        .unwrap();
    stock.add(sid, "leftover").await.unwrap();

    sqlx::query(
        "INSERT INTO orders (user_id, service_id, content, price, status) \
         VALUES (1, ?, 'Manual Delivery Pending', 80, 'pending')",
    )
    .bind(sid)
    .execute(&pool)
    .await
    .unwrap();

    assert!(services.delete(sid).await.unwrap());
    assert_eq!(stock.count(sid).await.unwrap(), 0);

    let pending = orders.pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].service_id, None);
    assert_eq!(pending[0].service_name, None);
    assert_eq!(pending[0].price, 80);
}
