use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub username: Option<String>,
    pub balance: i64,
    pub referrer_id: Option<i64>,
    pub total_referrals: i64,
    pub total_earned: i64,
    pub language: String,
    pub last_daily_claim: Option<NaiveDate>,
    pub joined_at: DateTime<Utc>,
}

/// How a service is delivered after purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    /// Fulfilled immediately from pre-stocked content.
    Auto,
    /// Stays pending until an administrator resolves the order.
    Manual,
}

impl ServiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Auto => "auto",
            ServiceKind::Manual => "manual",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub kind: ServiceKind,
    pub description: Option<String>,
    pub question: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StockItem {
    pub id: i64,
    pub service_id: i64,
    pub content: String,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Refunded => "refunded",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub service_id: Option<i64>,
    pub content: Option<String>,
    /// Price charged at settlement time, never re-read from the service.
    pub price: i64,
    pub status: OrderStatus,
    pub user_input: Option<String>,
    pub purchased_at: DateTime<Utc>,
}

/// Order joined with the (possibly deleted) service's name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderDetail {
    pub id: i64,
    pub user_id: i64,
    pub service_id: Option<i64>,
    pub content: Option<String>,
    pub price: i64,
    pub status: OrderStatus,
    pub user_input: Option<String>,
    pub purchased_at: DateTime<Utc>,
    pub service_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RedeemCode {
    pub code: String,
    pub amount: i64,
    pub max_uses: i64,
    pub used_count: i64,
    pub created_at: DateTime<Utc>,
}
