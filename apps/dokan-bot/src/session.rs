use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use dokan_db::models::store::ServiceKind;

use crate::services::store_service::PendingPurchase;

/// Step a user-bot conversation is currently parked at.
#[derive(Debug, Clone)]
pub enum UserFlow {
    AwaitingRedeemCode,
    /// Purchase confirmed on screen, waiting for the confirm button.
    ConfirmingPurchase(PendingPurchase),
    /// Service requires input; the next text message settles the order.
    AwaitingPurchaseInput(PendingPurchase),
}

/// Step an admin-bot conversation is currently parked at.
#[derive(Debug, Clone)]
pub enum AdminFlow {
    ServiceName,
    ServicePrice {
        name: String,
    },
    /// Waiting for the auto/manual type button.
    ServiceKindSelect {
        name: String,
        price: i64,
    },
    ServiceQuestion {
        name: String,
        price: i64,
        kind: ServiceKind,
    },
    ServiceCustomQuestion {
        name: String,
        price: i64,
        kind: ServiceKind,
    },
    StockService,
    StockContent {
        service_id: i64,
    },
    CodeAmount,
    CodeMaxUses {
        amount: i64,
    },
    RefBonus,
    Broadcast,
}

/// Explicit per-chat conversation state, keyed by Telegram user id and
/// looked up on every update. Replaces ambient framework state so each
/// request sees exactly one tagged step.
#[derive(Clone, Default)]
pub struct SessionStore {
    user_flows: Arc<RwLock<HashMap<i64, UserFlow>>>,
    admin_flows: Arc<RwLock<HashMap<i64, AdminFlow>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_user(&self, user_id: i64, flow: UserFlow) {
        self.user_flows.write().await.insert(user_id, flow);
    }

    pub async fn take_user(&self, user_id: i64) -> Option<UserFlow> {
        self.user_flows.write().await.remove(&user_id)
    }

    pub async fn clear_user(&self, user_id: i64) {
        self.user_flows.write().await.remove(&user_id);
    }

    pub async fn set_admin(&self, user_id: i64, flow: AdminFlow) {
        self.admin_flows.write().await.insert(user_id, flow);
    }

    pub async fn take_admin(&self, user_id: i64) -> Option<AdminFlow> {
        self.admin_flows.write().await.remove(&user_id)
    }

    pub async fn clear_admin(&self, user_id: i64) {
        self.admin_flows.write().await.remove(&user_id);
    }
}
