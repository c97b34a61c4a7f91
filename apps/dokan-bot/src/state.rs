use std::sync::Arc;

use sqlx::SqlitePool;
use teloxide::Bot;

use crate::config::BotConfig;
use crate::services::catalog_service::CatalogService;
use crate::services::notification_service::Notify;
use crate::services::promo_service::PromoService;
use crate::services::settings_service::SettingsService;
use crate::services::store_service::StoreService;
use crate::services::user_service::UserService;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: BotConfig,
    pub pool: SqlitePool,
    /// The customer-facing bot, also used for broadcast fan-out.
    pub user_bot: Bot,
    pub notifier: Arc<dyn Notify>,
    pub settings: SettingsService,
    pub store_service: StoreService,
    pub catalog_service: CatalogService,
    pub promo_service: PromoService,
    pub user_service: UserService,
    pub sessions: SessionStore,
}
