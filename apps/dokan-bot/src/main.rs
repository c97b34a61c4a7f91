use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use dotenvy::dotenv;
use serde_json::{json, Value};
use teloxide::Bot;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod services;
mod session;
mod state;
#[cfg(test)]
mod test_support;

pub mod bot;

use config::BotConfig;
use services::notification_service::{Notify, TelegramNotifier};
use services::settings_service::SettingsService;
use state::AppState;

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dokan_bot=info,dokan_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BotConfig::load()?;
    let pool = dokan_db::init_db(&config.database_url).await?;
    info!("Database initialized");

    let user_bot = Bot::new(config.user_bot_token.clone());
    let admin_bot = Bot::new(config.admin_bot_token.clone());

    let notifier: Arc<dyn Notify> = Arc::new(TelegramNotifier::new(
        user_bot.clone(),
        admin_bot.clone(),
        config.admin_ids.clone(),
    ));

    let settings = SettingsService::new(pool.clone()).await?;
    let state = AppState {
        config: config.clone(),
        pool: pool.clone(),
        user_bot: user_bot.clone(),
        notifier: notifier.clone(),
        settings: settings.clone(),
        store_service: services::store_service::StoreService::new(pool.clone(), notifier.clone()),
        catalog_service: services::catalog_service::CatalogService::new(pool.clone()),
        promo_service: services::promo_service::PromoService::new(pool.clone()),
        user_service: services::user_service::UserService::new(pool.clone(), settings),
        sessions: session::SessionStore::new(),
    };

    // Keep-alive web server for the hosting platform's health checks.
    let app = Router::new()
        .route("/", get(|| async { "Bot is alive!" }))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http());
    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Health server listening on {}", addr);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Health server error: {}", e);
        }
    });

    let (shutdown_tx, _) = tokio::sync::broadcast::channel(1);

    info!("Starting bots...");
    let user_task = tokio::spawn(bot::run_user_bot(
        user_bot,
        shutdown_tx.subscribe(),
        state.clone(),
    ));
    let admin_task = tokio::spawn(bot::run_admin_bot(
        admin_bot,
        shutdown_tx.subscribe(),
        state.clone(),
    ));

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, stopping bots...");
    let _ = shutdown_tx.send(());
    let _ = user_task.await;
    let _ = admin_task.await;
    Ok(())
}
