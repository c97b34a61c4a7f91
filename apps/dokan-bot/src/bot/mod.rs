use teloxide::{dptree, prelude::*, types::Update};
use tracing::{error, info};

pub mod handlers;
pub mod keyboards;
pub mod texts;
pub mod utils;

use crate::state::AppState;

/// Customer-facing dispatcher. The bot's username is cached in settings so
/// referral links can be rendered without another get_me round-trip.
pub async fn run_user_bot(
    bot: Bot,
    mut shutdown: tokio::sync::broadcast::Receiver<()>,
    state: AppState,
) {
    match bot.get_me().await {
        Ok(me) => {
            let username = me.username.clone().unwrap_or_else(|| "unknown".to_string());
            info!("User bot connected as @{}", username);
            if let Err(e) = state.settings.set("bot_username", &username).await {
                error!("Failed to cache bot username: {}", e);
            }
        }
        Err(e) => {
            error!("User bot failed to connect to Telegram: {}", e);
            return;
        }
    }

    let mut dispatcher = Dispatcher::builder(
        bot,
        dptree::entry()
            .branch(Update::filter_message().endpoint(handlers::user::message_handler))
            .branch(Update::filter_callback_query().endpoint(handlers::user::callback_handler)),
    )
    .dependencies(dptree::deps![state])
    .default_handler(|_upd: std::sync::Arc<Update>| async move {})
    .build();

    tokio::select! {
        _ = dispatcher.dispatch() => {
            info!("User bot dispatcher exited");
        }
        _ = shutdown.recv() => {
            info!("User bot received shutdown signal");
        }
    }
}

/// Admin-facing dispatcher. Handlers verify the sender against the
/// configured admin id list on every update.
pub async fn run_admin_bot(
    bot: Bot,
    mut shutdown: tokio::sync::broadcast::Receiver<()>,
    state: AppState,
) {
    match bot.get_me().await {
        Ok(me) => {
            info!(
                "Admin bot connected as @{}",
                me.username.clone().unwrap_or_else(|| "unknown".to_string())
            );
        }
        Err(e) => {
            error!("Admin bot failed to connect to Telegram: {}", e);
            return;
        }
    }

    let mut dispatcher = Dispatcher::builder(
        bot,
        dptree::entry()
            .branch(Update::filter_message().endpoint(handlers::admin::message_handler))
            .branch(Update::filter_callback_query().endpoint(handlers::admin::callback_handler)),
    )
    .dependencies(dptree::deps![state])
    .default_handler(|_upd: std::sync::Arc<Update>| async move {})
    .build();

    tokio::select! {
        _ = dispatcher.dispatch() => {
            info!("Admin bot dispatcher exited");
        }
        _ = shutdown.recv() => {
            info!("Admin bot received shutdown signal");
        }
    }
}
