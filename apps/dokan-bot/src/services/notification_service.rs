use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::warn;

/// Outbound notification events emitted by the fulfillment engine.
///
/// Delivery is best-effort and happens strictly after the ledger commit:
/// an unreachable recipient can neither roll back nor block a mutation.
#[async_trait]
pub trait Notify: Send + Sync {
    async fn notify_admins(&self, text: &str);
    async fn notify_user(&self, user_id: i64, text: &str);
}

/// Sends over both bots: order events reach every configured admin through
/// the admin bot, buyer notices go out through the user bot.
pub struct TelegramNotifier {
    user_bot: Bot,
    admin_bot: Bot,
    admin_ids: Vec<i64>,
}

impl TelegramNotifier {
    pub fn new(user_bot: Bot, admin_bot: Bot, admin_ids: Vec<i64>) -> Self {
        Self {
            user_bot,
            admin_bot,
            admin_ids,
        }
    }
}

#[async_trait]
impl Notify for TelegramNotifier {
    async fn notify_admins(&self, text: &str) {
        for admin_id in &self.admin_ids {
            if let Err(e) = self
                .admin_bot
                .send_message(ChatId(*admin_id), text.to_string())
                .parse_mode(ParseMode::Html)
                .await
            {
                warn!("Failed to notify admin {}: {}", admin_id, e);
            }
        }
    }

    async fn notify_user(&self, user_id: i64, text: &str) {
        if let Err(e) = self
            .user_bot
            .send_message(ChatId(user_id), text.to_string())
            .parse_mode(ParseMode::Html)
            .await
        {
            warn!("Failed to notify user {}: {}", user_id, e);
        }
    }
}
