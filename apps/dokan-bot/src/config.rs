use std::env;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub user_bot_token: String,
    pub admin_bot_token: String,
    pub admin_ids: Vec<i64>,
    pub database_url: String,
    pub listen_port: u16,
}

impl BotConfig {
    /// Everything comes from the environment (or a local .env file).
    pub fn load() -> Result<Self> {
        let user_bot_token = env::var("USER_BOT_TOKEN").context("USER_BOT_TOKEN is not set")?;
        let admin_bot_token = env::var("ADMIN_BOT_TOKEN").context("ADMIN_BOT_TOKEN is not set")?;

        let admin_ids: Vec<i64> = env::var("ADMIN_IDS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|part| part.trim().parse().ok())
            .collect();
        if admin_ids.is_empty() {
            return Err(anyhow::anyhow!(
                "ADMIN_IDS must list at least one Telegram user id"
            ));
        }

        Ok(Self {
            user_bot_token,
            admin_bot_token,
            admin_ids,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://dokan.db".to_string()),
            listen_port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        })
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}
