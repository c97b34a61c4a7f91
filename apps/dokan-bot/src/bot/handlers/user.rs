use teloxide::prelude::*;
use tracing::error;

use dokan_db::error::StoreError;

use crate::bot::keyboards;
use crate::bot::texts::{self, Lang};
use crate::bot::utils::escape_html;
use crate::services::store_service::ConfirmOutcome;
use crate::session::UserFlow;
use crate::state::AppState;

async fn lang_of(state: &AppState, user_id: i64) -> Lang {
    match state.user_service.get(user_id).await {
        Ok(Some(user)) => Lang::from_code(&user.language),
        _ => Lang::En,
    }
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: AppState,
) -> Result<(), teloxide::RequestError> {
    let chat_id = msg.chat.id;
    let user_id = chat_id.0;
    let Some(text) = msg.text().map(|t| t.to_string()) else {
        return Ok(());
    };

    if text.starts_with("/start") {
        state.sessions.clear_user(user_id).await;
        let referrer_id = text
            .split_whitespace()
            .nth(1)
            .and_then(|arg| arg.parse::<i64>().ok());
        let first_name = msg.from.as_ref().map(|u| u.first_name.clone());
        let username = msg.from.as_ref().and_then(|u| u.username.clone());

        match state
            .user_service
            .register(
                user_id,
                first_name.as_deref(),
                username.as_deref(),
                referrer_id,
            )
            .await
        {
            Ok(reg) if reg.is_new => {
                state
                    .notifier
                    .notify_admins(&format!(
                        "🔔 <b>New Member Joined</b>\nName: {}\nID: <code>{}</code>\nUsername: @{}",
                        escape_html(first_name.as_deref().unwrap_or("Unknown")),
                        user_id,
                        escape_html(username.as_deref().unwrap_or("None")),
                    ))
                    .await;
                if let Some(credit) = reg.referral {
                    state
                        .notifier
                        .notify_user(credit.referrer_id, &texts::referral_reward(credit.amount))
                        .await;
                }
            }
            Ok(_) => {}
            Err(e) => error!("Failed to register user {}: {}", user_id, e),
        }

        let lang = lang_of(&state, user_id).await;
        bot.send_message(chat_id, texts::welcome(lang))
            .reply_markup(keyboards::main_menu(lang))
            .await?;
        return Ok(());
    }

    if text == "/cancel" {
        state.sessions.clear_user(user_id).await;
        let lang = lang_of(&state, user_id).await;
        bot.send_message(chat_id, texts::welcome(lang))
            .reply_markup(keyboards::main_menu(lang))
            .await?;
        return Ok(());
    }

    let lang = lang_of(&state, user_id).await;

    match state.sessions.take_user(user_id).await {
        Some(UserFlow::AwaitingRedeemCode) => {
            match state.promo_service.redeem(user_id, text.trim()).await {
                Ok(amount) => {
                    bot.send_message(chat_id, texts::redeem_success(lang, amount))
                        .reply_markup(keyboards::back_keyboard(lang))
                        .await?;
                }
                Err(e) => {
                    if e.is_transient() {
                        error!("Redeem failed for user {}: {}", user_id, e);
                    }
                    bot.send_message(chat_id, texts::store_error(lang, &e)).await?;
                }
            }
        }
        Some(UserFlow::AwaitingPurchaseInput(pending)) => {
            match state.store_service.supply_input(&pending, text.trim()).await {
                Ok(settled) => {
                    let reply = match &settled.content {
                        Some(content) => texts::order_success(lang, content),
                        None => texts::order_manual(lang).to_string(),
                    };
                    bot.send_message(chat_id, reply)
                        .reply_markup(keyboards::back_keyboard(lang))
                        .await?;
                }
                Err(e) => {
                    if e.is_transient() {
                        error!("Settlement failed for user {}: {}", user_id, e);
                    }
                    bot.send_message(chat_id, texts::store_error(lang, &e)).await?;
                }
            }
        }
        // A stray text while a purchase sits on the confirm screen drops
        // the attempt; nothing was charged yet.
        Some(UserFlow::ConfirmingPurchase(_)) | None => {
            bot.send_message(chat_id, texts::welcome(lang))
                .reply_markup(keyboards::main_menu(lang))
                .await?;
        }
    }

    Ok(())
}

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    state: AppState,
) -> Result<(), teloxide::RequestError> {
    let user_id = q.from.id.0 as i64;
    let callback_id = q.id.clone();
    let Some(data) = q.data.clone() else {
        return Ok(());
    };
    let lang = lang_of(&state, user_id).await;

    match data.as_str() {
        "menu_main" => {
            let _ = bot.answer_callback_query(callback_id).await;
            state.sessions.clear_user(user_id).await;
            if let Some(msg) = q.message {
                let _ = bot
                    .edit_message_text(msg.chat().id, msg.id(), texts::welcome(lang))
                    .reply_markup(keyboards::main_menu(lang))
                    .await;
            }
        }

        "menu_lang" => {
            let _ = bot.answer_callback_query(callback_id).await;
            if let Some(msg) = q.message {
                let _ = bot
                    .edit_message_text(msg.chat().id, msg.id(), texts::choose_lang(lang))
                    .reply_markup(keyboards::language_keyboard())
                    .await;
            }
        }

        "lang_en" | "lang_bn" => {
            let code = if data == "lang_bn" { "bn" } else { "en" };
            if let Err(e) = state.user_service.set_language(user_id, code).await {
                error!("Failed to set language for {}: {}", user_id, e);
            }
            let lang = Lang::from_code(code);
            let _ = bot.answer_callback_query(callback_id).await;
            if let Some(msg) = q.message {
                let _ = bot
                    .edit_message_text(msg.chat().id, msg.id(), texts::welcome(lang))
                    .reply_markup(keyboards::main_menu(lang))
                    .await;
            }
        }

        "daily_check" => match state.user_service.claim_daily(user_id).await {
            Ok(amount) => {
                let _ = bot
                    .answer_callback_query(callback_id)
                    .text(texts::daily_success(lang, amount))
                    .show_alert(true)
                    .await;
            }
            Err(StoreError::AlreadyClaimed) => {
                let _ = bot
                    .answer_callback_query(callback_id)
                    .text(texts::daily_fail(lang))
                    .show_alert(true)
                    .await;
            }
            Err(e) => {
                error!("Daily claim failed for {}: {}", user_id, e);
                let _ = bot
                    .answer_callback_query(callback_id)
                    .text(texts::store_error(lang, &e))
                    .show_alert(true)
                    .await;
            }
        },

        "menu_profile" => match state.user_service.get(user_id).await {
            Ok(Some(user)) => {
                let _ = bot.answer_callback_query(callback_id).await;
                if let Some(msg) = q.message {
                    let _ = bot
                        .edit_message_text(msg.chat().id, msg.id(), texts::profile_stats(lang, &user))
                        .reply_markup(keyboards::back_keyboard(lang))
                        .await;
                }
            }
            _ => {
                let _ = bot
                    .answer_callback_query(callback_id)
                    .text(texts::store_error(lang, &StoreError::NotFound("user")))
                    .show_alert(true)
                    .await;
            }
        },

        "menu_refer" => {
            let _ = bot.answer_callback_query(callback_id).await;
            let bot_username = state.settings.get_or_default("bot_username", "dokan_bot").await;
            let link = format!("https://t.me/{}?start={}", bot_username, user_id);
            let bonus = state.settings.ref_bonus().await;
            if let Some(msg) = q.message {
                let _ = bot
                    .edit_message_text(msg.chat().id, msg.id(), texts::refer_text(lang, &link, bonus))
                    .reply_markup(keyboards::back_keyboard(lang))
                    .await;
            }
        }

        "menu_balance" => {
            let _ = bot
                .answer_callback_query(callback_id)
                .text(texts::coming_soon(lang))
                .show_alert(true)
                .await;
        }

        "redeem_start" => {
            let _ = bot.answer_callback_query(callback_id).await;
            state
                .sessions
                .set_user(user_id, UserFlow::AwaitingRedeemCode)
                .await;
            if let Some(msg) = q.message {
                let _ = bot
                    .send_message(msg.chat().id, texts::redeem_prompt(lang))
                    .await;
            }
        }

        "menu_shop" => {
            state.sessions.clear_user(user_id).await;
            let services = match state.catalog_service.list_with_stock().await {
                Ok(services) => services,
                Err(e) => {
                    error!("Failed to list services: {}", e);
                    let _ = bot
                        .answer_callback_query(callback_id)
                        .text(texts::store_error(lang, &e))
                        .show_alert(true)
                        .await;
                    return Ok(());
                }
            };
            if services.is_empty() {
                let _ = bot
                    .answer_callback_query(callback_id)
                    .text(texts::shop_empty(lang))
                    .show_alert(true)
                    .await;
                return Ok(());
            }

            let mut rows = Vec::with_capacity(services.len() + 1);
            for (service, count) in services {
                let stock_note = match service.kind {
                    dokan_db::models::store::ServiceKind::Auto => {
                        format!(" {}", texts::stock_left(lang, count))
                    }
                    dokan_db::models::store::ServiceKind::Manual => String::new(),
                };
                rows.push(vec![teloxide::types::InlineKeyboardButton::callback(
                    format!("{} | {} TK{}", service.name, service.price, stock_note),
                    format!("buy_{}", service.id),
                )]);
            }
            rows.push(vec![teloxide::types::InlineKeyboardButton::callback(
                texts::btn_back(lang),
                "menu_main",
            )]);

            let _ = bot.answer_callback_query(callback_id).await;
            if let Some(msg) = q.message {
                let _ = bot
                    .edit_message_text(msg.chat().id, msg.id(), texts::shop_title(lang))
                    .reply_markup(teloxide::types::InlineKeyboardMarkup::new(rows))
                    .await;
            }
        }

        buy if buy.starts_with("buy_") => {
            let Ok(service_id) = buy["buy_".len()..].parse::<i64>() else {
                let _ = bot.answer_callback_query(callback_id).await;
                return Ok(());
            };
            match state.store_service.initiate(user_id, service_id).await {
                Ok(pending) => {
                    let text = texts::confirm_buy(lang, &pending.service_name, pending.price);
                    state
                        .sessions
                        .set_user(user_id, UserFlow::ConfirmingPurchase(pending))
                        .await;
                    let _ = bot.answer_callback_query(callback_id).await;
                    if let Some(msg) = q.message {
                        let _ = bot
                            .edit_message_text(msg.chat().id, msg.id(), text)
                            .reply_markup(keyboards::confirm_keyboard(lang))
                            .await;
                    }
                }
                Err(e) => {
                    let _ = bot
                        .answer_callback_query(callback_id)
                        .text(texts::store_error(lang, &e))
                        .show_alert(true)
                        .await;
                }
            }
        }

        "confirm_buy_yes" => {
            let Some(UserFlow::ConfirmingPurchase(pending)) =
                state.sessions.take_user(user_id).await
            else {
                let _ = bot.answer_callback_query(callback_id).await;
                if let Some(msg) = q.message {
                    let _ = bot
                        .edit_message_text(msg.chat().id, msg.id(), texts::welcome(lang))
                        .reply_markup(keyboards::main_menu(lang))
                        .await;
                }
                return Ok(());
            };

            match state.store_service.confirm(&pending).await {
                Ok(ConfirmOutcome::NeedsInput(question)) => {
                    state
                        .sessions
                        .set_user(user_id, UserFlow::AwaitingPurchaseInput(pending))
                        .await;
                    let _ = bot.answer_callback_query(callback_id).await;
                    if let Some(msg) = q.message {
                        let _ = bot
                            .edit_message_text(
                                msg.chat().id,
                                msg.id(),
                                texts::input_prompt(lang, &question),
                            )
                            .await;
                    }
                }
                Ok(ConfirmOutcome::Settled(settled)) => {
                    let _ = bot.answer_callback_query(callback_id).await;
                    let text = match &settled.content {
                        Some(content) => texts::order_success(lang, content),
                        None => texts::order_manual(lang).to_string(),
                    };
                    if let Some(msg) = q.message {
                        let _ = bot
                            .edit_message_text(msg.chat().id, msg.id(), text)
                            .reply_markup(keyboards::back_keyboard(lang))
                            .await;
                    }
                }
                Err(e) => {
                    if e.is_transient() {
                        error!("Settlement failed for user {}: {}", user_id, e);
                    }
                    let _ = bot
                        .answer_callback_query(callback_id)
                        .text(texts::store_error(lang, &e))
                        .show_alert(true)
                        .await;
                }
            }
        }

        _ => {
            let _ = bot.answer_callback_query(callback_id).await;
        }
    }

    Ok(())
}
