use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use tracing::{error, info, warn};

use dokan_db::error::StoreError;
use dokan_db::models::store::ServiceKind;

use crate::bot::keyboards;
use crate::session::AdminFlow;
use crate::state::AppState;

fn error_text(err: &StoreError) -> String {
    match err {
        StoreError::NotFound(what) => format!("❌ {} not found.", what),
        StoreError::AlreadyResolved => "❌ Order is already resolved.".to_string(),
        StoreError::Validation(msg) => format!("❌ {}.", msg),
        _ => "⚠️ Store error, please try again.".to_string(),
    }
}

async fn send_panel(bot: &Bot, chat_id: ChatId, state: &AppState) -> Result<(), teloxide::RequestError> {
    let pending = state
        .store_service
        .pending_orders()
        .await
        .map(|orders| orders.len())
        .unwrap_or(0);
    bot.send_message(chat_id, "👑 Admin Panel\nSelect an action:")
        .reply_markup(keyboards::admin_menu(pending))
        .await?;
    Ok(())
}

async fn finish_add_service(
    bot: &Bot,
    chat_id: ChatId,
    state: &AppState,
    name: String,
    price: i64,
    kind: ServiceKind,
    question: Option<String>,
) -> Result<(), teloxide::RequestError> {
    match state
        .catalog_service
        .create_service(&name, price, kind, None, question.as_deref())
        .await
    {
        Ok(id) => {
            bot.send_message(
                chat_id,
                format!(
                    "✅ Service added (id {}).\nType: {}\nInput: {}",
                    id,
                    kind.as_str(),
                    question.as_deref().unwrap_or("None")
                ),
            )
            .reply_markup(keyboards::admin_home_keyboard())
            .await?;
        }
        Err(e) => {
            bot.send_message(chat_id, error_text(&e)).await?;
        }
    }
    Ok(())
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: AppState,
) -> Result<(), teloxide::RequestError> {
    let chat_id = msg.chat.id;
    let admin_id = chat_id.0;
    if !state.config.is_admin(admin_id) {
        return Ok(());
    }
    let Some(text) = msg.text().map(|t| t.to_string()) else {
        return Ok(());
    };

    if text.starts_with("/start") {
        state.sessions.clear_admin(admin_id).await;
        send_panel(&bot, chat_id, &state).await?;
        return Ok(());
    }

    if text == "/cancel" {
        state.sessions.clear_admin(admin_id).await;
        bot.send_message(chat_id, "Cancelled.")
            .reply_markup(keyboards::admin_home_keyboard())
            .await?;
        return Ok(());
    }

    if let Some(rest) = text.strip_prefix("/pay") {
        let mut parts = rest.split_whitespace();
        let target = parts.next().and_then(|p| p.parse::<i64>().ok());
        let amount = parts.next().and_then(|p| p.parse::<i64>().ok());
        match (target, amount) {
            (Some(target), Some(amount)) if amount != 0 => {
                match state.user_service.adjust_balance(target, amount).await {
                    Ok(()) => {
                        info!(admin_id, target, amount, "admin balance adjustment");
                        bot.send_message(
                            chat_id,
                            format!("Done. User {} adjusted by {} TK.", target, amount),
                        )
                        .await?;
                    }
                    Err(e) => {
                        bot.send_message(chat_id, error_text(&e)).await?;
                    }
                }
            }
            _ => {
                bot.send_message(chat_id, "Usage: /pay <user_id> <amount>")
                    .await?;
            }
        }
        return Ok(());
    }

    let Some(flow) = state.sessions.take_admin(admin_id).await else {
        send_panel(&bot, chat_id, &state).await?;
        return Ok(());
    };

    match flow {
        AdminFlow::ServiceName => {
            let name = text.trim().to_string();
            if name.is_empty() {
                state.sessions.set_admin(admin_id, AdminFlow::ServiceName).await;
                bot.send_message(chat_id, "Name cannot be empty, try again:")
                    .await?;
                return Ok(());
            }
            state
                .sessions
                .set_admin(admin_id, AdminFlow::ServicePrice { name })
                .await;
            bot.send_message(chat_id, "Enter Price (TK):").await?;
        }

        AdminFlow::ServicePrice { name } => match text.trim().parse::<i64>() {
            Ok(price) if price > 0 => {
                state
                    .sessions
                    .set_admin(admin_id, AdminFlow::ServiceKindSelect { name, price })
                    .await;
                bot.send_message(chat_id, "Select Service Type:")
                    .reply_markup(keyboards::service_kind_keyboard())
                    .await?;
            }
            _ => {
                state
                    .sessions
                    .set_admin(admin_id, AdminFlow::ServicePrice { name })
                    .await;
                bot.send_message(chat_id, "Invalid number, enter a positive price:")
                    .await?;
            }
        },

        AdminFlow::ServiceCustomQuestion { name, price, kind } => {
            let question = text.trim().to_string();
            finish_add_service(&bot, chat_id, &state, name, price, kind, Some(question)).await?;
        }

        AdminFlow::StockService => match text.trim().parse::<i64>() {
            Ok(service_id) => match state.catalog_service.get(service_id).await {
                Ok(Some(service)) => {
                    state
                        .sessions
                        .set_admin(admin_id, AdminFlow::StockContent { service_id })
                        .await;
                    bot.send_message(chat_id, format!("Send the stock content for {}:", service.name))
                        .await?;
                }
                Ok(None) => {
                    state.sessions.set_admin(admin_id, AdminFlow::StockService).await;
                    bot.send_message(chat_id, "No service with that id, try again:")
                        .await?;
                }
                Err(e) => {
                    bot.send_message(chat_id, error_text(&e)).await?;
                }
            },
            Err(_) => {
                state.sessions.set_admin(admin_id, AdminFlow::StockService).await;
                bot.send_message(chat_id, "Invalid id, send a number:").await?;
            }
        },

        AdminFlow::StockContent { service_id } => {
            match state.catalog_service.add_stock(service_id, text.trim()).await {
                Ok(()) => {
                    bot.send_message(chat_id, "✅ Stock added.")
                        .reply_markup(keyboards::admin_home_keyboard())
                        .await?;
                }
                Err(e) => {
                    bot.send_message(chat_id, error_text(&e)).await?;
                }
            }
        }

        AdminFlow::CodeAmount => match text.trim().parse::<i64>() {
            Ok(amount) if amount > 0 => {
                state
                    .sessions
                    .set_admin(admin_id, AdminFlow::CodeMaxUses { amount })
                    .await;
                bot.send_message(chat_id, "Max Uses:").await?;
            }
            _ => {
                state.sessions.set_admin(admin_id, AdminFlow::CodeAmount).await;
                bot.send_message(chat_id, "Invalid amount, send a positive number:")
                    .await?;
            }
        },

        AdminFlow::CodeMaxUses { amount } => match text.trim().parse::<i64>() {
            Ok(max_uses) if max_uses > 0 => {
                match state.promo_service.create_code(amount, max_uses).await {
                    Ok(code) => {
                        bot.send_message(
                            chat_id,
                            format!("✅ Code created: {}\n{} TK, {} uses.", code, amount, max_uses),
                        )
                        .reply_markup(keyboards::admin_home_keyboard())
                        .await?;
                    }
                    Err(e) => {
                        bot.send_message(chat_id, error_text(&e)).await?;
                    }
                }
            }
            _ => {
                state
                    .sessions
                    .set_admin(admin_id, AdminFlow::CodeMaxUses { amount })
                    .await;
                bot.send_message(chat_id, "Invalid number, send a positive max uses:")
                    .await?;
            }
        },

        AdminFlow::RefBonus => match text.trim().parse::<i64>() {
            Ok(bonus) if bonus >= 0 => {
                if let Err(e) = state.settings.set("ref_bonus", &bonus.to_string()).await {
                    error!("Failed to save ref_bonus: {}", e);
                    bot.send_message(chat_id, "⚠️ Failed to save, try again.").await?;
                } else {
                    bot.send_message(chat_id, format!("✅ Referral bonus set to {} TK.", bonus))
                        .reply_markup(keyboards::admin_home_keyboard())
                        .await?;
                }
            }
            _ => {
                state.sessions.set_admin(admin_id, AdminFlow::RefBonus).await;
                bot.send_message(chat_id, "Invalid number, send a non-negative amount:")
                    .await?;
            }
        },

        AdminFlow::Broadcast => {
            let ids = match state.user_service.all_ids().await {
                Ok(ids) => ids,
                Err(e) => {
                    bot.send_message(chat_id, error_text(&e)).await?;
                    return Ok(());
                }
            };
            let count = ids.len();
            let user_bot = state.user_bot.clone();
            // Fan-out runs detached: it shares no transactional scope with
            // order processing and must not hold up the admin.
            tokio::spawn(async move {
                let mut sent = 0usize;
                let mut failed = 0usize;
                for id in ids {
                    match user_bot.send_message(ChatId(id), text.clone()).await {
                        Ok(_) => sent += 1,
                        Err(e) => {
                            warn!("Broadcast to {} failed: {}", id, e);
                            failed += 1;
                        }
                    }
                    tokio::time::sleep(Duration::from_millis(50)).await;
                }
                info!("Broadcast complete: {} sent, {} failed", sent, failed);
            });
            bot.send_message(chat_id, format!("📢 Broadcast started to {} users.", count))
                .reply_markup(keyboards::admin_home_keyboard())
                .await?;
        }

        // Button-driven steps; a stray text message restarts the panel.
        AdminFlow::ServiceKindSelect { .. } | AdminFlow::ServiceQuestion { .. } => {
            send_panel(&bot, chat_id, &state).await?;
        }
    }

    Ok(())
}

async fn show_pending_list(
    bot: &Bot,
    chat_id: ChatId,
    msg_id: teloxide::types::MessageId,
    state: &AppState,
) -> Result<(), teloxide::RequestError> {
    let orders = state.store_service.pending_orders().await.unwrap_or_default();
    if orders.is_empty() {
        let _ = bot
            .edit_message_text(chat_id, msg_id, "No pending orders.")
            .reply_markup(keyboards::admin_home_keyboard())
            .await;
        return Ok(());
    }
    let mut rows = Vec::with_capacity(orders.len() + 1);
    for order in orders {
        let service_name = order.service_name.unwrap_or_else(|| "unknown".to_string());
        rows.push(vec![InlineKeyboardButton::callback(
            format!("#{} U:{} - {}", order.id, order.user_id, service_name),
            format!("ord_view_{}", order.id),
        )]);
    }
    rows.push(vec![InlineKeyboardButton::callback("⬅️ Back", "admin_home")]);
    let _ = bot
        .edit_message_text(chat_id, msg_id, "⏳ Pending Orders\nSelect an order:")
        .reply_markup(InlineKeyboardMarkup::new(rows))
        .await;
    Ok(())
}

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    state: AppState,
) -> Result<(), teloxide::RequestError> {
    let admin_id = q.from.id.0 as i64;
    let callback_id = q.id.clone();
    if !state.config.is_admin(admin_id) {
        let _ = bot.answer_callback_query(callback_id).await;
        return Ok(());
    }
    let Some(data) = q.data.clone() else {
        return Ok(());
    };
    let Some(msg) = q.message else {
        let _ = bot.answer_callback_query(callback_id).await;
        return Ok(());
    };
    let chat_id = msg.chat().id;
    let msg_id = msg.id();

    match data.as_str() {
        "admin_home" => {
            let _ = bot.answer_callback_query(callback_id).await;
            state.sessions.clear_admin(admin_id).await;
            let pending = state
                .store_service
                .pending_orders()
                .await
                .map(|orders| orders.len())
                .unwrap_or(0);
            let _ = bot
                .edit_message_text(chat_id, msg_id, "👑 Admin Panel\nSelect an action:")
                .reply_markup(keyboards::admin_menu(pending))
                .await;
        }

        "admin_add_svc" => {
            let _ = bot.answer_callback_query(callback_id).await;
            state.sessions.set_admin(admin_id, AdminFlow::ServiceName).await;
            bot.send_message(chat_id, "🆕 Add New Service\n\nEnter Service Name:")
                .await?;
        }

        "type_auto" | "type_manual" => {
            let Some(AdminFlow::ServiceKindSelect { name, price }) =
                state.sessions.take_admin(admin_id).await
            else {
                let _ = bot.answer_callback_query(callback_id).await;
                return Ok(());
            };
            let kind = if data == "type_manual" {
                ServiceKind::Manual
            } else {
                ServiceKind::Auto
            };
            let _ = bot.answer_callback_query(callback_id).await;
            match kind {
                ServiceKind::Manual => {
                    state
                        .sessions
                        .set_admin(admin_id, AdminFlow::ServiceQuestion { name, price, kind })
                        .await;
                    let _ = bot
                        .edit_message_text(
                            chat_id,
                            msg_id,
                            "Does this service require user input (e.g. Gmail/ID)?",
                        )
                        .reply_markup(keyboards::question_options_keyboard())
                        .await;
                }
                ServiceKind::Auto => {
                    finish_add_service(&bot, chat_id, &state, name, price, kind, None).await?;
                }
            }
        }

        "input_no" | "input_gmail" | "input_id" | "input_custom" => {
            let Some(AdminFlow::ServiceQuestion { name, price, kind }) =
                state.sessions.take_admin(admin_id).await
            else {
                let _ = bot.answer_callback_query(callback_id).await;
                return Ok(());
            };
            let _ = bot.answer_callback_query(callback_id).await;
            match data.as_str() {
                "input_no" => {
                    finish_add_service(&bot, chat_id, &state, name, price, kind, None).await?;
                }
                "input_gmail" => {
                    finish_add_service(
                        &bot,
                        chat_id,
                        &state,
                        name,
                        price,
                        kind,
                        Some("Please send your Gmail address:".to_string()),
                    )
                    .await?;
                }
                "input_id" => {
                    finish_add_service(
                        &bot,
                        chat_id,
                        &state,
                        name,
                        price,
                        kind,
                        Some("Please send your Number or ID:".to_string()),
                    )
                    .await?;
                }
                _ => {
                    state
                        .sessions
                        .set_admin(
                            admin_id,
                            AdminFlow::ServiceCustomQuestion { name, price, kind },
                        )
                        .await;
                    let _ = bot
                        .edit_message_text(chat_id, msg_id, "Type your custom question:")
                        .await;
                }
            }
        }

        "admin_list_svc" => {
            let _ = bot.answer_callback_query(callback_id).await;
            let services = state.catalog_service.list_with_stock().await.unwrap_or_default();
            if services.is_empty() {
                let _ = bot
                    .edit_message_text(chat_id, msg_id, "No services yet.")
                    .reply_markup(keyboards::admin_home_keyboard())
                    .await;
                return Ok(());
            }
            let mut rows = Vec::with_capacity(services.len() + 1);
            for (service, stock) in services {
                let q_mark = if service.question.is_some() { " ❓" } else { "" };
                rows.push(vec![InlineKeyboardButton::callback(
                    format!(
                        "ID:{} {} ({} TK) [{}]{}",
                        service.id, service.name, service.price, stock, q_mark
                    ),
                    format!("svc_opt_{}", service.id),
                )]);
            }
            rows.push(vec![InlineKeyboardButton::callback("⬅️ Back", "admin_home")]);
            let _ = bot
                .edit_message_text(chat_id, msg_id, "📋 Services")
                .reply_markup(InlineKeyboardMarkup::new(rows))
                .await;
        }

        opt if opt.starts_with("svc_opt_") => {
            let _ = bot.answer_callback_query(callback_id).await;
            let Ok(service_id) = opt["svc_opt_".len()..].parse::<i64>() else {
                return Ok(());
            };
            match state.catalog_service.get(service_id).await {
                Ok(Some(service)) => {
                    let text = format!(
                        "⚙️ Service\nName: {}\nPrice: {} TK\nType: {}\nQuestion: {}",
                        service.name,
                        service.price,
                        service.kind.as_str(),
                        service.question.as_deref().unwrap_or("None")
                    );
                    let kb = InlineKeyboardMarkup::new(vec![
                        vec![InlineKeyboardButton::callback(
                            "🗑 Delete",
                            format!("svc_del_{}", service.id),
                        )],
                        vec![InlineKeyboardButton::callback("⬅️ Back", "admin_list_svc")],
                    ]);
                    let _ = bot
                        .edit_message_text(chat_id, msg_id, text)
                        .reply_markup(kb)
                        .await;
                }
                _ => {
                    let _ = bot
                        .edit_message_text(chat_id, msg_id, "Service no longer exists.")
                        .reply_markup(keyboards::admin_home_keyboard())
                        .await;
                }
            }
        }

        del if del.starts_with("svc_del_") => {
            let Ok(service_id) = del["svc_del_".len()..].parse::<i64>() else {
                return Ok(());
            };
            match state.catalog_service.delete_service(service_id).await {
                Ok(()) => {
                    let _ = bot
                        .answer_callback_query(callback_id)
                        .text("Deleted")
                        .await;
                }
                Err(e) => {
                    let _ = bot
                        .answer_callback_query(callback_id)
                        .text(error_text(&e))
                        .show_alert(true)
                        .await;
                }
            }
            let _ = bot
                .edit_message_text(chat_id, msg_id, "📋 Services updated.")
                .reply_markup(keyboards::admin_home_keyboard())
                .await;
        }

        "admin_add_stock" => {
            let _ = bot.answer_callback_query(callback_id).await;
            let services = state.catalog_service.list_with_stock().await.unwrap_or_default();
            let listing = services
                .iter()
                .map(|(s, _)| format!("{}: {}", s.id, s.name))
                .collect::<Vec<_>>()
                .join("\n");
            state.sessions.set_admin(admin_id, AdminFlow::StockService).await;
            bot.send_message(chat_id, format!("Enter the service id:\n{}", listing))
                .await?;
        }

        "admin_pending" => {
            let _ = bot.answer_callback_query(callback_id).await;
            show_pending_list(&bot, chat_id, msg_id, &state).await?;
        }

        view if view.starts_with("ord_view_") => {
            let _ = bot.answer_callback_query(callback_id).await;
            let Ok(order_id) = view["ord_view_".len()..].parse::<i64>() else {
                return Ok(());
            };
            match state.store_service.order(order_id).await {
                Ok(Some(order)) if order.status == dokan_db::models::store::OrderStatus::Pending => {
                    let text = format!(
                        "📦 Order #{}\n👤 User: {}\n🛍 Service: {}\n💵 Price: {} TK\n📝 Input: {}",
                        order.id,
                        order.user_id,
                        order.service_name.as_deref().unwrap_or("unknown"),
                        order.price,
                        order.user_input.as_deref().unwrap_or("None")
                    );
                    let kb = InlineKeyboardMarkup::new(vec![
                        vec![InlineKeyboardButton::callback(
                            "✅ Mark Complete",
                            format!("ord_act_complete_{}", order.id),
                        )],
                        vec![InlineKeyboardButton::callback(
                            "↩️ Refund",
                            format!("ord_act_refund_{}", order.id),
                        )],
                        vec![InlineKeyboardButton::callback("⬅️ Back", "admin_pending")],
                    ]);
                    let _ = bot
                        .edit_message_text(chat_id, msg_id, text)
                        .reply_markup(kb)
                        .await;
                }
                _ => {
                    show_pending_list(&bot, chat_id, msg_id, &state).await?;
                }
            }
        }

        act if act.starts_with("ord_act_") => {
            let rest = &act["ord_act_".len()..];
            let Some((action, id)) = rest.split_once('_') else {
                return Ok(());
            };
            let Ok(order_id) = id.parse::<i64>() else {
                return Ok(());
            };
            let action = match action {
                "complete" => crate::services::store_service::ResolveAction::Complete,
                "refund" => crate::services::store_service::ResolveAction::Refund,
                _ => return Ok(()),
            };
            match state.store_service.resolve(order_id, action).await {
                Ok(resolved) => {
                    let note = match resolved.action {
                        crate::services::store_service::ResolveAction::Complete => "Completed",
                        crate::services::store_service::ResolveAction::Refund => "Refunded",
                    };
                    let _ = bot.answer_callback_query(callback_id).text(note).await;
                }
                Err(e) => {
                    let _ = bot
                        .answer_callback_query(callback_id)
                        .text(error_text(&e))
                        .show_alert(true)
                        .await;
                }
            }
            show_pending_list(&bot, chat_id, msg_id, &state).await?;
        }

        "admin_codes" => {
            let _ = bot.answer_callback_query(callback_id).await;
            let kb = InlineKeyboardMarkup::new(vec![
                vec![
                    InlineKeyboardButton::callback("➕ Create Code", "code_add"),
                    InlineKeyboardButton::callback("📋 List/Del", "code_list"),
                ],
                vec![InlineKeyboardButton::callback("⬅️ Back", "admin_home")],
            ]);
            let _ = bot
                .edit_message_text(chat_id, msg_id, "🎁 Redeem Codes")
                .reply_markup(kb)
                .await;
        }

        "code_add" => {
            let _ = bot.answer_callback_query(callback_id).await;
            state.sessions.set_admin(admin_id, AdminFlow::CodeAmount).await;
            bot.send_message(chat_id, "Bonus amount (TK):").await?;
        }

        "code_list" => {
            let _ = bot.answer_callback_query(callback_id).await;
            let codes = state.promo_service.list_codes().await.unwrap_or_default();
            if codes.is_empty() {
                let _ = bot
                    .edit_message_text(chat_id, msg_id, "No codes.")
                    .reply_markup(keyboards::admin_home_keyboard())
                    .await;
                return Ok(());
            }
            let mut rows = Vec::with_capacity(codes.len() + 1);
            for code in codes {
                rows.push(vec![InlineKeyboardButton::callback(
                    format!("{} ({}/{})", code.code, code.used_count, code.max_uses),
                    format!("del_code_{}", code.code),
                )]);
            }
            rows.push(vec![InlineKeyboardButton::callback("⬅️ Back", "admin_codes")]);
            let _ = bot
                .edit_message_text(chat_id, msg_id, "Click a code to delete it:")
                .reply_markup(InlineKeyboardMarkup::new(rows))
                .await;
        }

        del if del.starts_with("del_code_") => {
            let code = &del["del_code_".len()..];
            match state.promo_service.delete_code(code).await {
                Ok(()) => {
                    let _ = bot.answer_callback_query(callback_id).text("Deleted").await;
                }
                Err(e) => {
                    let _ = bot
                        .answer_callback_query(callback_id)
                        .text(error_text(&e))
                        .show_alert(true)
                        .await;
                }
            }
            let _ = bot
                .edit_message_text(chat_id, msg_id, "🎁 Codes updated.")
                .reply_markup(keyboards::admin_home_keyboard())
                .await;
        }

        "admin_settings" => {
            let _ = bot.answer_callback_query(callback_id).await;
            let bonus = state.settings.ref_bonus().await;
            let kb = InlineKeyboardMarkup::new(vec![vec![
                InlineKeyboardButton::callback("✏️ Edit Ref Bonus", "set_ref_edit"),
                InlineKeyboardButton::callback("⬅️ Back", "admin_home"),
            ]]);
            let _ = bot
                .edit_message_text(chat_id, msg_id, format!("⚙️ Settings\nRef Bonus: {} TK", bonus))
                .reply_markup(kb)
                .await;
        }

        "set_ref_edit" => {
            let _ = bot.answer_callback_query(callback_id).await;
            state.sessions.set_admin(admin_id, AdminFlow::RefBonus).await;
            bot.send_message(chat_id, "New referral bonus amount:").await?;
        }

        "admin_broadcast" => {
            let _ = bot.answer_callback_query(callback_id).await;
            state.sessions.set_admin(admin_id, AdminFlow::Broadcast).await;
            bot.send_message(chat_id, "Send the broadcast message:").await?;
        }

        "admin_stats" => {
            let _ = bot.answer_callback_query(callback_id).await;
            let users = state.user_service.count().await.unwrap_or(0);
            let pending = state
                .store_service
                .pending_orders()
                .await
                .map(|orders| orders.len())
                .unwrap_or(0);
            let mut text = format!("📊 Stats\nUsers: {}\nPending orders: {}", users, pending);
            if let Ok(top) = state.user_service.top_by_balance(5).await {
                if !top.is_empty() {
                    text.push_str("\n\nTop balances:");
                    for user in top {
                        text.push_str(&format!(
                            "\n{}: {} TK",
                            user.first_name.as_deref().unwrap_or("Unknown"),
                            user.balance
                        ));
                    }
                }
            }
            let _ = bot
                .edit_message_text(chat_id, msg_id, text)
                .reply_markup(keyboards::admin_home_keyboard())
                .await;
        }

        "admin_pay" => {
            let _ = bot.answer_callback_query(callback_id).await;
            bot.send_message(chat_id, "Usage: /pay <user_id> <amount>")
                .await?;
        }

        _ => {
            let _ = bot.answer_callback_query(callback_id).await;
        }
    }

    Ok(())
}
