use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use url::Url;

use crate::bot::texts::{self, Lang};

const SUPPORT_URL: &str = "https://t.me/dokan_support";

pub fn main_menu(lang: Lang) -> InlineKeyboardMarkup {
    let mut rows = vec![
        vec![InlineKeyboardButton::callback(
            texts::btn_daily(lang),
            "daily_check",
        )],
        vec![
            InlineKeyboardButton::callback(texts::btn_shop(lang), "menu_shop"),
            InlineKeyboardButton::callback(texts::btn_profile(lang), "menu_profile"),
        ],
        vec![
            InlineKeyboardButton::callback(texts::btn_redeem(lang), "redeem_start"),
            InlineKeyboardButton::callback(texts::btn_refer(lang), "menu_refer"),
        ],
    ];

    let mut balance_row = vec![InlineKeyboardButton::callback(
        texts::btn_add_balance(lang),
        "menu_balance",
    )];
    if let Ok(url) = Url::parse(SUPPORT_URL) {
        balance_row.push(InlineKeyboardButton::url(texts::btn_support(lang), url));
    }
    rows.push(balance_row);
    rows.push(vec![InlineKeyboardButton::callback(
        "🌐 Language",
        "menu_lang",
    )]);

    InlineKeyboardMarkup::new(rows)
}

pub fn language_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("🇬🇧 English", "lang_en"),
            InlineKeyboardButton::callback("🇧🇩 বাংলা", "lang_bn"),
        ],
        vec![InlineKeyboardButton::callback("⬅️ Back", "menu_main")],
    ])
}

pub fn back_keyboard(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        texts::btn_back(lang),
        "menu_main",
    )]])
}

pub fn confirm_keyboard(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback(texts::btn_confirm(lang), "confirm_buy_yes"),
        InlineKeyboardButton::callback(texts::btn_cancel(lang), "menu_shop"),
    ]])
}

pub fn admin_menu(pending_count: usize) -> InlineKeyboardMarkup {
    let pending_text = if pending_count > 0 {
        format!("⏳ Pending ({})", pending_count)
    } else {
        "⏳ Pending Orders".to_string()
    };
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("➕ Add Service", "admin_add_svc"),
            InlineKeyboardButton::callback("📋 Services", "admin_list_svc"),
        ],
        vec![
            InlineKeyboardButton::callback("📦 Add Stock", "admin_add_stock"),
            InlineKeyboardButton::callback("💰 Pay/Deduct", "admin_pay"),
        ],
        vec![
            InlineKeyboardButton::callback(pending_text, "admin_pending"),
            InlineKeyboardButton::callback("📢 Broadcast", "admin_broadcast"),
        ],
        vec![
            InlineKeyboardButton::callback("⚙️ Settings", "admin_settings"),
            InlineKeyboardButton::callback("🎁 Codes", "admin_codes"),
        ],
        vec![InlineKeyboardButton::callback("📊 Stats", "admin_stats")],
    ])
}

pub fn service_kind_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("⚡ Auto Delivery", "type_auto"),
        InlineKeyboardButton::callback("🛠 Manual Delivery", "type_manual"),
    ]])
}

pub fn question_options_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("❌ No Input", "input_no")],
        vec![InlineKeyboardButton::callback(
            "📧 Require Gmail",
            "input_gmail",
        )],
        vec![InlineKeyboardButton::callback(
            "🔢 Require Number/ID",
            "input_id",
        )],
        vec![InlineKeyboardButton::callback(
            "📝 Custom Question...",
            "input_custom",
        )],
    ])
}

/// Single "back to menu" button for admin flows.
pub fn admin_home_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "⬅️ Menu",
        "admin_home",
    )]])
}
