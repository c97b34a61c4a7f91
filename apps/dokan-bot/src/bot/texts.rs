//! User-facing strings for the customer bot, English and Bangla.

use dokan_db::error::StoreError;
use dokan_db::models::store::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Bn,
}

impl Lang {
    pub fn from_code(code: &str) -> Self {
        match code {
            "bn" => Lang::Bn,
            _ => Lang::En,
        }
    }
}

pub fn welcome(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "🏪 Welcome to the shop! Pick an option below.",
        Lang::Bn => "🏪 দোকানে স্বাগতম! নিচের অপশন থেকে বেছে নিন।",
    }
}

pub fn choose_lang(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "🌐 Choose your language:",
        Lang::Bn => "🌐 আপনার ভাষা বেছে নিন:",
    }
}

pub fn btn_daily(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "🎁 Daily Bonus",
        Lang::Bn => "🎁 দৈনিক বোনাস",
    }
}

pub fn btn_shop(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "🛍 Shop",
        Lang::Bn => "🛍 শপ",
    }
}

pub fn btn_profile(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "👤 Profile",
        Lang::Bn => "👤 প্রোফাইল",
    }
}

pub fn btn_redeem(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "🎟 Redeem Code",
        Lang::Bn => "🎟 কোড রিডিম",
    }
}

pub fn btn_refer(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "👥 Refer & Earn",
        Lang::Bn => "👥 রেফার করে আয়",
    }
}

pub fn btn_add_balance(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "💳 Add Balance",
        Lang::Bn => "💳 ব্যালেন্স যোগ",
    }
}

pub fn btn_support(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "☎️ Support",
        Lang::Bn => "☎️ সাপোর্ট",
    }
}

pub fn btn_back(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "⬅️ Back",
        Lang::Bn => "⬅️ পেছনে",
    }
}

pub fn btn_confirm(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "✅ Confirm",
        Lang::Bn => "✅ নিশ্চিত",
    }
}

pub fn btn_cancel(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "❌ Cancel",
        Lang::Bn => "❌ বাতিল",
    }
}

pub fn daily_success(lang: Lang, amount: i64) -> String {
    match lang {
        Lang::En => format!("🎉 Daily bonus claimed! {} TK added to your wallet.", amount),
        Lang::Bn => format!("🎉 দৈনিক বোনাস পেয়েছেন! {} টাকা যোগ হয়েছে।", amount),
    }
}

pub fn daily_fail(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "⏳ Already claimed today. Come back tomorrow!",
        Lang::Bn => "⏳ আজ ইতিমধ্যে নিয়েছেন। আগামীকাল আবার আসুন!",
    }
}

pub fn profile_stats(lang: Lang, user: &User) -> String {
    match lang {
        Lang::En => format!(
            "👤 Your Profile\n\nID: {}\nBalance: {} TK\nReferrals: {}\nTotal Earned: {} TK",
            user.user_id, user.balance, user.total_referrals, user.total_earned
        ),
        Lang::Bn => format!(
            "👤 আপনার প্রোফাইল\n\nআইডি: {}\nব্যালেন্স: {} টাকা\nরেফারেল: {}\nমোট আয়: {} টাকা",
            user.user_id, user.balance, user.total_referrals, user.total_earned
        ),
    }
}

pub fn refer_text(lang: Lang, link: &str, bonus: i64) -> String {
    match lang {
        Lang::En => format!(
            "👥 Referral System\n\nShare your link and earn {} TK per new user!\n\nLink:\n{}",
            bonus, link
        ),
        Lang::Bn => format!(
            "👥 রেফারেল সিস্টেম\n\nআপনার লিংক শেয়ার করুন, প্রতি নতুন ইউজারে {} টাকা আয় করুন!\n\nলিংক:\n{}",
            bonus, link
        ),
    }
}

pub fn referral_reward(amount: i64) -> String {
    format!("🎉 New Referral! You earned {} TK.", amount)
}

pub fn redeem_prompt(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "🎁 Enter your redeem code:",
        Lang::Bn => "🎁 আপনার রিডিম কোড লিখুন:",
    }
}

pub fn redeem_success(lang: Lang, amount: i64) -> String {
    match lang {
        Lang::En => format!("✅ Success! Added {} TK to your wallet.", amount),
        Lang::Bn => format!("✅ সফল! আপনার ওয়ালেটে {} টাকা যোগ হয়েছে।", amount),
    }
}

pub fn shop_title(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "🛍 Shop: pick a service",
        Lang::Bn => "🛍 শপ: একটি সার্ভিস বেছে নিন",
    }
}

pub fn shop_empty(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "The shop is empty right now.",
        Lang::Bn => "দোকান এখন খালি।",
    }
}

pub fn stock_left(lang: Lang, count: i64) -> String {
    if count == 0 {
        return match lang {
            Lang::En => "(❌ Stock Out)".to_string(),
            Lang::Bn => "(❌ স্টক শেষ)".to_string(),
        };
    }
    match lang {
        Lang::En => format!("({} in stock)", count),
        Lang::Bn => format!("({}টি স্টকে)", count),
    }
}

pub fn confirm_buy(lang: Lang, name: &str, price: i64) -> String {
    match lang {
        Lang::En => format!("🛒 Buy \"{}\" for {} TK?", name, price),
        Lang::Bn => format!("🛒 \"{}\" কিনবেন {} টাকায়?", name, price),
    }
}

pub fn input_prompt(lang: Lang, question: &str) -> String {
    match lang {
        Lang::En => format!("📝 Requirement\n\n{}\n\nPlease reply with the information:", question),
        Lang::Bn => format!("📝 প্রয়োজনীয় তথ্য\n\n{}\n\nঅনুগ্রহ করে তথ্যটি পাঠান:", question),
    }
}

pub fn order_success(lang: Lang, content: &str) -> String {
    match lang {
        Lang::En => format!(
            "✅ Order complete! Your delivery:\n\n{}\n\nThanks for shopping!",
            content
        ),
        Lang::Bn => format!(
            "✅ অর্ডার সম্পন্ন! আপনার ডেলিভারি:\n\n{}\n\nকেনাকাটার জন্য ধন্যবাদ!",
            content
        ),
    }
}

pub fn order_manual(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "🕐 Request received! An admin will activate your service shortly.",
        Lang::Bn => "🕐 অনুরোধ গৃহীত! অ্যাডমিন শীঘ্রই আপনার সার্ভিস চালু করবেন।",
    }
}

pub fn coming_soon(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "🚧 Coming soon!",
        Lang::Bn => "🚧 শীঘ্রই আসছে!",
    }
}

/// Maps a typed store outcome to what the customer should read.
pub fn store_error(lang: Lang, err: &StoreError) -> String {
    let text = match (err, lang) {
        (StoreError::InsufficientBalance, Lang::En) => "❌ Insufficient balance.",
        (StoreError::InsufficientBalance, Lang::Bn) => "❌ পর্যাপ্ত ব্যালেন্স নেই।",
        (StoreError::OutOfStock, Lang::En) => "❌ Out of stock.",
        (StoreError::OutOfStock, Lang::Bn) => "❌ স্টক শেষ।",
        (StoreError::NotFound("code"), Lang::En) => "❌ Invalid code.",
        (StoreError::NotFound("code"), Lang::Bn) => "❌ ভুল কোড।",
        (StoreError::Exhausted, Lang::En) => "❌ Code limit reached.",
        (StoreError::Exhausted, Lang::Bn) => "❌ কোডের লিমিট শেষ।",
        (StoreError::AlreadyUsed, Lang::En) => "❌ You have already redeemed this code.",
        (StoreError::AlreadyUsed, Lang::Bn) => "❌ আপনি এই কোড আগেই ব্যবহার করেছেন।",
        (StoreError::NotFound(_), Lang::En) => "❌ Not found.",
        (StoreError::NotFound(_), Lang::Bn) => "❌ খুঁজে পাওয়া যায়নি।",
        (_, Lang::En) => "⚠️ Something went wrong, please try again.",
        (_, Lang::Bn) => "⚠️ কিছু একটা সমস্যা হয়েছে, আবার চেষ্টা করুন।",
    };
    text.to_string()
}
