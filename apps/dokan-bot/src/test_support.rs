use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::services::notification_service::Notify;

static NEXT_DB: AtomicU32 = AtomicU32::new(0);

/// Fresh file-backed database with migrations applied. File-backed so the
/// pool's connections all see the same data under real concurrency.
pub async fn test_pool() -> SqlitePool {
    let n = NEXT_DB.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "dokan-bot-test-{}-{}.db",
        std::process::id(),
        n
    ));
    let _ = std::fs::remove_file(&path);
    dokan_db::init_db(&format!("sqlite://{}", path.display()))
        .await
        .expect("test database")
}

/// Captures notification events instead of talking to Telegram.
#[derive(Default)]
pub struct RecordingNotifier {
    pub admin_msgs: Mutex<Vec<String>>,
    pub user_msgs: Mutex<Vec<(i64, String)>>,
}

#[async_trait]
impl Notify for RecordingNotifier {
    async fn notify_admins(&self, text: &str) {
        self.admin_msgs.lock().unwrap().push(text.to_string());
    }

    async fn notify_user(&self, user_id: i64, text: &str) {
        self.user_msgs.lock().unwrap().push((user_id, text.to_string()));
    }
}
