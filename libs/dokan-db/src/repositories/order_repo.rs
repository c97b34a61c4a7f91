use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::models::store::OrderDetail;

const DETAIL_QUERY: &str = "SELECT o.id, o.user_id, o.service_id, o.content, o.price,
            o.status, o.user_input, o.purchased_at, s.name AS service_name
     FROM orders o
     LEFT JOIN services s ON o.service_id = s.id";

#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: i64) -> Result<Option<OrderDetail>, StoreError> {
        let order = sqlx::query_as::<_, OrderDetail>(&format!("{DETAIL_QUERY} WHERE o.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    pub async fn pending(&self) -> Result<Vec<OrderDetail>, StoreError> {
        let orders = sqlx::query_as::<_, OrderDetail>(&format!(
            "{DETAIL_QUERY} WHERE o.status = 'pending' ORDER BY o.id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

}
