use sqlx::SqlitePool;
use tracing::info;

use dokan_db::error::StoreError;
use dokan_db::models::store::{Service, ServiceKind};
use dokan_db::repositories::service_repo::ServiceRepository;
use dokan_db::repositories::stock_repo::StockRepository;

/// Admin CRUD over the service catalog and its stock pool. Stock
/// consumption goes through the fulfillment engine only.
#[derive(Debug, Clone)]
pub struct CatalogService {
    services: ServiceRepository,
    stock: StockRepository,
}

impl CatalogService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            services: ServiceRepository::new(pool.clone()),
            stock: StockRepository::new(pool),
        }
    }

    pub async fn create_service(
        &self,
        name: &str,
        price: i64,
        kind: ServiceKind,
        description: Option<&str>,
        question: Option<&str>,
    ) -> Result<i64, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation("service name is empty".to_string()));
        }
        if price <= 0 {
            return Err(StoreError::Validation("price must be positive".to_string()));
        }
        let id = self
            .services
            .create(name, price, kind, description, question)
            .await?;
        info!(id, name, price, kind = kind.as_str(), "service created");
        Ok(id)
    }

    pub async fn get(&self, service_id: i64) -> Result<Option<Service>, StoreError> {
        self.services.get(service_id).await
    }

    /// Catalog listing with remaining stock per service, for the shop and
    /// the admin overview.
    pub async fn list_with_stock(&self) -> Result<Vec<(Service, i64)>, StoreError> {
        let services = self.services.list().await?;
        let mut out = Vec::with_capacity(services.len());
        for service in services {
            let count = self.stock.count(service.id).await?;
            out.push((service, count));
        }
        Ok(out)
    }

    pub async fn delete_service(&self, service_id: i64) -> Result<(), StoreError> {
        if !self.services.delete(service_id).await? {
            return Err(StoreError::NotFound("service"));
        }
        info!(service_id, "service deleted");
        Ok(())
    }

    pub async fn update_price(&self, service_id: i64, price: i64) -> Result<(), StoreError> {
        if price <= 0 {
            return Err(StoreError::Validation("price must be positive".to_string()));
        }
        if !self.services.update_price(service_id, price).await? {
            return Err(StoreError::NotFound("service"));
        }
        Ok(())
    }

    pub async fn add_stock(&self, service_id: i64, content: &str) -> Result<(), StoreError> {
        if self.services.get(service_id).await?.is_none() {
            return Err(StoreError::NotFound("service"));
        }
        self.stock.add(service_id, content).await?;
        info!(service_id, "stock item added");
        Ok(())
    }

    pub async fn stock_count(&self, service_id: i64) -> Result<i64, StoreError> {
        self.stock.count(service_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;

    #[tokio::test]
    async fn create_validates_name_and_price() {
        let pool = test_pool().await;
        let catalog = CatalogService::new(pool);

        assert!(matches!(
            catalog
                .create_service("  ", 10, ServiceKind::Auto, None, None)
                .await,
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            catalog
                .create_service("Free", 0, ServiceKind::Auto, None, None)
                .await,
            Err(StoreError::Validation(_))
        ));

        let id = catalog
            .create_service("Netflix", 50, ServiceKind::Auto, Some("1 month"), None)
            .await
            .unwrap();
        let service = catalog.get(id).await.unwrap().unwrap();
        assert_eq!(service.kind, ServiceKind::Auto);
        assert_eq!(service.description.as_deref(), Some("1 month"));
    }

    #[tokio::test]
    async fn stock_requires_an_existing_service() {
        let pool = test_pool().await;
        let catalog = CatalogService::new(pool);

        assert!(matches!(
            catalog.add_stock(42, "orphan").await,
            Err(StoreError::NotFound("service"))
        ));

        let id = catalog
            .create_service("Keys", 10, ServiceKind::Auto, None, None)
            .await
            .unwrap();
        catalog.add_stock(id, "k1").await.unwrap();
        catalog.add_stock(id, "k2").await.unwrap();

        let listing = catalog.list_with_stock().await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].1, 2);

        catalog.delete_service(id).await.unwrap();
        assert_eq!(catalog.stock_count(id).await.unwrap(), 0);
    }
}
