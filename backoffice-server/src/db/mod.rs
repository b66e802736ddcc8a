//! Database module
//!
//! Embedded SurrealDB storage. Every record carries a `tenant` field and
//! repositories scope every query by it - one restaurant account never
//! sees another's orders or catalog.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "backoffice";
const DATABASE: &str = "main";

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database
    pub async fn open(path: &str) -> anyhow::Result<Self> {
        let db = Surreal::new::<RocksDb>(path).await?;
        db.use_ns(NAMESPACE).use_db(DATABASE).await?;
        tracing::info!(path, "Database connection established");
        Ok(Self { db })
    }

    /// In-memory database, used by tests
    pub async fn memory() -> anyhow::Result<Self> {
        let db = Surreal::new::<Mem>(()).await?;
        db.use_ns(NAMESPACE).use_db(DATABASE).await?;
        Ok(Self { db })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::OrderCreate;
    use crate::db::repository::OrderRepository;
    use shared::order::OrderType;

    #[tokio::test]
    async fn on_disk_database_stores_and_reads_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backoffice.db");
        let path = path.to_str().unwrap();

        let service = DbService::open(path).await.unwrap();
        let repo = OrderRepository::new(service.db.clone());
        let order = repo
            .create(
                "t1",
                OrderCreate {
                    id: None,
                    customer_name: "Maria".to_string(),
                    time: None,
                    products: vec![],
                    total: "10.00".to_string(),
                    order_type: OrderType::Delivery,
                    lead_source: None,
                    table_number: None,
                    address: None,
                    phone: None,
                },
            )
            .await
            .unwrap();
        let id = order.id.unwrap().key().to_string();

        let reloaded = repo.find_by_id("t1", &id).await.unwrap().unwrap();
        assert_eq!(reloaded.customer_name, "Maria");
        assert!(std::path::Path::new(path).exists());
    }
}
