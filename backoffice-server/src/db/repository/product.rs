//! Product repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Product, ProductCreate, ProductStatus, ProductUnit, ProductUpdate};
use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All products for a tenant, sorted by name
    pub async fn find_all(&self, tenant: &str) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM type::table($tb) WHERE tenant = $tenant ORDER BY name")
            .bind(("tb", PRODUCT_TABLE))
            .bind(("tenant", tenant.to_string()))
            .await?
            .take(0)?;
        Ok(products)
    }

    pub async fn find_by_id(&self, tenant: &str, id: &str) -> RepoResult<Option<Product>> {
        let key = record_key(PRODUCT_TABLE, id);
        let product: Option<Product> = self.base.db().select((PRODUCT_TABLE, key)).await?;
        Ok(product.filter(|p| p.tenant == tenant))
    }

    /// Exact-name lookup - the stock debit path resolves order lines this way
    pub async fn find_by_name(&self, tenant: &str, name: &str) -> RepoResult<Option<Product>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM type::table($tb) WHERE tenant = $tenant AND name = $name")
            .bind(("tb", PRODUCT_TABLE))
            .bind(("tenant", tenant.to_string()))
            .bind(("name", name.to_string()))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    pub async fn create(&self, tenant: &str, data: ProductCreate) -> RepoResult<Product> {
        let stock = data.stock.unwrap_or(Decimal::ZERO);
        if stock < Decimal::ZERO {
            return Err(RepoError::Validation("stock cannot be negative".into()));
        }

        let product = Product {
            id: None,
            tenant: tenant.to_string(),
            name: data.name,
            category: data.category,
            price: data.price,
            status: data.status.unwrap_or(ProductStatus::Ativo),
            control_stock: data.control_stock,
            unit: data.unit.unwrap_or(ProductUnit::Quantidade),
            stock,
            avg_used_per_order: data.avg_used_per_order.unwrap_or(Decimal::ZERO),
            low_stock_alert: data.low_stock_alert.unwrap_or(Decimal::ZERO),
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Partial update with merge semantics
    pub async fn update(&self, tenant: &str, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        if let Some(stock) = data.stock
            && stock < Decimal::ZERO
        {
            return Err(RepoError::Validation("stock cannot be negative".into()));
        }

        // Ownership check before the write
        if self.find_by_id(tenant, id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }

        let rid = RecordId::from_table_key(PRODUCT_TABLE, record_key(PRODUCT_TABLE, id));
        let updated: Option<Product> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Overwrite the stock level (manual replenishment)
    pub async fn set_stock(&self, tenant: &str, id: &str, stock: Decimal) -> RepoResult<Product> {
        if stock < Decimal::ZERO {
            return Err(RepoError::Validation("stock cannot be negative".into()));
        }

        if self.find_by_id(tenant, id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }

        #[derive(Serialize)]
        struct StockPatch {
            stock: Decimal,
        }

        let rid = RecordId::from_table_key(PRODUCT_TABLE, record_key(PRODUCT_TABLE, id));
        let updated: Option<Product> = self
            .base
            .db()
            .update(rid)
            .merge(StockPatch { stock })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Flip Ativo <-> Pausado
    pub async fn toggle_status(&self, tenant: &str, id: &str) -> RepoResult<Product> {
        let product = self
            .find_by_id(tenant, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        #[derive(Serialize)]
        struct StatusPatch {
            status: ProductStatus,
        }

        let rid = RecordId::from_table_key(PRODUCT_TABLE, record_key(PRODUCT_TABLE, id));
        let updated: Option<Product> = self
            .base
            .db()
            .update(rid)
            .merge(StatusPatch {
                status: product.status.toggled(),
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn delete(&self, tenant: &str, id: &str) -> RepoResult<()> {
        if self.find_by_id(tenant, id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }
        let key = record_key(PRODUCT_TABLE, id);
        let _: Option<Product> = self.base.db().delete((PRODUCT_TABLE, key)).await?;
        Ok(())
    }
}
