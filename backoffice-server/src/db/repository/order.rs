//! Order repository
//!
//! Status mutations come in two flavors:
//! - [`compare_and_set_status`] - conditional write, the primitive behind
//!   `advance` and `finalize` (monotonicity and exactly-once debit both
//!   hang off this precondition)
//! - [`set_status`] - unconditional write, the primitive behind the
//!   drag-and-drop escape hatch
//!
//! [`compare_and_set_status`]: OrderRepository::compare_and_set_status
//! [`set_status`]: OrderRepository::set_status

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Order, OrderCreate};
use crate::utils::time::now_iso;
use shared::order::OrderStatus;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

const ORDER_TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All orders for a tenant, oldest first
    pub async fn find_all(&self, tenant: &str) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM type::table($tb) WHERE tenant = $tenant ORDER BY time")
            .bind(("tb", ORDER_TABLE))
            .bind(("tenant", tenant.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, tenant: &str, id: &str) -> RepoResult<Option<Order>> {
        let key = record_key(ORDER_TABLE, id);
        let order: Option<Order> = self.base.db().select((ORDER_TABLE, key)).await?;
        Ok(order.filter(|o| o.tenant == tenant))
    }

    /// Create an order, honoring the client-generated id when present
    ///
    /// Status always starts at Recebido regardless of the payload.
    pub async fn create(&self, tenant: &str, data: OrderCreate) -> RepoResult<Order> {
        if let Some(line) = data.products.iter().find(|l| l.quantity < 1) {
            return Err(RepoError::Validation(format!(
                "invalid quantity {} for product {}",
                line.quantity, line.name
            )));
        }

        let key = data
            .id
            .map(|id| record_key(ORDER_TABLE, &id).to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let order = Order {
            id: None,
            tenant: tenant.to_string(),
            customer_name: data.customer_name,
            time: data.time.unwrap_or_else(now_iso),
            products: data.products,
            total: data.total,
            status: OrderStatus::Recebido,
            order_type: data.order_type,
            lead_source: data.lead_source,
            table_number: data.table_number,
            address: data.address,
            phone: data.phone,
        };

        let created: Option<Order> = self
            .base
            .db()
            .create((ORDER_TABLE, key.as_str()))
            .content(order)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Conditional status transition: only writes when the order currently
    /// holds `from`. Returns `None` when the precondition does not hold
    /// (already moved on, or not this tenant's order).
    pub async fn compare_and_set_status(
        &self,
        tenant: &str,
        id: &str,
        from: OrderStatus,
        to: OrderStatus,
    ) -> RepoResult<Option<Order>> {
        let rid = RecordId::from_table_key(ORDER_TABLE, record_key(ORDER_TABLE, id));
        let mut result = self
            .base
            .db()
            .query("UPDATE $rid SET status = $to WHERE tenant = $tenant AND status = $from RETURN AFTER")
            .bind(("rid", rid))
            .bind(("tenant", tenant.to_string()))
            .bind(("from", from))
            .bind(("to", to))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Unconditional status write - drag-and-drop reassignment only
    pub async fn set_status(
        &self,
        tenant: &str,
        id: &str,
        status: OrderStatus,
    ) -> RepoResult<Order> {
        let rid = RecordId::from_table_key(ORDER_TABLE, record_key(ORDER_TABLE, id));
        let mut result = self
            .base
            .db()
            .query("UPDATE $rid SET status = $status WHERE tenant = $tenant RETURN AFTER")
            .bind(("rid", rid))
            .bind(("tenant", tenant.to_string()))
            .bind(("status", status))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    pub async fn delete(&self, tenant: &str, id: &str) -> RepoResult<()> {
        // Ownership check before the destructive write
        let existing = self.find_by_id(tenant, id).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Order {} not found", id)));
        }
        let key = record_key(ORDER_TABLE, id);
        let _: Option<Order> = self.base.db().delete((ORDER_TABLE, key)).await?;
        Ok(())
    }
}
