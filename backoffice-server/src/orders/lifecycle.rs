//! Order lifecycle
//!
//! Status moves forward through Recebido, Em Preparo, Pronto, Entregue.
//! `advance` and `finalize` ride on conditional writes so concurrent calls
//! cannot regress an order or debit stock twice. `reassign_status` is the
//! drag-and-drop escape hatch: it writes any status directly and leaves an
//! audit trail in the log.

use std::sync::Arc;

use shared::message::BusEvent;
use shared::order::OrderStatus;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::db::models::Order;
use crate::db::repository::{OrderRepository, RepoError};
use crate::orders::stock::{DebitReport, StockService};
use crate::services::EventBus;
use crate::utils::AppError;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Order {0} not found")]
    NotFound(String),

    #[error("Order is not ready for delivery (current status: {current})")]
    NotReady { current: OrderStatus },

    #[error("Order already delivered")]
    AlreadyDelivered,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::NotFound(msg) => AppError::NotFound(msg),
            LifecycleError::NotReady { .. } => AppError::Conflict(err.to_string()),
            LifecycleError::AlreadyDelivered => AppError::Conflict(err.to_string()),
            LifecycleError::Repo(repo) => repo.into(),
        }
    }
}

/// Order plus the stock movements its finalization produced
#[derive(Debug)]
pub struct FinalizeOutcome {
    pub order: Order,
    pub debit: DebitReport,
}

#[derive(Clone)]
pub struct OrderLifecycleService {
    orders: OrderRepository,
    stock: StockService,
    event_bus: Arc<EventBus>,
}

impl OrderLifecycleService {
    pub fn new(db: Surreal<Db>, event_bus: Arc<EventBus>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            stock: StockService::new(db),
            event_bus,
        }
    }

    /// Move an order one step forward
    ///
    /// No-op on Entregue: the unchanged order comes back. When a concurrent
    /// caller wins the conditional write, the fresher record comes back
    /// instead; either way the returned status is never behind the stored
    /// one.
    pub async fn advance(&self, tenant: &str, id: &str) -> Result<Order, LifecycleError> {
        let order = self
            .orders
            .find_by_id(tenant, id)
            .await?
            .ok_or_else(|| LifecycleError::NotFound(id.to_string()))?;

        let Some(next) = order.status.next() else {
            return Ok(order);
        };

        match self
            .orders
            .compare_and_set_status(tenant, id, order.status, next)
            .await?
        {
            Some(updated) => {
                tracing::info!(order_id = id, from = %order.status, to = %next, "order advanced");
                self.event_bus
                    .broadcast_sync("orders", "status_changed", id, Some(&updated));
                Ok(updated)
            }
            None => self
                .orders
                .find_by_id(tenant, id)
                .await?
                .ok_or_else(|| LifecycleError::NotFound(id.to_string())),
        }
    }

    /// Set any status directly, bypassing the forward-only rule
    ///
    /// Backward moves are legitimate here (a card dragged back to Em
    /// Preparo), so every call is audit-logged with the old and new status.
    pub async fn reassign_status(
        &self,
        tenant: &str,
        id: &str,
        target: OrderStatus,
    ) -> Result<Order, LifecycleError> {
        let order = self
            .orders
            .find_by_id(tenant, id)
            .await?
            .ok_or_else(|| LifecycleError::NotFound(id.to_string()))?;

        tracing::warn!(
            order_id = id,
            from = %order.status,
            to = %target,
            "order status reassigned"
        );

        let updated = self.orders.set_status(tenant, id, target).await?;
        self.event_bus
            .broadcast_sync("orders", "status_changed", id, Some(&updated));
        Ok(updated)
    }

    /// Deliver a Pronto order and debit stock for its lines
    ///
    /// The conditional write is the idempotency guard: only the caller that
    /// wins the Pronto -> Entregue transition runs the debit, so stock moves
    /// exactly once per order no matter how many times finalize is called.
    pub async fn finalize(&self, tenant: &str, id: &str) -> Result<FinalizeOutcome, LifecycleError> {
        let transitioned = self
            .orders
            .compare_and_set_status(tenant, id, OrderStatus::Pronto, OrderStatus::Entregue)
            .await?;

        let Some(order) = transitioned else {
            let current = self
                .orders
                .find_by_id(tenant, id)
                .await?
                .ok_or_else(|| LifecycleError::NotFound(id.to_string()))?;
            return Err(match current.status {
                OrderStatus::Entregue => LifecycleError::AlreadyDelivered,
                status => LifecycleError::NotReady { current: status },
            });
        };

        let debit = self.stock.debit_for_order(tenant, &order.products).await;
        tracing::info!(
            order_id = id,
            debited = debit.debited.len(),
            skipped = debit.skipped.len(),
            failed = debit.failed.len(),
            "order finalized"
        );

        self.event_bus.publish(BusEvent::OrderFinalized {
            order_id: id.to_string(),
            lines: order.products.clone(),
        });
        self.event_bus
            .broadcast_sync("orders", "status_changed", id, Some(&order));

        Ok(FinalizeOutcome { order, debit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{OrderCreate, ProductCreate, ProductStatus, ProductUnit};
    use crate::db::repository::ProductRepository;
    use rust_decimal::Decimal;
    use shared::order::{OrderLine, OrderType};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn order_with(lines: Vec<OrderLine>) -> OrderCreate {
        OrderCreate {
            id: None,
            customer_name: "Maria".to_string(),
            time: None,
            products: lines,
            total: "50.00".to_string(),
            order_type: OrderType::Delivery,
            lead_source: None,
            table_number: None,
            address: Some("Rua A, 1".to_string()),
            phone: None,
        }
    }

    async fn setup() -> (OrderLifecycleService, OrderRepository, ProductRepository) {
        let db = DbService::memory().await.unwrap();
        let bus = Arc::new(EventBus::new());
        (
            OrderLifecycleService::new(db.db.clone(), bus),
            OrderRepository::new(db.db.clone()),
            ProductRepository::new(db.db),
        )
    }

    #[tokio::test]
    async fn advance_walks_the_chain_and_stops_at_entregue() {
        let (lifecycle, orders, _) = setup().await;
        let created = orders
            .create("t1", order_with(vec![]))
            .await
            .unwrap();
        let id = created.id.unwrap().key().to_string();
        assert_eq!(created.status, OrderStatus::Recebido);

        let mut last_rank = created.status.rank();
        for expected in [
            OrderStatus::EmPreparo,
            OrderStatus::Pronto,
            OrderStatus::Entregue,
        ] {
            let order = lifecycle.advance("t1", &id).await.unwrap();
            assert_eq!(order.status, expected);
            assert!(order.status.rank() > last_rank);
            last_rank = order.status.rank();
        }

        // Terminal: advancing again is a no-op
        let order = lifecycle.advance("t1", &id).await.unwrap();
        assert_eq!(order.status, OrderStatus::Entregue);
    }

    #[tokio::test]
    async fn finalize_debits_exactly_once() {
        let (lifecycle, orders, products) = setup().await;
        let product = products
            .create(
                "t1",
                ProductCreate {
                    name: "X".to_string(),
                    category: "Lanches".to_string(),
                    price: dec("10"),
                    status: Some(ProductStatus::Ativo),
                    control_stock: true,
                    unit: Some(ProductUnit::Quantidade),
                    stock: Some(dec("5")),
                    avg_used_per_order: Some(dec("1")),
                    low_stock_alert: Some(dec("1")),
                },
            )
            .await
            .unwrap();

        let created = orders
            .create(
                "t1",
                order_with(vec![OrderLine {
                    name: "X".to_string(),
                    quantity: 2,
                    observation: None,
                }]),
            )
            .await
            .unwrap();
        let id = created.id.unwrap().key().to_string();

        lifecycle.advance("t1", &id).await.unwrap();
        lifecycle.advance("t1", &id).await.unwrap();

        let outcome = lifecycle.finalize("t1", &id).await.unwrap();
        assert_eq!(outcome.order.status, OrderStatus::Entregue);
        assert_eq!(outcome.debit.debited.len(), 1);
        assert_eq!(outcome.debit.debited[0].new_stock, dec("3"));

        // Second finalize fails and debits nothing
        let err = lifecycle.finalize("t1", &id).await.unwrap_err();
        assert!(matches!(err, LifecycleError::AlreadyDelivered));

        let product_id = product.id.unwrap().key().to_string();
        let after = products.find_by_id("t1", &product_id).await.unwrap().unwrap();
        assert_eq!(after.stock, dec("3"));
    }

    #[tokio::test]
    async fn finalize_requires_pronto() {
        let (lifecycle, orders, _) = setup().await;
        let created = orders.create("t1", order_with(vec![])).await.unwrap();
        let id = created.id.unwrap().key().to_string();

        let err = lifecycle.finalize("t1", &id).await.unwrap_err();
        match err {
            LifecycleError::NotReady { current } => assert_eq!(current, OrderStatus::Recebido),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn reassign_allows_backward_moves() {
        let (lifecycle, orders, _) = setup().await;
        let created = orders.create("t1", order_with(vec![])).await.unwrap();
        let id = created.id.unwrap().key().to_string();

        lifecycle.advance("t1", &id).await.unwrap();
        lifecycle.advance("t1", &id).await.unwrap();

        let order = lifecycle
            .reassign_status("t1", &id, OrderStatus::Recebido)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Recebido);
    }

    #[tokio::test]
    async fn orders_are_invisible_across_tenants() {
        let (lifecycle, orders, _) = setup().await;
        let created = orders.create("t1", order_with(vec![])).await.unwrap();
        let id = created.id.unwrap().key().to_string();

        let err = lifecycle.advance("t2", &id).await.unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound(_)));
    }

    #[tokio::test]
    async fn order_lines_round_trip_exactly() {
        let (_, orders, _) = setup().await;
        let created = orders
            .create(
                "t1",
                order_with(vec![OrderLine {
                    name: "Pizza".to_string(),
                    quantity: 3,
                    observation: Some("sem cebola".to_string()),
                }]),
            )
            .await
            .unwrap();
        let id = created.id.unwrap().key().to_string();

        let reloaded = orders.find_by_id("t1", &id).await.unwrap().unwrap();
        assert_eq!(reloaded.products.len(), 1);
        assert_eq!(reloaded.products[0].name, "Pizza");
        assert_eq!(reloaded.products[0].quantity, 3);
        assert_eq!(reloaded.products[0].observation.as_deref(), Some("sem cebola"));
    }
}
