//! Stock reconciliation
//!
//! Debits are best-effort per line: a missing product or a storage failure
//! on one line never blocks the others. The report tells the caller what
//! actually happened.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::order::OrderLine;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::Product;
use crate::db::repository::{ProductRepository, RepoResult};

/// Why a line was left untouched
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    ProductNotFound,
    StockNotControlled,
    AlreadyEmpty,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebitedLine {
    pub name: String,
    pub quantity: i32,
    pub previous_stock: Decimal,
    pub new_stock: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedLine {
    pub name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedLine {
    pub name: String,
    pub error: String,
}

/// Per-line outcome of [`StockService::debit_for_order`]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebitReport {
    pub debited: Vec<DebitedLine>,
    pub skipped: Vec<SkippedLine>,
    pub failed: Vec<FailedLine>,
}

#[derive(Clone)]
pub struct StockService {
    products: ProductRepository,
}

impl StockService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            products: ProductRepository::new(db),
        }
    }

    /// Debit stock for every line of a finalized order
    ///
    /// Per line: resolve the product by exact name, then
    /// `new_stock = max(0, stock - quantity * avg_used_per_order)`.
    /// Lines whose product is missing, has stock control off, or is
    /// already at zero are skipped.
    pub async fn debit_for_order(&self, tenant: &str, lines: &[OrderLine]) -> DebitReport {
        let mut report = DebitReport::default();

        for line in lines {
            match self.debit_line(tenant, line).await {
                Ok(Ok(debited)) => {
                    tracing::info!(
                        product = %debited.name,
                        previous = %debited.previous_stock,
                        new = %debited.new_stock,
                        "stock debited"
                    );
                    report.debited.push(debited);
                }
                Ok(Err(reason)) => {
                    tracing::debug!(product = %line.name, ?reason, "stock debit skipped");
                    report.skipped.push(SkippedLine {
                        name: line.name.clone(),
                        reason,
                    });
                }
                Err(err) => {
                    tracing::error!(product = %line.name, error = %err, "stock debit failed");
                    report.failed.push(FailedLine {
                        name: line.name.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        report
    }

    async fn debit_line(
        &self,
        tenant: &str,
        line: &OrderLine,
    ) -> RepoResult<Result<DebitedLine, SkipReason>> {
        let Some(product) = self.products.find_by_name(tenant, &line.name).await? else {
            return Ok(Err(SkipReason::ProductNotFound));
        };
        if !product.control_stock {
            return Ok(Err(SkipReason::StockNotControlled));
        }
        if product.stock <= Decimal::ZERO {
            return Ok(Err(SkipReason::AlreadyEmpty));
        }

        let requested = Decimal::from(line.quantity) * product.avg_used_per_order;
        let new_stock = (product.stock - requested).max(Decimal::ZERO);

        let id = product
            .id
            .as_ref()
            .map(|rid| rid.key().to_string())
            .unwrap_or_default();
        self.products.set_stock(tenant, &id, new_stock).await?;

        Ok(Ok(DebitedLine {
            name: line.name.clone(),
            quantity: line.quantity,
            previous_stock: product.stock,
            new_stock,
        }))
    }

    /// Absolute stock overwrite. Rejects negatives; not additive.
    pub async fn replenish(
        &self,
        tenant: &str,
        product_id: &str,
        new_stock: Decimal,
    ) -> RepoResult<Product> {
        self.products.set_stock(tenant, product_id, new_stock).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{ProductCreate, ProductStatus, ProductUnit};
    use crate::db::repository::RepoError;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn line(name: &str, quantity: i32) -> OrderLine {
        OrderLine {
            name: name.to_string(),
            quantity,
            observation: None,
        }
    }

    fn product(name: &str, control_stock: bool, stock: &str, avg: &str) -> ProductCreate {
        ProductCreate {
            name: name.to_string(),
            category: "Lanches".to_string(),
            price: dec("25.00"),
            status: Some(ProductStatus::Ativo),
            control_stock,
            unit: Some(ProductUnit::Quantidade),
            stock: Some(dec(stock)),
            avg_used_per_order: Some(dec(avg)),
            low_stock_alert: Some(dec("2")),
        }
    }

    async fn setup() -> (StockService, ProductRepository) {
        let db = DbService::memory().await.unwrap();
        (
            StockService::new(db.db.clone()),
            ProductRepository::new(db.db),
        )
    }

    #[tokio::test]
    async fn debit_multiplies_quantity_by_average_use() {
        let (stock, repo) = setup().await;
        let created = repo
            .create("t1", product("X", true, "5", "1"))
            .await
            .unwrap();

        let report = stock.debit_for_order("t1", &[line("X", 2)]).await;

        assert_eq!(report.debited.len(), 1);
        assert_eq!(report.debited[0].new_stock, dec("3"));

        let id = created.id.unwrap().key().to_string();
        let after = repo.find_by_id("t1", &id).await.unwrap().unwrap();
        assert_eq!(after.stock, dec("3"));
    }

    #[tokio::test]
    async fn debit_clamps_at_zero() {
        let (stock, repo) = setup().await;
        let created = repo
            .create("t1", product("X", true, "3", "2"))
            .await
            .unwrap();

        let report = stock.debit_for_order("t1", &[line("X", 5)]).await;

        assert_eq!(report.debited[0].new_stock, Decimal::ZERO);
        let id = created.id.unwrap().key().to_string();
        let after = repo.find_by_id("t1", &id).await.unwrap().unwrap();
        assert_eq!(after.stock, Decimal::ZERO);
    }

    #[tokio::test]
    async fn skips_missing_uncontrolled_and_empty_products() {
        let (stock, repo) = setup().await;
        repo.create("t1", product("NoControl", false, "10", "1"))
            .await
            .unwrap();
        repo.create("t1", product("Empty", true, "0", "1"))
            .await
            .unwrap();

        let report = stock
            .debit_for_order(
                "t1",
                &[line("Ghost", 1), line("NoControl", 1), line("Empty", 1)],
            )
            .await;

        assert!(report.debited.is_empty());
        assert!(report.failed.is_empty());
        let reasons: Vec<_> = report.skipped.iter().map(|s| s.reason).collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::ProductNotFound,
                SkipReason::StockNotControlled,
                SkipReason::AlreadyEmpty,
            ]
        );
    }

    #[tokio::test]
    async fn one_bad_line_does_not_block_the_rest() {
        let (stock, repo) = setup().await;
        repo.create("t1", product("Good", true, "4", "1"))
            .await
            .unwrap();

        let report = stock
            .debit_for_order("t1", &[line("Ghost", 1), line("Good", 1)])
            .await;

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.debited.len(), 1);
        assert_eq!(report.debited[0].new_stock, dec("3"));
    }

    #[tokio::test]
    async fn kg_stock_keeps_three_decimal_places() {
        let (stock, repo) = setup().await;
        let mut picanha = product("Picanha", true, "2.500", "0.250");
        picanha.unit = Some(ProductUnit::Kg);
        let created = repo.create("t1", picanha).await.unwrap();

        let report = stock.debit_for_order("t1", &[line("Picanha", 3)]).await;
        assert_eq!(report.debited[0].new_stock, dec("1.750"));

        let id = created.id.unwrap().key().to_string();
        let after = repo.find_by_id("t1", &id).await.unwrap().unwrap();
        assert_eq!(after.stock, dec("1.750"));
        assert_eq!(after.stock.to_string(), "1.750");
    }

    #[tokio::test]
    async fn replenish_overwrites_instead_of_adding() {
        let (stock, repo) = setup().await;
        let created = repo
            .create("t1", product("X", true, "0", "1"))
            .await
            .unwrap();
        let id = created.id.unwrap().key().to_string();

        let after = stock.replenish("t1", &id, dec("20")).await.unwrap();
        assert_eq!(after.stock, dec("20"));

        // A second replenish with the same value stays at 20
        let after = stock.replenish("t1", &id, dec("20")).await.unwrap();
        assert_eq!(after.stock, dec("20"));
    }

    #[tokio::test]
    async fn replenish_rejects_negative_values() {
        let (stock, repo) = setup().await;
        let created = repo
            .create("t1", product("X", true, "5", "1"))
            .await
            .unwrap();
        let id = created.id.unwrap().key().to_string();

        let err = stock.replenish("t1", &id, dec("-1")).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
