//! Product model
//!
//! Stock quantities are `Decimal` end to end: KG products carry fractional
//! stock (3+ decimal places) that must round-trip without truncation.

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Catalog availability
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProductStatus {
    #[serde(rename = "Ativo")]
    Ativo,
    #[serde(rename = "Pausado")]
    Pausado,
}

impl ProductStatus {
    /// Ativo <-> Pausado
    pub fn toggled(&self) -> Self {
        match self {
            ProductStatus::Ativo => ProductStatus::Pausado,
            ProductStatus::Pausado => ProductStatus::Ativo,
        }
    }
}

/// Stock unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProductUnit {
    #[serde(rename = "Quantidade")]
    Quantidade,
    #[serde(rename = "KG")]
    Kg,
}

/// Product record
///
/// `stock`, `avg_used_per_order` and `low_stock_alert` are only meaningful
/// when `control_stock` is true; the debit path ignores them otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Owning restaurant account
    pub tenant: String,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub status: ProductStatus,
    pub control_stock: bool,
    pub unit: ProductUnit,
    /// Never negative - debits clamp at zero
    pub stock: Decimal,
    /// Quantity consumed per order line referencing this product
    pub avg_used_per_order: Decimal,
    pub low_stock_alert: Decimal,
}

impl Product {
    /// Below-threshold check behind the `?stock=low` list filter
    pub fn is_low_stock(&self) -> bool {
        self.control_stock && self.stock > Decimal::ZERO && self.stock < self.low_stock_alert
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.control_stock && self.stock == Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(control_stock: bool, stock: &str, low_stock_alert: &str) -> Product {
        Product {
            id: None,
            tenant: "t1".to_string(),
            name: "Farinha".to_string(),
            category: "Insumos".to_string(),
            price: Decimal::ZERO,
            status: ProductStatus::Ativo,
            control_stock,
            unit: ProductUnit::Kg,
            stock: stock.parse().unwrap(),
            avg_used_per_order: "0.250".parse().unwrap(),
            low_stock_alert: low_stock_alert.parse().unwrap(),
        }
    }

    #[test]
    fn low_stock_is_between_zero_and_alert_threshold() {
        assert!(product(true, "1.000", "2.000").is_low_stock());
        // At the threshold is not low
        assert!(!product(true, "2.000", "2.000").is_low_stock());
        // Zero is out, not low
        assert!(!product(true, "0", "2.000").is_low_stock());
    }

    #[test]
    fn out_of_stock_requires_exactly_zero() {
        assert!(product(true, "0", "2.000").is_out_of_stock());
        assert!(!product(true, "0.001", "2.000").is_out_of_stock());
    }

    #[test]
    fn uncontrolled_products_never_alert() {
        assert!(!product(false, "0", "2.000").is_out_of_stock());
        assert!(!product(false, "1.000", "2.000").is_low_stock());
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    pub price: Decimal,
    pub status: Option<ProductStatus>,
    #[serde(default)]
    pub control_stock: bool,
    pub unit: Option<ProductUnit>,
    pub stock: Option<Decimal>,
    pub avg_used_per_order: Option<Decimal>,
    pub low_stock_alert: Option<Decimal>,
}

/// Update product payload - every field optional, merge semantics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<ProductUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_used_per_order: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock_alert: Option<Decimal>,
}
