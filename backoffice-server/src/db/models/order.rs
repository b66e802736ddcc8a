//! Order model
//!
//! Wire field names stay camelCase to match what the dashboard front end
//! reads and writes. `time` travels as an ISO-8601 string because order
//! entry stamps it client-side.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::order::{LeadSource, OrderLine, OrderStatus, OrderType};
use surrealdb::RecordId;
use validator::Validate;

/// Order record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Owning restaurant account
    pub tenant: String,
    pub customer_name: String,
    /// Creation timestamp, ISO-8601
    pub time: String,
    pub products: Vec<OrderLine>,
    /// Currency amount as text; reservations carry a placeholder here
    pub total: String,
    pub status: OrderStatus,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_source: Option<LeadSource>,
    /// Present when type = No Restaurante and a table is assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<i32>,
    /// Present when type = Delivery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Used by the feedback-request flow for WhatsApp orders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Create order payload
///
/// `id` is the client-generated opaque identifier; the server generates a
/// UUID when the caller leaves it out. Status always starts at Recebido.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub id: Option<String>,
    #[validate(length(min = 1, message = "customerName is required"))]
    pub customer_name: String,
    /// Defaults to the current time when absent
    pub time: Option<String>,
    pub products: Vec<OrderLine>,
    pub total: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub lead_source: Option<LeadSource>,
    pub table_number: Option<i32>,
    pub address: Option<String>,
    pub phone: Option<String>,
}
