//! Event bus payloads
//!
//! Every store mutation broadcasts a [`SyncPayload`] so live views can
//! re-derive from the latest snapshot. Order finalization additionally
//! publishes [`BusEvent::OrderFinalized`] - the typed replacement for the
//! old cross-page side-channel that used to carry the stock debit hook.

use crate::order::OrderLine;
use serde::{Deserialize, Serialize};

/// Resource change notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncPayload {
    /// Resource type ("order", "product", ...)
    pub resource: String,
    /// Monotonic per-resource version, lets subscribers drop stale updates
    pub version: u64,
    /// Change kind ("created", "updated", "deleted", "status_changed", ...)
    pub action: String,
    /// Record id
    pub id: String,
    /// Full record after the change (None for deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Events published on the in-process bus
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BusEvent {
    /// A collection changed; views should recompute from the new snapshot
    Sync(SyncPayload),
    /// An order reached Entregue; carries the lines the stock ledger debited
    OrderFinalized {
        order_id: String,
        lines: Vec<OrderLine>,
    },
}
