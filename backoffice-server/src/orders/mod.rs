//! Order lifecycle module
//!
//! - **lifecycle**: the status state machine (advance / reassign / finalize)
//!   built on conditional writes
//! - **stock**: debit-on-finalize and replenishment over the catalog
//! - **kanban**: pure derivation of the dashboard columns

pub mod kanban;
pub mod lifecycle;
pub mod stock;

// Re-exports
pub use kanban::{ColumnConfig, DateFilter, KanbanColumn, TypeFilter, default_columns, derive_columns};
pub use lifecycle::{FinalizeOutcome, LifecycleError, OrderLifecycleService};
pub use stock::{DebitReport, SkipReason, StockService};
