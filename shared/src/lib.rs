//! Shared domain types for the restaurant back-office
//!
//! # Module structure
//!
//! - [`order`] - Order status state machine, order lines, lead sources
//! - [`message`] - Event bus payloads (sync notifications, finalize events)
//! - [`response`] - Unified API response envelope

pub mod message;
pub mod order;
pub mod response;

// Re-export common types
pub use message::{BusEvent, SyncPayload};
pub use order::{LeadSource, OrderLine, OrderStatus, OrderType};
pub use response::AppResponse;
