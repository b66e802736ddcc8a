//! Application services
//!
//! - `event_bus`: in-process change notification (sync payloads + domain
//!   events) over a tokio broadcast channel
//! - `review_cache`: Google review proxy with a TTL-backed cache

pub mod event_bus;
pub mod review_cache;

pub use event_bus::EventBus;
pub use review_cache::{
    GooglePlacesFetcher, ReviewCacheService, ReviewFetcher, ReviewProxyError,
};
