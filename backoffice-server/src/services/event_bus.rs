//! In-process event bus
//!
//! Two kinds of traffic share one broadcast channel:
//! - sync notifications (resource changed, refetch) for live dashboard
//!   subscribers
//! - domain events such as [`BusEvent::OrderFinalized`], consumed by
//!   in-process listeners
//!
//! Per-resource version counters let subscribers drop stale updates that
//! arrive out of order.

use dashmap::DashMap;
use shared::message::{BusEvent, SyncPayload};
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<BusEvent>,
    versions: DashMap<String, u64>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tx,
            versions: DashMap::new(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BusEvent> {
        self.tx.subscribe()
    }

    /// Publish a domain event. Send errors mean no subscribers, which is
    /// fine for a broadcast bus.
    pub fn publish(&self, event: BusEvent) {
        let _ = self.tx.send(event);
    }

    /// Bump the resource version and notify subscribers of a change
    pub fn broadcast_sync<T: serde::Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) {
        let version = {
            let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };

        let data = data.and_then(|d| serde_json::to_value(d).ok());
        let payload = SyncPayload {
            resource: resource.to_string(),
            version,
            action: action.to_string(),
            id: id.to_string(),
            data,
        };

        tracing::debug!(
            resource = %payload.resource,
            action = %payload.action,
            id = %payload.id,
            version,
            "broadcast sync"
        );
        let _ = self.tx.send(BusEvent::Sync(payload));
    }

    /// Current version for a resource, 0 when never synced
    pub fn version(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sync_versions_increment_per_resource() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.broadcast_sync("orders", "create", "o1", None::<&()>);
        bus.broadcast_sync("orders", "update", "o1", None::<&()>);
        bus.broadcast_sync("products", "update", "p1", None::<&()>);

        assert_eq!(bus.version("orders"), 2);
        assert_eq!(bus.version("products"), 1);

        match rx.recv().await {
            Ok(BusEvent::Sync(payload)) => {
                assert_eq!(payload.resource, "orders");
                assert_eq!(payload.version, 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn domain_events_reach_subscribers() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(BusEvent::OrderFinalized {
            order_id: "o1".to_string(),
            lines: vec![],
        });

        match rx.recv().await {
            Ok(BusEvent::OrderFinalized { order_id, .. }) => assert_eq!(order_id, "o1"),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
