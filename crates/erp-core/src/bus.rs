//! Change notification between stores that share a storage key.
//!
//! A store opened with a [`ChangeBus`] publishes one [`ChangeEvent`] after
//! every successful write. Other stores of the same key pick those events up
//! the next time they call `sync()`. Delivery is in-process only.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// A write notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Storage key that was written.
    pub key: String,
    /// Instance id of the store that wrote it.
    pub source: String,
}

struct Subscriber {
    key: String,
    tx: Sender<ChangeEvent>,
}

/// Publish/subscribe hub keyed by storage key. Clones share subscribers.
#[derive(Clone, Default)]
pub struct ChangeBus {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive every event published for `key` from now on.
    pub fn subscribe(&self, key: &str) -> Receiver<ChangeEvent> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(Subscriber {
                key: key.to_string(),
                tx,
            });
        }
        rx
    }

    /// Deliver `event` to every live subscriber of its key.
    ///
    /// Subscribers whose receiver was dropped are pruned.
    pub fn publish(&self, event: ChangeEvent) {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            tracing::warn!(key = %event.key, "change bus poisoned, event dropped");
            return;
        };
        subscribers.retain(|sub| sub.key != event.key || sub.tx.send(event.clone()).is_ok());
    }

    /// Number of live subscriptions, across all keys.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(key: &str, source: &str) -> ChangeEvent {
        ChangeEvent {
            key: key.to_string(),
            source: source.to_string(),
        }
    }

    #[test]
    fn test_events_routed_by_key() {
        let bus = ChangeBus::new();
        let sales = bus.subscribe("erp.sales");
        let users = bus.subscribe("erp.usuarios");

        bus.publish(event("erp.sales", "a"));

        assert_eq!(sales.try_recv().unwrap(), event("erp.sales", "a"));
        assert!(users.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receivers_are_pruned() {
        let bus = ChangeBus::new();
        let kept = bus.subscribe("erp.sales");
        drop(bus.subscribe("erp.sales"));
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(event("erp.sales", "a"));
        assert_eq!(bus.subscriber_count(), 1);
        assert!(kept.try_recv().is_ok());
    }
}
