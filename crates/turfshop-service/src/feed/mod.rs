//! Change feed: publish/subscribe notifications for collection mutations.
//!
//! Replaces the live-query pattern with a pull-based store plus a broadcast
//! notification: every successful write publishes which collection changed,
//! and subscribers pull a fresh snapshot when they hear about it. Sorting
//! and cascades stay pure functions over the pulled snapshot.

use tokio::sync::broadcast;
use tracing::debug;

/// Store collection a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Equipment,
    Repairs,
}

/// One "something changed" notification. Carries no payload: readers pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: Collection,
}

/// Broadcast fan-out of change events. Cheap to clone; slow receivers lag
/// and miss events rather than blocking writers.
#[derive(Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to mutation notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    /// Publish a mutation. A send error only means nobody is listening.
    pub fn publish(&self, collection: Collection) {
        debug!(?collection, "Change published");
        let _ = self.tx.send(ChangeEvent { collection });
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_see_published_events() {
        let feed = ChangeFeed::new(16);
        let mut rx = feed.subscribe();

        feed.publish(Collection::Repairs);
        feed.publish(Collection::Equipment);

        assert_eq!(rx.recv().await.unwrap().collection, Collection::Repairs);
        assert_eq!(rx.recv().await.unwrap().collection, Collection::Equipment);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_fine() {
        let feed = ChangeFeed::new(16);
        assert_eq!(feed.subscriber_count(), 0);
        feed.publish(Collection::Users);
    }

    #[tokio::test]
    async fn late_subscribers_miss_earlier_events() {
        let feed = ChangeFeed::new(16);
        feed.publish(Collection::Users);

        let mut rx = feed.subscribe();
        feed.publish(Collection::Repairs);
        assert_eq!(rx.recv().await.unwrap().collection, Collection::Repairs);
        assert!(rx.try_recv().is_err());
    }
}
