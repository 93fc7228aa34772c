//! Per-quote replay channels
//!
//! A rating can land before the browser manages to subscribe (the scorer may
//! finish while the detail page is still loading). Each quote id gets a
//! short-lived channel that buffers everything published to it and replays
//! the buffer to late subscribers before handing over to the live feed.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{Stream, StreamExt};
use tokio::sync::{broadcast, RwLock};
use tokio_stream::wrappers::BroadcastStream;
use tracing::debug;

use quotd_common::QuoteUpdate;

/// How long a per-quote channel (and its replay buffer) is retained
pub const REPLAY_TTL: Duration = Duration::from_secs(10);

/// Buffered updates per channel; a quote sees at most a handful
const CHANNEL_CAPACITY: usize = 16;

struct ReplayChannel {
    history: Vec<QuoteUpdate>,
    tx: broadcast::Sender<QuoteUpdate>,
}

/// Registry of per-quote replay channels
#[derive(Clone)]
pub struct ReplayRegistry {
    channels: Arc<RwLock<HashMap<i64, ReplayChannel>>>,
    ttl: Duration,
}

impl Default for ReplayRegistry {
    fn default() -> Self {
        Self::new(REPLAY_TTL)
    }
}

impl ReplayRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Subscribe to updates for one quote id
    ///
    /// Updates already published within the retention window are replayed
    /// first, in publish order, followed by live updates.
    pub async fn subscribe(&self, id: i64) -> impl Stream<Item = QuoteUpdate> {
        let mut channels = self.channels.write().await;
        let channel = self.entry(&mut channels, id);
        let history = channel.history.clone();
        let rx = channel.tx.subscribe();
        drop(channels);

        debug!(
            "Subscriber attached to quote {} ({} updates replayed)",
            id,
            history.len()
        );

        let live = BroadcastStream::new(rx).filter_map(|result| async move { result.ok() });
        futures::stream::iter(history).chain(live)
    }

    /// Publish an update, returning the number of live subscribers
    pub async fn publish(&self, update: QuoteUpdate) -> usize {
        let mut channels = self.channels.write().await;
        let channel = self.entry(&mut channels, update.id);
        channel.history.push(update.clone());
        channel.tx.send(update).unwrap_or(0)
    }

    /// Get or create the channel for an id; expiry is scheduled on creation
    fn entry<'a>(
        &self,
        channels: &'a mut HashMap<i64, ReplayChannel>,
        id: i64,
    ) -> &'a mut ReplayChannel {
        match channels.entry(id) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);

                let registry = self.clone();
                let ttl = self.ttl;
                tokio::spawn(async move {
                    tokio::time::sleep(ttl).await;
                    registry.channels.write().await.remove(&id);
                    debug!("Replay channel for quote {} expired", id);
                });

                vacant.insert(ReplayChannel {
                    history: Vec::new(),
                    tx,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotd_common::QuoteStatus;

    fn update(id: i64, rating: i64) -> QuoteUpdate {
        QuoteUpdate {
            id,
            status: Some(QuoteStatus::Rated),
            rating: Some(rating),
        }
    }

    #[tokio::test]
    async fn late_subscriber_gets_replay_then_live() {
        let registry = ReplayRegistry::new(Duration::from_secs(10));

        registry.publish(update(1, 3)).await;

        let mut stream = Box::pin(registry.subscribe(1).await);
        let replayed = stream.next().await.unwrap();
        assert_eq!(replayed.rating, Some(3));

        registry.publish(update(1, 4)).await;
        let live = stream.next().await.unwrap();
        assert_eq!(live.rating, Some(4));
    }

    #[tokio::test]
    async fn channels_are_scoped_by_quote_id() {
        let registry = ReplayRegistry::new(Duration::from_secs(10));

        registry.publish(update(1, 5)).await;

        let mut other = Box::pin(registry.subscribe(2).await);
        let outcome =
            tokio::time::timeout(Duration::from_millis(100), other.next()).await;
        assert!(outcome.is_err(), "quote 2 must not see quote 1 updates");
    }

    #[tokio::test]
    async fn all_subscribers_receive_a_publish() {
        let registry = ReplayRegistry::new(Duration::from_secs(10));

        let mut first = Box::pin(registry.subscribe(7).await);
        let mut second = Box::pin(registry.subscribe(7).await);

        let delivered = registry.publish(update(7, 2)).await;
        assert_eq!(delivered, 2);

        assert_eq!(first.next().await.unwrap().rating, Some(2));
        assert_eq!(second.next().await.unwrap().rating, Some(2));
    }

    #[tokio::test]
    async fn expired_channel_forgets_its_history() {
        let registry = ReplayRegistry::new(Duration::from_millis(50));

        registry.publish(update(1, 4)).await;
        tokio::time::sleep(Duration::from_millis(150)).await;

        let mut stream = Box::pin(registry.subscribe(1).await);
        let outcome =
            tokio::time::timeout(Duration::from_millis(100), stream.next()).await;
        assert!(outcome.is_err(), "history must not outlive the retention window");
    }
}
