//! Publish-once completion signal for a generated map
//!
//! The generator publishes exactly one map; any number of subscribers can
//! poll for it or wait until it is ready. After publication the map is
//! shared read-only through an `Arc`.

use std::sync::Arc;

use tokio::sync::watch;

use crate::generator::GeneratedMap;

/// Sending half, held by whoever runs generation
#[derive(Debug)]
pub struct MapPublisher {
    tx: watch::Sender<Option<Arc<GeneratedMap>>>,
}

/// Receiving half, cloned into every consumer
#[derive(Clone, Debug)]
pub struct MapSubscriber {
    rx: watch::Receiver<Option<Arc<GeneratedMap>>>,
}

/// Create a connected publisher/subscriber pair.
pub fn map_channel() -> (MapPublisher, MapSubscriber) {
    let (tx, rx) = watch::channel(None);
    (MapPublisher { tx }, MapSubscriber { rx })
}

impl MapPublisher {
    /// Publish the finished map. Returns false if one was already published.
    pub fn publish(&self, map: GeneratedMap) -> bool {
        let map = Arc::new(map);
        let published = self.tx.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(map);
            true
        });
        if published {
            log::info!("Map generation complete");
        } else {
            log::warn!("Map already published, ignoring second publication");
        }
        published
    }

    pub fn subscribe(&self) -> MapSubscriber {
        MapSubscriber {
            rx: self.tx.subscribe(),
        }
    }
}

impl MapSubscriber {
    /// The map if generation has completed.
    pub fn try_get(&self) -> Option<Arc<GeneratedMap>> {
        self.rx.borrow().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Wait for the map. Returns `None` if the publisher was dropped first.
    pub async fn wait_ready(&mut self) -> Option<Arc<GeneratedMap>> {
        match self.rx.wait_for(Option::is_some).await {
            Ok(map) => map.clone(),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::generator::{generate_map, MapGenerator};

    fn small_map(seed: u64) -> GeneratedMap {
        generate_map(MapConfig::default().with_size(24, 24).with_seed(seed)).unwrap()
    }

    #[test]
    fn test_not_ready_before_publish() {
        let (_publisher, subscriber) = map_channel();
        assert!(!subscriber.is_ready());
        assert!(subscriber.try_get().is_none());
    }

    #[test]
    fn test_publish_once() {
        let (publisher, subscriber) = map_channel();
        assert!(publisher.publish(small_map(1)));
        assert!(!publisher.publish(small_map(2)));
        assert_eq!(subscriber.try_get().unwrap().seed, 1);
    }

    #[tokio::test]
    async fn test_wait_ready_across_tasks() {
        let (publisher, subscriber) = map_channel();
        let mut waiters = Vec::new();
        for _ in 0..4 {
            let mut sub = subscriber.clone();
            waiters.push(tokio::spawn(async move { sub.wait_ready().await.map(|m| m.seed) }));
        }

        let mut generator =
            MapGenerator::new(MapConfig::default().with_size(32, 32).with_seed(8)).unwrap();
        assert!(generator.generate_and_publish(&publisher));

        for waiter in waiters {
            assert_eq!(waiter.await.unwrap(), Some(8));
        }
    }

    #[tokio::test]
    async fn test_dropped_publisher_wakes_waiters() {
        let (publisher, mut subscriber) = map_channel();
        drop(publisher);
        assert!(subscriber.wait_ready().await.is_none());
    }
}
