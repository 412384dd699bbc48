use crate::connectivity::{
    ConnectTransition, ConnectivityRecord, ConnectivitySnapshot, ConnectivityStatus,
    DisconnectTransition,
};
use crate::error::DomainResult;
use crate::store::ConnectivityStore;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Tracks whether the device is reachable and how many genuine
/// reconnections have happened.
///
/// Connect and disconnect are idempotent: only a real state flip is a
/// transition, and only a disconnected→connected flip moves the
/// counter. The read-modify-write against the store is serialized by an
/// internal mutex so concurrent signals cannot double-count.
pub struct ConnectivityTracker {
    store: Arc<dyn ConnectivityStore>,
    transition_lock: Mutex<()>,
}

impl ConnectivityTracker {
    pub fn new(store: Arc<dyn ConnectivityStore>) -> Self {
        Self {
            store,
            transition_lock: Mutex::new(()),
        }
    }

    /// Signal that the device is reachable.
    ///
    /// Safe to call any number of times: while already connected the
    /// counter is left unchanged and `transitioned` is false.
    pub async fn connect(&self) -> DomainResult<ConnectTransition> {
        let _guard = self.transition_lock.lock().await;

        let record = self.store.get().await?;
        match record {
            Some(record) if record.connected => {
                debug!(
                    connection_count = record.connection_count,
                    "redundant connect signal ignored"
                );
                Ok(ConnectTransition {
                    connection_count: record.connection_count,
                    transitioned: false,
                })
            }
            Some(record) => {
                let updated = ConnectivityRecord {
                    connected: true,
                    connection_count: record.connection_count + 1,
                    updated_at: Utc::now(),
                };
                self.store.put(updated.clone()).await?;
                info!(
                    connection_count = updated.connection_count,
                    "device connected"
                );
                Ok(ConnectTransition {
                    connection_count: updated.connection_count,
                    transitioned: true,
                })
            }
            None => {
                let created = ConnectivityRecord {
                    connected: true,
                    connection_count: 1,
                    updated_at: Utc::now(),
                };
                self.store.put(created).await?;
                info!(connection_count = 1u64, "device connected for the first time");
                Ok(ConnectTransition {
                    connection_count: 1,
                    transitioned: true,
                })
            }
        }
    }

    /// Signal that the device is unreachable. Mirrors `connect`:
    /// redundant disconnects are no-ops.
    pub async fn disconnect(&self) -> DomainResult<DisconnectTransition> {
        let _guard = self.transition_lock.lock().await;

        let record = self.store.get().await?;
        match record {
            Some(record) if record.connected => {
                let updated = ConnectivityRecord {
                    connected: false,
                    connection_count: record.connection_count,
                    updated_at: Utc::now(),
                };
                self.store.put(updated).await?;
                info!(
                    connection_count = record.connection_count,
                    "device disconnected"
                );
                Ok(DisconnectTransition { transitioned: true })
            }
            Some(_) => {
                debug!("redundant disconnect signal ignored");
                Ok(DisconnectTransition {
                    transitioned: false,
                })
            }
            None => {
                // First signal ever is a disconnect: record it so the
                // state exists, with nothing counted.
                let created = ConnectivityRecord {
                    connected: false,
                    connection_count: 0,
                    updated_at: Utc::now(),
                };
                self.store.put(created).await?;
                Ok(DisconnectTransition {
                    transitioned: false,
                })
            }
        }
    }

    /// Pure read. An absent record reports disconnected with a zero
    /// counter; a store failure propagates instead, so callers can tell
    /// "disconnected" apart from "status unknown".
    pub async fn status(&self) -> DomainResult<ConnectivitySnapshot> {
        let record = self.store.get().await?;
        Ok(match record {
            Some(record) => ConnectivitySnapshot {
                status: if record.connected {
                    ConnectivityStatus::Connected
                } else {
                    ConnectivityStatus::Disconnected
                },
                connection_count: record.connection_count,
            },
            None => ConnectivitySnapshot {
                status: ConnectivityStatus::Disconnected,
                connection_count: 0,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use crate::in_memory_connectivity_store::InMemoryConnectivityStore;
    use crate::store::MockConnectivityStore;

    fn tracker() -> ConnectivityTracker {
        ConnectivityTracker::new(Arc::new(InMemoryConnectivityStore::new()))
    }

    #[tokio::test]
    async fn test_fresh_tracker_reports_disconnected_zero() {
        let tracker = tracker();
        let snapshot = tracker.status().await.unwrap();
        assert_eq!(snapshot.status, ConnectivityStatus::Disconnected);
        assert_eq!(snapshot.connection_count, 0);
    }

    #[tokio::test]
    async fn test_first_connect_creates_record_with_count_one() {
        let tracker = tracker();
        let transition = tracker.connect().await.unwrap();
        assert!(transition.transitioned);
        assert_eq!(transition.connection_count, 1);

        let snapshot = tracker.status().await.unwrap();
        assert_eq!(snapshot.status, ConnectivityStatus::Connected);
        assert_eq!(snapshot.connection_count, 1);
    }

    #[tokio::test]
    async fn test_redundant_connects_do_not_inflate_counter() {
        let tracker = tracker();
        tracker.connect().await.unwrap();

        for _ in 0..5 {
            let transition = tracker.connect().await.unwrap();
            assert!(!transition.transitioned);
            assert_eq!(transition.connection_count, 1);
        }

        assert_eq!(tracker.status().await.unwrap().connection_count, 1);
    }

    #[tokio::test]
    async fn test_redundant_disconnects_are_no_ops() {
        let tracker = tracker();
        tracker.connect().await.unwrap();

        let first = tracker.disconnect().await.unwrap();
        assert!(first.transitioned);
        let second = tracker.disconnect().await.unwrap();
        assert!(!second.transitioned);

        assert_eq!(tracker.status().await.unwrap().connection_count, 1);
    }

    #[tokio::test]
    async fn test_each_reconnect_cycle_counts_once() {
        let tracker = tracker();
        for expected in 1..=4u64 {
            let transition = tracker.connect().await.unwrap();
            assert!(transition.transitioned);
            assert_eq!(transition.connection_count, expected);
            tracker.disconnect().await.unwrap();
        }
        assert_eq!(tracker.status().await.unwrap().connection_count, 4);
    }

    #[tokio::test]
    async fn test_disconnect_before_any_connect_counts_nothing() {
        let tracker = tracker();
        let transition = tracker.disconnect().await.unwrap();
        assert!(!transition.transitioned);

        let snapshot = tracker.status().await.unwrap();
        assert_eq!(snapshot.status, ConnectivityStatus::Disconnected);
        assert_eq!(snapshot.connection_count, 0);
    }

    #[tokio::test]
    async fn test_concurrent_first_connects_count_once() {
        let tracker = Arc::new(tracker());

        let a = tokio::spawn({
            let tracker = tracker.clone();
            async move { tracker.connect().await }
        });
        let b = tokio::spawn({
            let tracker = tracker.clone();
            async move { tracker.connect().await }
        });

        let first = a.await.unwrap().unwrap();
        let second = b.await.unwrap().unwrap();

        // Exactly one of the two calls observed the transition.
        assert!(first.transitioned ^ second.transitioned);
        assert_eq!(tracker.status().await.unwrap().connection_count, 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_not_reported_as_disconnected() {
        let mut mock_store = MockConnectivityStore::new();
        mock_store
            .expect_get()
            .times(1)
            .return_once(|| Err(DomainError::StoreError(anyhow::anyhow!("store down"))));

        let tracker = ConnectivityTracker::new(Arc::new(mock_store));
        let result = tracker.status().await;
        assert!(matches!(result, Err(DomainError::StoreError(_))));
    }
}
