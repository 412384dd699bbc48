use crate::error::DomainResult;
use crate::reading::{Reading, ReadingRangeInput};
use crate::store::ReadingStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory append-only reading log. Insert order is not assumed to be
/// timestamp order; queries sort on the way out.
pub struct InMemoryReadingStore {
    readings: Arc<RwLock<Vec<Reading>>>,
}

impl InMemoryReadingStore {
    pub fn new() -> Self {
        Self {
            readings: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryReadingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadingStore for InMemoryReadingStore {
    async fn insert(&self, reading: Reading) -> DomainResult<()> {
        let mut readings = self.readings.write().await;
        readings.push(reading);
        Ok(())
    }

    async fn latest(&self) -> DomainResult<Option<Reading>> {
        let readings = self.readings.read().await;
        Ok(readings
            .iter()
            .max_by_key(|r| r.timestamp)
            .cloned())
    }

    async fn history(&self) -> DomainResult<Vec<Reading>> {
        let readings = self.readings.read().await;
        let mut all: Vec<Reading> = readings.clone();
        all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(all)
    }

    async fn range(&self, input: ReadingRangeInput) -> DomainResult<Vec<Reading>> {
        let readings = self.readings.read().await;
        let mut window: Vec<Reading> = readings
            .iter()
            .filter(|r| r.timestamp >= input.from && r.timestamp <= input.to)
            .cloned()
            .collect();
        window.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn reading_at(offset_secs: i64, gas: f64) -> Reading {
        Reading {
            gas,
            distance: 10.0,
            connection_count: 1,
            timestamp: Utc::now() + Duration::seconds(offset_secs),
        }
    }

    #[tokio::test]
    async fn test_latest_picks_max_timestamp_regardless_of_insert_order() {
        let store = InMemoryReadingStore::new();
        store.insert(reading_at(20, 300.0)).await.unwrap();
        store.insert(reading_at(10, 200.0)).await.unwrap();

        let latest = store.latest().await.unwrap().unwrap();
        assert_eq!(latest.gas, 300.0);
    }

    #[tokio::test]
    async fn test_history_is_newest_first() {
        let store = InMemoryReadingStore::new();
        store.insert(reading_at(10, 1.0)).await.unwrap();
        store.insert(reading_at(30, 3.0)).await.unwrap();
        store.insert(reading_at(20, 2.0)).await.unwrap();

        let history = store.history().await.unwrap();
        let gases: Vec<f64> = history.iter().map(|r| r.gas).collect();
        assert_eq!(gases, vec![3.0, 2.0, 1.0]);
    }

    #[tokio::test]
    async fn test_range_is_inclusive_and_ascending() {
        let store = InMemoryReadingStore::new();
        let r1 = reading_at(10, 1.0);
        let r2 = reading_at(20, 2.0);
        let r3 = reading_at(30, 3.0);
        store.insert(r2.clone()).await.unwrap();
        store.insert(r3.clone()).await.unwrap();
        store.insert(r1.clone()).await.unwrap();

        let window = store
            .range(ReadingRangeInput {
                from: r1.timestamp,
                to: r2.timestamp,
            })
            .await
            .unwrap();
        let gases: Vec<f64> = window.iter().map(|r| r.gas).collect();
        assert_eq!(gases, vec![1.0, 2.0]);
    }
}
