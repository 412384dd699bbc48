use crate::error::{DomainError, DomainResult};
use crate::reading::{Reading, ReadingRangeInput, RecordReadingInput};
use crate::store::ReadingStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

/// Thin ingest/query service over the append-only reading log.
/// Persistence is fire-and-forget from the device's point of view, but
/// a store failure is still reported to the caller.
pub struct ReadingService {
    store: Arc<dyn ReadingStore>,
}

impl ReadingService {
    pub fn new(store: Arc<dyn ReadingStore>) -> Self {
        Self { store }
    }

    /// Persist one sample, stamped with the current time.
    pub async fn record(&self, input: RecordReadingInput) -> DomainResult<Reading> {
        let reading = Reading {
            gas: input.gas,
            distance: input.distance,
            connection_count: input.connection_count,
            timestamp: Utc::now(),
        };

        debug!(
            gas = reading.gas,
            distance = reading.distance,
            connection_count = reading.connection_count,
            "recording reading"
        );
        self.store.insert(reading.clone()).await?;
        Ok(reading)
    }

    pub async fn latest(&self) -> DomainResult<Option<Reading>> {
        self.store.latest().await
    }

    /// Full history, newest first.
    pub async fn history(&self) -> DomainResult<Vec<Reading>> {
        self.store.history().await
    }

    /// Readings inside the inclusive window, oldest first (chart order).
    pub async fn range(&self, input: ReadingRangeInput) -> DomainResult<Vec<Reading>> {
        if input.from > input.to {
            return Err(DomainError::InvalidTimeRange(format!(
                "from {} is after to {}",
                input.from, input.to
            )));
        }
        self.store.range(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory_reading_store::InMemoryReadingStore;
    use chrono::Duration;

    fn service() -> ReadingService {
        ReadingService::new(Arc::new(InMemoryReadingStore::new()))
    }

    #[tokio::test]
    async fn test_record_stamps_time_and_persists() {
        let service = service();
        let before = Utc::now();
        let reading = service
            .record(RecordReadingInput {
                gas: 412.0,
                distance: 33.5,
                connection_count: 2,
            })
            .await
            .unwrap();

        assert!(reading.timestamp >= before);
        let latest = service.latest().await.unwrap().unwrap();
        assert_eq!(latest, reading);
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let service = service();
        for gas in [1.0, 2.0, 3.0] {
            service
                .record(RecordReadingInput {
                    gas,
                    distance: 0.0,
                    connection_count: 1,
                })
                .await
                .unwrap();
        }

        let history = service.history().await.unwrap();
        assert_eq!(history.len(), 3);
        assert!(history
            .windows(2)
            .all(|pair| pair[0].timestamp >= pair[1].timestamp));
    }

    #[tokio::test]
    async fn test_inverted_range_rejected() {
        let service = service();
        let now = Utc::now();
        let result = service
            .range(ReadingRangeInput {
                from: now,
                to: now - Duration::hours(1),
            })
            .await;
        assert!(matches!(result, Err(DomainError::InvalidTimeRange(_))));
    }

    #[tokio::test]
    async fn test_latest_on_empty_log_is_none() {
        let service = service();
        assert!(service.latest().await.unwrap().is_none());
    }
}
