use crate::error::DomainResult;
use crate::store::ThresholdStore;
use crate::threshold::ThresholdRecord;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of ThresholdStore.
pub struct InMemoryThresholdStore {
    record: Arc<RwLock<Option<ThresholdRecord>>>,
}

impl InMemoryThresholdStore {
    pub fn new() -> Self {
        Self {
            record: Arc::new(RwLock::new(None)),
        }
    }
}

impl Default for InMemoryThresholdStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ThresholdStore for InMemoryThresholdStore {
    async fn get(&self) -> DomainResult<Option<ThresholdRecord>> {
        let record = self.record.read().await;
        Ok(record.clone())
    }

    async fn put(&self, record: ThresholdRecord) -> DomainResult<()> {
        let mut slot = self.record.write().await;
        *slot = Some(record);
        Ok(())
    }
}
