use crate::connectivity::ConnectivityRecord;
use crate::error::DomainResult;
use crate::store::ConnectivityStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of ConnectivityStore.
/// State reinitializes to "no record" on restart, which reads as
/// disconnected with a zero counter.
pub struct InMemoryConnectivityStore {
    record: Arc<RwLock<Option<ConnectivityRecord>>>,
}

impl InMemoryConnectivityStore {
    pub fn new() -> Self {
        Self {
            record: Arc::new(RwLock::new(None)),
        }
    }
}

impl Default for InMemoryConnectivityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectivityStore for InMemoryConnectivityStore {
    async fn get(&self) -> DomainResult<Option<ConnectivityRecord>> {
        let record = self.record.read().await;
        Ok(record.clone())
    }

    async fn put(&self, record: ConnectivityRecord) -> DomainResult<()> {
        let mut slot = self.record.write().await;
        *slot = Some(record);
        Ok(())
    }
}
