use crate::connectivity::ConnectivityRecord;
use crate::error::DomainResult;
use crate::reading::{Reading, ReadingRangeInput};
use crate::threshold::ThresholdRecord;
use async_trait::async_trait;

/// Storage seam for the single connectivity record.
/// Infrastructure implements this; `InMemoryConnectivityStore` is the
/// in-process implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectivityStore: Send + Sync {
    /// Fetch the record, or `None` if no signal has ever been recorded.
    async fn get(&self) -> DomainResult<Option<ConnectivityRecord>>;

    /// Upsert the record.
    async fn put(&self, record: ConnectivityRecord) -> DomainResult<()>;
}

/// Storage seam for the single alarm-threshold record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThresholdStore: Send + Sync {
    async fn get(&self) -> DomainResult<Option<ThresholdRecord>>;

    async fn put(&self, record: ThresholdRecord) -> DomainResult<()>;
}

/// Append-only time-series store for sensor readings.
/// Write order is not significant; read paths sort per query.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadingStore: Send + Sync {
    async fn insert(&self, reading: Reading) -> DomainResult<()>;

    /// Most recent reading by timestamp, if any.
    async fn latest(&self) -> DomainResult<Option<Reading>>;

    /// All readings, newest first.
    async fn history(&self) -> DomainResult<Vec<Reading>>;

    /// Readings within the inclusive window, oldest first.
    async fn range(&self, input: ReadingRangeInput) -> DomainResult<Vec<Reading>>;
}
