use chrono::{DateTime, Utc};

/// One sensor sample. Immutable once stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub gas: f64,
    pub distance: f64,
    /// Device-reported reconnect counter at sample time.
    pub connection_count: u64,
    pub timestamp: DateTime<Utc>,
}

/// Input for recording a new reading; the service stamps the time.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordReadingInput {
    pub gas: f64,
    pub distance: f64,
    pub connection_count: u64,
}

/// Inclusive time window for a range query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingRangeInput {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}
