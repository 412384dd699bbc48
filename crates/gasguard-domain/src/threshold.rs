use chrono::{DateTime, Utc};

/// Gas concentration (ppm) above which the device raises its alarm when
/// no operator-set value exists.
pub const DEFAULT_ALARM_THRESHOLD: f64 = 1000.0;

/// The single mutable alarm-threshold record.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdRecord {
    pub value: f64,
    pub updated_at: DateTime<Utc>,
}
