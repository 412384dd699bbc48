use crate::error::{DomainError, DomainResult};
use crate::store::ThresholdStore;
use crate::threshold::{ThresholdRecord, DEFAULT_ALARM_THRESHOLD};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// Service for the single alarm-threshold value.
pub struct ThresholdService {
    store: Arc<dyn ThresholdStore>,
}

impl ThresholdService {
    pub fn new(store: Arc<dyn ThresholdStore>) -> Self {
        Self { store }
    }

    /// Upsert the threshold. Non-finite values are rejected before the
    /// store is touched.
    pub async fn set(&self, value: f64) -> DomainResult<f64> {
        if !value.is_finite() {
            return Err(DomainError::InvalidThreshold(format!(
                "threshold must be finite, got {value}"
            )));
        }

        self.store
            .put(ThresholdRecord {
                value,
                updated_at: Utc::now(),
            })
            .await?;

        info!(threshold = value, "alarm threshold updated");
        Ok(value)
    }

    /// Stored value, or `DEFAULT_ALARM_THRESHOLD` when none was ever
    /// set.
    pub async fn get(&self) -> DomainResult<f64> {
        let record = self.store.get().await?;
        let value = match record {
            Some(record) => record.value,
            None => {
                debug!(default = DEFAULT_ALARM_THRESHOLD, "no threshold set, using default");
                DEFAULT_ALARM_THRESHOLD
            }
        };
        Ok(value)
    }
}
