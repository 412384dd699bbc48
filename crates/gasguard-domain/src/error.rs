use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Backing storage could not be reached or failed mid-operation.
    /// Distinct from a device that merely reported disconnected.
    #[error("Store error: {0}")]
    StoreError(#[from] anyhow::Error),

    /// A delivery attempt was made and failed (network error, timeout,
    /// or a reply that was not the device's confirmation payload).
    #[error("Device unreachable: {0}")]
    DeviceUnreachable(String),

    /// No transport was available to even attempt delivery.
    #[error("Device not connected: {0}")]
    DeviceNotConnected(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
