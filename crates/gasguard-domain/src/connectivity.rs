use chrono::{DateTime, Utc};

/// The single persisted connectivity record for the device.
///
/// `connection_count` only moves on a disconnected→connected transition;
/// redundant connect or disconnect signals leave it untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectivityRecord {
    pub connected: bool,
    pub connection_count: u64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityStatus {
    Connected,
    Disconnected,
}

impl ConnectivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectivityStatus::Connected => "connected",
            ConnectivityStatus::Disconnected => "disconnected",
        }
    }
}

/// Outcome of a connect signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectTransition {
    pub connection_count: u64,
    /// True only when this call flipped the state from disconnected.
    pub transitioned: bool,
}

/// Outcome of a disconnect signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectTransition {
    pub transitioned: bool,
}

/// Pure read of the current connectivity state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivitySnapshot {
    pub status: ConnectivityStatus,
    pub connection_count: u64,
}
