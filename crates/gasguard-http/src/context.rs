use gasguard_domain::{
    CommandRelay, ConnectivityTracker, DeviceChannel, ReadingService, ThresholdService,
};
use std::sync::Arc;

/// Shared handles for the HTTP surface. The channel handle is the same
/// one the relay selects its transport from, so a handshake observed
/// here is immediately visible to command delivery.
#[derive(Clone)]
pub struct AppContext {
    pub tracker: Arc<ConnectivityTracker>,
    pub relay: Arc<CommandRelay>,
    pub channel: Arc<DeviceChannel>,
    pub thresholds: Arc<ThresholdService>,
    pub readings: Arc<ReadingService>,
}
