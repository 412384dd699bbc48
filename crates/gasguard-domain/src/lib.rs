pub mod command;
pub mod command_relay;
pub mod connectivity;
pub mod connectivity_tracker;
pub mod device_channel;
pub mod error;
pub mod in_memory_connectivity_store;
pub mod in_memory_reading_store;
pub mod in_memory_threshold_store;
pub mod reading;
pub mod reading_service;
pub mod store;
pub mod threshold;
pub mod threshold_service;
pub mod transport;

pub use command::{
    CommandKind, CommandMode, CommandReceipt, CommandStates, DeviceCommand, RelayCommandInput,
    TransportKind,
};
pub use command_relay::CommandRelay;
pub use connectivity::{
    ConnectTransition, ConnectivityRecord, ConnectivitySnapshot, ConnectivityStatus,
    DisconnectTransition,
};
pub use connectivity_tracker::ConnectivityTracker;
pub use device_channel::DeviceChannel;
pub use error::{DomainError, DomainResult};
pub use in_memory_connectivity_store::InMemoryConnectivityStore;
pub use in_memory_reading_store::InMemoryReadingStore;
pub use in_memory_threshold_store::InMemoryThresholdStore;
pub use reading::{Reading, ReadingRangeInput, RecordReadingInput};
pub use reading_service::ReadingService;
pub use store::{ConnectivityStore, ReadingStore, ThresholdStore};
pub use threshold::{ThresholdRecord, DEFAULT_ALARM_THRESHOLD};
pub use threshold_service::ThresholdService;
pub use transport::CommandTransport;
