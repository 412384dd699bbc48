use crate::command::DeviceCommand;
use crate::error::DomainResult;
use async_trait::async_trait;

/// Outbound-push seam: deliver one command to the device's advertised
/// network address. Implementations must bound the attempt with a
/// timeout and return `DeviceUnreachable` for any network failure,
/// timeout, or non-confirming reply.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandTransport: Send + Sync {
    /// Single best-effort attempt. `Ok` carries the device's
    /// confirmation payload when the transport has one.
    async fn send_command(&self, command: DeviceCommand) -> DomainResult<Option<String>>;
}
