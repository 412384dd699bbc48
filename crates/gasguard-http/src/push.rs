use async_trait::async_trait;
use gasguard_domain::{CommandTransport, DeviceCommand, DomainError, DomainResult};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Confirmation payloads the device firmware answers with.
fn is_confirmation(message: &str) -> bool {
    message == "Device turned ON" || message == "Device turned OFF"
}

#[derive(Deserialize)]
struct DeviceControlReply {
    message: Option<String>,
}

/// Outbound-push transport: POST the command to the device's advertised
/// address and require its confirmation payload. The whole attempt is
/// bounded by the client timeout.
pub struct HttpPushTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpPushTransport {
    pub fn new(url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl CommandTransport for HttpPushTransport {
    async fn send_command(&self, command: DeviceCommand) -> DomainResult<Option<String>> {
        debug!(url = %self.url, action = command.kind.as_action(), "pushing command");

        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "action": command.kind.as_action() }))
            .send()
            .await
            .map_err(|e| DomainError::DeviceUnreachable(e.to_string()))?;

        let reply: DeviceControlReply = response
            .json()
            .await
            .map_err(|e| DomainError::DeviceUnreachable(format!("unreadable reply: {e}")))?;

        match reply.message {
            Some(message) if is_confirmation(&message) => Ok(Some(message)),
            Some(message) => Err(DomainError::DeviceUnreachable(format!(
                "non-confirming reply: {message}"
            ))),
            None => Err(DomainError::DeviceUnreachable(
                "reply carried no message".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_firmware_confirmations_accepted() {
        assert!(is_confirmation("Device turned ON"));
        assert!(is_confirmation("Device turned OFF"));
        assert!(!is_confirmation("ok"));
        assert!(!is_confirmation("Device turned on"));
        assert!(!is_confirmation(""));
    }
}
