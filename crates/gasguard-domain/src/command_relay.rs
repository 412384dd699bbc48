use crate::command::{
    CommandMode, CommandReceipt, CommandStates, DeviceCommand, RelayCommandInput, TransportKind,
};
use crate::device_channel::DeviceChannel;
use crate::error::{DomainError, DomainResult};
use crate::transport::CommandTransport;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Relays operator commands to the device over whichever transport is
/// currently available.
///
/// One interface, two transports: the device-initiated persistent
/// channel is preferred when open; otherwise the command is pushed to
/// the device's advertised address, when one is configured. Each call
/// is a single best-effort attempt — nothing is queued or retried, and
/// the outcome is reported synchronously.
pub struct CommandRelay {
    channel: Arc<DeviceChannel>,
    push: Option<Arc<dyn CommandTransport>>,
    states: RwLock<CommandStates>,
}

impl CommandRelay {
    pub fn new(channel: Arc<DeviceChannel>, push: Option<Arc<dyn CommandTransport>>) -> Self {
        Self {
            channel,
            push,
            states: RwLock::new(CommandStates::default()),
        }
    }

    /// Relay one command. The issued state is recorded before the
    /// delivery attempt so a polling device can catch up on commands
    /// issued while it was offline.
    pub async fn relay(&self, input: RelayCommandInput) -> DomainResult<CommandReceipt> {
        let command = DeviceCommand {
            kind: input.kind,
            mode: input.mode,
        };

        {
            let mut states = self.states.write().await;
            match command.mode {
                CommandMode::Manual => states.manual = command.kind,
                CommandMode::Auto => states.auto = command.kind,
            }
        }

        if self.channel.is_open().await {
            match self.channel.send(command).await {
                Ok(()) => {
                    info!(action = command.kind.as_action(), "command sent over persistent channel");
                    return Ok(CommandReceipt {
                        transport: TransportKind::PersistentChannel,
                        device_reply: None,
                    });
                }
                Err(e) => {
                    // The channel died between the check and the send;
                    // fall through to the push path.
                    warn!(error = %e, "persistent channel send failed");
                }
            }
        }

        match &self.push {
            Some(push) => {
                debug!(action = command.kind.as_action(), "pushing command to device address");
                let device_reply = push.send_command(command).await?;
                info!(action = command.kind.as_action(), "command delivered via outbound push");
                Ok(CommandReceipt {
                    transport: TransportKind::OutboundPush,
                    device_reply,
                })
            }
            None => Err(DomainError::DeviceNotConnected(
                "no channel held and no device address configured".to_string(),
            )),
        }
    }

    /// Last command issued per mode; defaults to buzzer-off for both.
    pub async fn last_states(&self) -> CommandStates {
        *self.states.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandKind;
    use crate::device_channel::CHANNEL_QUEUE_DEPTH;
    use crate::transport::MockCommandTransport;
    use tokio::sync::mpsc;

    fn input(kind: CommandKind, mode: CommandMode) -> RelayCommandInput {
        RelayCommandInput { kind, mode }
    }

    #[tokio::test]
    async fn test_relay_with_no_transport_fails_immediately() {
        let relay = CommandRelay::new(Arc::new(DeviceChannel::new()), None);
        let result = relay
            .relay(input(CommandKind::BuzzerOn, CommandMode::Manual))
            .await;
        assert!(matches!(result, Err(DomainError::DeviceNotConnected(_))));
    }

    #[tokio::test]
    async fn test_relay_prefers_open_channel() {
        let channel = Arc::new(DeviceChannel::new());
        let (tx, mut rx) = mpsc::channel(CHANNEL_QUEUE_DEPTH);
        channel.attach(tx).await;

        // Push configured but must not be used.
        let mut push = MockCommandTransport::new();
        push.expect_send_command().times(0);

        let relay = CommandRelay::new(channel, Some(Arc::new(push)));
        let receipt = relay
            .relay(input(CommandKind::BuzzerOn, CommandMode::Manual))
            .await
            .unwrap();

        assert_eq!(receipt.transport, TransportKind::PersistentChannel);
        assert_eq!(receipt.device_reply, None);
        assert_eq!(rx.recv().await.unwrap().kind, CommandKind::BuzzerOn);
    }

    #[tokio::test]
    async fn test_relay_falls_back_to_push_when_no_channel() {
        let mut push = MockCommandTransport::new();
        push.expect_send_command()
            .times(1)
            .return_once(|_| Ok(Some("Device turned ON".to_string())));

        let relay = CommandRelay::new(Arc::new(DeviceChannel::new()), Some(Arc::new(push)));
        let receipt = relay
            .relay(input(CommandKind::BuzzerOn, CommandMode::Manual))
            .await
            .unwrap();

        assert_eq!(receipt.transport, TransportKind::OutboundPush);
        assert_eq!(receipt.device_reply.as_deref(), Some("Device turned ON"));
    }

    #[tokio::test]
    async fn test_push_failure_surfaces_as_unreachable() {
        let mut push = MockCommandTransport::new();
        push.expect_send_command()
            .times(1)
            .return_once(|_| Err(DomainError::DeviceUnreachable("timeout".to_string())));

        let relay = CommandRelay::new(Arc::new(DeviceChannel::new()), Some(Arc::new(push)));
        let result = relay
            .relay(input(CommandKind::BuzzerOff, CommandMode::Manual))
            .await;
        assert!(matches!(result, Err(DomainError::DeviceUnreachable(_))));
    }

    #[tokio::test]
    async fn test_dead_channel_falls_back_to_push() {
        let channel = Arc::new(DeviceChannel::new());
        let (tx, rx) = mpsc::channel(CHANNEL_QUEUE_DEPTH);
        channel.attach(tx).await;
        drop(rx); // device went away without a close frame

        let mut push = MockCommandTransport::new();
        push.expect_send_command()
            .times(1)
            .return_once(|_| Ok(Some("Device turned OFF".to_string())));

        let relay = CommandRelay::new(channel, Some(Arc::new(push)));
        let receipt = relay
            .relay(input(CommandKind::BuzzerOff, CommandMode::Manual))
            .await
            .unwrap();
        assert_eq!(receipt.transport, TransportKind::OutboundPush);
    }

    #[tokio::test]
    async fn test_manual_and_auto_states_are_independent() {
        let channel = Arc::new(DeviceChannel::new());
        let (tx, _rx) = mpsc::channel(CHANNEL_QUEUE_DEPTH);
        channel.attach(tx).await;
        let relay = CommandRelay::new(channel, None);

        relay
            .relay(input(CommandKind::BuzzerOn, CommandMode::Manual))
            .await
            .unwrap();
        relay
            .relay(input(CommandKind::BuzzerOff, CommandMode::Auto))
            .await
            .unwrap();

        let states = relay.last_states().await;
        assert_eq!(states.manual, CommandKind::BuzzerOn);
        assert_eq!(states.auto, CommandKind::BuzzerOff);
    }

    #[tokio::test]
    async fn test_issued_state_recorded_even_when_delivery_fails() {
        let relay = CommandRelay::new(Arc::new(DeviceChannel::new()), None);
        let _ = relay
            .relay(input(CommandKind::BuzzerOn, CommandMode::Manual))
            .await;

        // The device polls for the issued state later; it must see the
        // command even though the live delivery failed.
        assert_eq!(relay.last_states().await.manual, CommandKind::BuzzerOn);
    }
}
