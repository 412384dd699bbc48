use serde::{Deserialize, Serialize};

/// Buzzer action relayed to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKind {
    BuzzerOn,
    BuzzerOff,
}

impl CommandKind {
    /// Wire form understood by the device firmware.
    pub fn as_action(&self) -> &'static str {
        match self {
            CommandKind::BuzzerOn => "ON",
            CommandKind::BuzzerOff => "OFF",
        }
    }

    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "ON" => Some(CommandKind::BuzzerOn),
            "OFF" => Some(CommandKind::BuzzerOff),
            _ => None,
        }
    }
}

/// Who issued the command: an operator pressing a button, or the
/// service reacting to a threshold crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandMode {
    Manual,
    Auto,
}

/// One command for one relay attempt. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCommand {
    pub kind: CommandKind,
    pub mode: CommandMode,
}

/// Input for relaying a command to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayCommandInput {
    pub kind: CommandKind,
    pub mode: CommandMode,
}

/// Which transport carried a delivered command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    PersistentChannel,
    OutboundPush,
}

/// Synchronous outcome of a successful relay attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReceipt {
    pub transport: TransportKind,
    /// Confirmation payload from the device, when the transport has one
    /// (outbound push); channel sends are fire-and-forget.
    pub device_reply: Option<String>,
}

/// Last command issued per mode, so a status query can report both
/// without conflating who issued the last command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStates {
    pub manual: CommandKind,
    pub auto: CommandKind,
}

impl Default for CommandStates {
    fn default() -> Self {
        Self {
            manual: CommandKind::BuzzerOff,
            auto: CommandKind::BuzzerOff,
        }
    }
}
