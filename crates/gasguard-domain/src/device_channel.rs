use crate::command::DeviceCommand;
use crate::error::{DomainError, DomainResult};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Outbound queue depth for the persistent channel. Sends never block;
/// a full queue fails the attempt instead.
pub const CHANNEL_QUEUE_DEPTH: usize = 32;

struct Attached {
    sender: mpsc::Sender<DeviceCommand>,
    generation: u64,
}

/// Holds the outbound half of the device's persistent channel, when one
/// is open.
///
/// The channel lifecycle is driven passively by the device: the
/// handshake handler attaches a sender on open and detaches it on
/// close. Attach supersedes any previous session and hands back a
/// generation token; detach only clears the reference when the token
/// still matches, so a superseded session tearing down late cannot kill
/// the live channel.
pub struct DeviceChannel {
    inner: Arc<RwLock<Option<Attached>>>,
    generations: std::sync::atomic::AtomicU64,
}

impl DeviceChannel {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            generations: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// Open a new session, superseding any previous one. Returns the
    /// generation token the session must pass back to `detach`.
    pub async fn attach(&self, sender: mpsc::Sender<DeviceCommand>) -> u64 {
        let generation = self
            .generations
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed)
            + 1;
        let mut inner = self.inner.write().await;
        if inner.is_some() {
            debug!(generation, "superseding previous device channel session");
        }
        *inner = Some(Attached { sender, generation });
        info!(generation, "device channel open");
        generation
    }

    /// Clear the held sender, but only if `generation` is still the
    /// live session. Returns whether the live channel was cleared, so a
    /// superseded session knows its close is not a device disconnect.
    pub async fn detach(&self, generation: u64) -> bool {
        let mut inner = self.inner.write().await;
        match inner.as_ref() {
            Some(attached) if attached.generation == generation => {
                *inner = None;
                info!(generation, "device channel closed");
                true
            }
            _ => {
                debug!(generation, "stale channel detach ignored");
                false
            }
        }
    }

    pub async fn is_open(&self) -> bool {
        self.inner.read().await.is_some()
    }

    /// Fire a command into the outbound queue. Fails immediately when
    /// no channel is held or the queue is full; never blocks.
    pub async fn send(&self, command: DeviceCommand) -> DomainResult<()> {
        let inner = self.inner.read().await;
        let attached = inner.as_ref().ok_or_else(|| {
            DomainError::DeviceNotConnected("no persistent channel held".to_string())
        })?;

        attached.sender.try_send(command).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                DomainError::DeviceUnreachable("channel outbound queue full".to_string())
            }
            mpsc::error::TrySendError::Closed(_) => {
                DomainError::DeviceUnreachable("channel closed by device".to_string())
            }
        })
    }
}

impl Default for DeviceChannel {
    fn default() -> Self {
        Self::new()
    }
}
