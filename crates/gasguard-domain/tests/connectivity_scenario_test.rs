//! End-to-end scenario across the tracker, channel, and relay:
//! the device connects, drops, reconnects, and the operator's buzzer
//! commands only go through while a transport is live.

use gasguard_domain::{
    CommandKind, CommandMode, CommandRelay, ConnectivityStatus, ConnectivityTracker,
    DeviceChannel, DomainError, InMemoryConnectivityStore, RelayCommandInput, TransportKind,
};
use std::sync::Arc;
use tokio::sync::mpsc;

fn buzzer_on() -> RelayCommandInput {
    RelayCommandInput {
        kind: CommandKind::BuzzerOn,
        mode: CommandMode::Manual,
    }
}

#[tokio::test]
async fn test_reconnect_cycle_with_command_relay() {
    let tracker = ConnectivityTracker::new(Arc::new(InMemoryConnectivityStore::new()));
    let channel = Arc::new(DeviceChannel::new());
    let relay = CommandRelay::new(channel.clone(), None);

    // Device comes up: first connect, channel opens.
    let transition = tracker.connect().await.unwrap();
    assert_eq!(transition.connection_count, 1);
    let (tx, mut rx) = mpsc::channel(8);
    let generation = channel.attach(tx).await;

    // Device drops: channel closes, tracker observes the disconnect.
    channel.detach(generation).await;
    drop(rx);
    assert!(tracker.disconnect().await.unwrap().transitioned);

    // Operator sends buzzer-ON while the device is offline.
    let result = relay.relay(buzzer_on()).await;
    assert!(matches!(result, Err(DomainError::DeviceNotConnected(_))));

    // Device reconnects: the counter moves exactly once.
    let transition = tracker.connect().await.unwrap();
    assert!(transition.transitioned);
    assert_eq!(transition.connection_count, 2);
    let (tx, mut rx) = mpsc::channel(8);
    channel.attach(tx).await;

    // Same command now goes through over the channel.
    let receipt = relay.relay(buzzer_on()).await.unwrap();
    assert_eq!(receipt.transport, TransportKind::PersistentChannel);
    assert_eq!(rx.recv().await.unwrap().kind, CommandKind::BuzzerOn);

    let snapshot = tracker.status().await.unwrap();
    assert_eq!(snapshot.status, ConnectivityStatus::Connected);
    assert_eq!(snapshot.connection_count, 2);
}

#[tokio::test]
async fn test_redundant_signals_across_sessions_do_not_inflate_counter() {
    let tracker = ConnectivityTracker::new(Arc::new(InMemoryConnectivityStore::new()));

    // App switch and channel handshake may both signal connect.
    tracker.connect().await.unwrap();
    tracker.connect().await.unwrap();
    tracker.disconnect().await.unwrap();
    tracker.disconnect().await.unwrap();
    tracker.connect().await.unwrap();

    assert_eq!(tracker.status().await.unwrap().connection_count, 2);
}
