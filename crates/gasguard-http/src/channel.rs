use crate::context::AppContext;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use gasguard_domain::device_channel::CHANNEL_QUEUE_DEPTH;
use gasguard_domain::DeviceCommand;
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Handshake for the device's persistent channel.
///
/// The device opens the socket; while it stays open, relayed commands
/// flow out as JSON text frames. The tracker observes the open as a
/// connect and the close as a disconnect, and the channel reference is
/// cleared on close so the relay never writes into a dead session.
pub async fn device_channel_handler(
    State(ctx): State<AppContext>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| channel_session(ctx, socket))
}

async fn channel_session(ctx: AppContext, socket: WebSocket) {
    let (outbound_tx, mut outbound_rx) = mpsc::channel::<DeviceCommand>(CHANNEL_QUEUE_DEPTH);
    let generation = ctx.channel.attach(outbound_tx).await;

    if let Err(e) = ctx.tracker.connect().await {
        warn!(error = %e, "could not record channel connect");
    }

    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            command = outbound_rx.recv() => {
                match command {
                    Some(command) => {
                        let frame = json!({ "action": command.kind.as_action() }).to_string();
                        if let Err(e) = sink.send(Message::Text(frame)).await {
                            debug!(error = %e, "channel write failed, closing session");
                            break;
                        }
                    }
                    // Sender side replaced by a newer session.
                    None => break,
                }
            }
            inbound = stream.next() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(frame)) => {
                        // Heartbeats and device chatter are observed,
                        // not acted on.
                        debug!(?frame, "inbound channel frame");
                    }
                    Some(Err(e)) => {
                        debug!(error = %e, "channel read failed, closing session");
                        break;
                    }
                }
            }
        }
    }

    // A superseded session's close is not a device disconnect; only the
    // session that still held the live channel reports one.
    if ctx.channel.detach(generation).await {
        if let Err(e) = ctx.tracker.disconnect().await {
            warn!(error = %e, "could not record channel disconnect");
        }
    }
}
