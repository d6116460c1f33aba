//! LiveReload WebSocket handler.
//!
//! Each connection registers with the [`ReloadHub`], answers `hello`
//! handshakes and forwards queued reload messages until either side closes.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;

use super::hub::ReloadHub;
use super::protocol::{self, ServerMessage};

/// Accept a WebSocket upgrade and attach the connection to `hub`.
pub(crate) fn upgrade(ws: WebSocketUpgrade, hub: Arc<ReloadHub>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

/// Handle an established WebSocket connection.
async fn handle_socket(mut socket: WebSocket, hub: Arc<ReloadHub>) {
    let mut subscription = hub.connect();
    let id = subscription.id();
    tracing::debug!(client = %id, "Live reload client connected");

    loop {
        tokio::select! {
            // Forward reload messages to the client
            queued = subscription.recv() => {
                let Some(message) = queued else {
                    // Hub dropped this client (server shutdown)
                    let _ = socket.send(Message::Close(None)).await;
                    break;
                };
                if send(&mut socket, &message).await.is_err() {
                    break;
                }
            }
            // Handle client messages
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    if let Some(reply) = protocol::reply_to(text.as_str())
                        && send(&mut socket, &reply).await.is_err()
                    {
                        break;
                    }
                }
                Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                Some(Ok(_)) => {}
            }
        }
    }

    hub.disconnect(id);
    tracing::debug!(client = %id, "Live reload client disconnected");
}

async fn send(socket: &mut WebSocket, message: &ServerMessage) -> Result<(), axum::Error> {
    let text = serde_json::to_string(message).map_err(axum::Error::new)?;
    socket.send(Message::Text(text.into())).await
}
