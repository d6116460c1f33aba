//! Registry of connected reload clients.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use uuid::Uuid;

use super::protocol::ServerMessage;

type Outbox = mpsc::UnboundedSender<ServerMessage>;

/// Set of connected reload clients.
///
/// Every registered client owns an unbounded outbox, so a notification is
/// queued for each client exactly once and never dropped for a slow reader.
#[derive(Debug, Default)]
pub struct ReloadHub {
    clients: Mutex<Clients>,
}

#[derive(Debug, Default)]
struct Clients {
    outboxes: HashMap<Uuid, Outbox>,
    /// Set by [`ReloadHub::close_all`]; later connections end immediately.
    closed: bool,
}

/// Receiving side of a registered client.
#[derive(Debug)]
pub struct Subscription {
    id: Uuid,
    receiver: mpsc::UnboundedReceiver<ServerMessage>,
}

impl Subscription {
    /// Client identifier inside the hub.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Next queued message, `None` once the hub dropped this client.
    pub async fn recv(&mut self) -> Option<ServerMessage> {
        self.receiver.recv().await
    }
}

impl ReloadHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new client.
    ///
    /// After [`close_all`](Self::close_all) the returned subscription is
    /// already ended.
    pub fn connect(&self) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        let mut clients = self.lock();
        if !clients.closed {
            clients.outboxes.insert(id, sender);
        }
        Subscription { id, receiver }
    }

    /// Remove a client. Unknown ids are ignored.
    pub fn disconnect(&self, id: Uuid) {
        self.lock().outboxes.remove(&id);
    }

    /// Queue a reload for `path` on every connected client.
    ///
    /// Clients whose receiver is gone are pruned. Returns the number of
    /// clients the message was queued for.
    pub fn notify(&self, path: &str) -> usize {
        let message = ServerMessage::reload(path);
        let mut clients = self.lock();
        clients
            .outboxes
            .retain(|_, outbox| outbox.send(message.clone()).is_ok());
        clients.outboxes.len()
    }

    /// Drop every client, which ends their socket tasks, and refuse new ones.
    pub fn close_all(&self) {
        let mut clients = self.lock();
        clients.closed = true;
        clients.outboxes.clear();
    }

    /// Number of connected clients.
    #[must_use]
    pub fn client_count(&self) -> usize {
        self.lock().outboxes.len()
    }

    fn lock(&self) -> MutexGuard<'_, Clients> {
        self.clients.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
