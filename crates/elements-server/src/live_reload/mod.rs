//! Live reload: file watching, client registry and the LiveReload socket.

mod coalesce;
mod hub;
mod manager;
mod protocol;
mod watcher;
mod websocket;

pub use hub::{ReloadHub, Subscription};
pub(crate) use manager::LiveReloadManager;
pub use protocol::{PROTOCOLS, SERVER_NAME, ServerMessage};
pub use watcher::{ChangeWatcher, POLL_INTERVAL, WatchEvent, WatchEventKind, WatchEvents, WatchMode};
pub(crate) use websocket::upgrade;
