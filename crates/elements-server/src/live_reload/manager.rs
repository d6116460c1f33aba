//! Live reload manager.
//!
//! Connects the change watcher to the client hub. Raw events are coalesced per
//! path, then every coalesced change becomes one reload notification for every
//! connected client.

use std::path::Path;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::coalesce::{COALESCE_WINDOW, Coalescer};
use super::hub::ReloadHub;
use super::watcher::{ChangeWatcher, WatchMode};

/// Running watcher plus the task forwarding its events.
#[derive(Debug)]
pub(crate) struct LiveReloadManager {
    watcher: ChangeWatcher,
    task: JoinHandle<()>,
}

impl LiveReloadManager {
    /// Start watching `root` and forwarding changes to `hub`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file watcher cannot be created.
    pub(crate) fn start(
        root: &Path,
        mode: WatchMode,
        hub: Arc<ReloadHub>,
    ) -> Result<Self, notify::Error> {
        let (watcher, mut events) = ChangeWatcher::start(root, mode)?;

        let task = tokio::spawn(async move {
            let mut pending = Coalescer::new(COALESCE_WINDOW);
            loop {
                let deadline = pending.next_deadline();
                tokio::select! {
                    event = events.recv() => match event {
                        Some(event) => pending.record(event, Instant::now()),
                        None => break,
                    },
                    () = wait_until(deadline) => {
                        for event in pending.drain_ready(Instant::now()) {
                            let path = event.path.display().to_string();
                            let clients = hub.notify(&path);
                            tracing::info!(kind = event.kind.as_str(), path = %path, clients, "File changed");
                        }
                    }
                }
            }
        });

        Ok(Self { watcher, task })
    }

    /// Stop watching and forwarding.
    pub(crate) fn stop(self) {
        self.watcher.stop();
        self.task.abort();
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
