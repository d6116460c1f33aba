//! Filesystem change watcher.
//!
//! Wraps a `notify` watcher (native or polling) and translates its raw events
//! into [`WatchEvent`]s delivered on an async channel. Files that exist when
//! watching starts produce no events.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

/// Poll interval used when polling is requested.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Kind of filesystem change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchEventKind {
    Add,
    AddDir,
    Change,
    Unlink,
    UnlinkDir,
}

impl WatchEventKind {
    /// Event name as used in log output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::AddDir => "addDir",
            Self::Change => "change",
            Self::Unlink => "unlink",
            Self::UnlinkDir => "unlinkDir",
        }
    }
}

/// One filesystem change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatchEvent {
    pub kind: WatchEventKind,
    pub path: PathBuf,
}

/// How changes are detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchMode {
    /// Platform notification API.
    Native,
    /// Periodic metadata polling.
    Poll(Duration),
}

impl WatchMode {
    /// Polling at [`POLL_INTERVAL`] when `poll` is set, native otherwise.
    #[must_use]
    pub fn new(poll: bool) -> Self {
        if poll {
            Self::Poll(POLL_INTERVAL)
        } else {
            Self::Native
        }
    }
}

/// Receiving side of a [`ChangeWatcher`].
#[derive(Debug)]
pub struct WatchEvents {
    receiver: mpsc::UnboundedReceiver<WatchEvent>,
}

impl WatchEvents {
    /// Next change, `None` once the watcher is stopped.
    pub async fn recv(&mut self) -> Option<WatchEvent> {
        self.receiver.recv().await
    }
}

/// Active watch on a file or directory tree.
pub struct ChangeWatcher {
    watcher: Box<dyn Watcher + Send>,
}

impl std::fmt::Debug for ChangeWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeWatcher").finish_non_exhaustive()
    }
}

impl ChangeWatcher {
    /// Start watching `root`.
    ///
    /// Directories are watched recursively.
    ///
    /// # Errors
    ///
    /// Returns an error if the watcher cannot be created or `root` cannot be watched.
    pub fn start(root: &Path, mode: WatchMode) -> Result<(Self, WatchEvents), notify::Error> {
        let (sender, receiver) = mpsc::unbounded_channel();

        let handler = move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                for change in translate(event) {
                    if sender.send(change).is_err() {
                        return;
                    }
                }
            }
            Err(err) => tracing::warn!(error = %err, "File watcher error"),
        };

        let mut watcher: Box<dyn Watcher + Send> = match mode {
            WatchMode::Native => Box::new(notify::recommended_watcher(handler)?),
            WatchMode::Poll(interval) => Box::new(PollWatcher::new(
                handler,
                notify::Config::default().with_poll_interval(interval),
            )?),
        };

        let recursive = if root.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher.watch(root, recursive)?;

        Ok((Self { watcher }, WatchEvents { receiver }))
    }

    /// Stop watching. Pending events already queued are still delivered.
    pub fn stop(self) {
        drop(self.watcher);
    }
}

/// Translate a raw notify event into zero or more changes.
///
/// Access events carry no change and are dropped. A rename is reported as the
/// removal of the old path followed by the addition of the new one.
fn translate(event: Event) -> Vec<WatchEvent> {
    let Event { kind, paths, .. } = event;

    let added = |path: PathBuf| {
        let kind = if path.is_dir() {
            WatchEventKind::AddDir
        } else {
            WatchEventKind::Add
        };
        WatchEvent { kind, path }
    };
    let removed = |path: PathBuf| WatchEvent {
        kind: WatchEventKind::Unlink,
        path,
    };

    match kind {
        EventKind::Create(CreateKind::Folder) => with_kind(paths, WatchEventKind::AddDir),
        EventKind::Create(_) => paths.into_iter().map(added).collect(),
        EventKind::Remove(RemoveKind::Folder) => with_kind(paths, WatchEventKind::UnlinkDir),
        EventKind::Remove(_) => with_kind(paths, WatchEventKind::Unlink),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
            paths.into_iter().map(removed).collect()
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
            paths.into_iter().map(added).collect()
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            let mut paths = paths.into_iter();
            let from = paths.next().map(removed);
            let to = paths.next().map(added);
            from.into_iter().chain(to).collect()
        }
        EventKind::Modify(ModifyKind::Name(_)) => paths
            .into_iter()
            .map(|path| if path.exists() { added(path) } else { removed(path) })
            .collect(),
        EventKind::Modify(_) => with_kind(paths, WatchEventKind::Change),
        EventKind::Access(_) | EventKind::Any | EventKind::Other => Vec::new(),
    }
}

fn with_kind(paths: Vec<PathBuf>, kind: WatchEventKind) -> Vec<WatchEvent> {
    paths
        .into_iter()
        .map(|path| WatchEvent { kind, path })
        .collect()
}
