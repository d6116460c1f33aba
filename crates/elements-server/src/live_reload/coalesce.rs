//! Per-path coalescing of watcher events.
//!
//! Native watchers report one write as several raw events (a create followed
//! by a modify). Events for the same path are merged until the path has been
//! quiet for the coalesce window, so one save becomes one reload.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use tokio::time::Instant;

use super::watcher::{WatchEvent, WatchEventKind};

/// Quiet period after the last raw event before a path is reported.
pub(crate) const COALESCE_WINDOW: Duration = Duration::from_millis(50);

struct Pending {
    kind: WatchEventKind,
    deadline: Instant,
}

/// Pending events keyed by path.
pub(crate) struct Coalescer {
    window: Duration,
    pending: HashMap<PathBuf, Pending>,
}

impl Coalescer {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            pending: HashMap::new(),
        }
    }

    /// Record a raw event observed at `now`, restarting the path's window.
    pub(crate) fn record(&mut self, event: WatchEvent, now: Instant) {
        use std::collections::hash_map::Entry;

        let deadline = now + self.window;
        match self.pending.entry(event.path) {
            Entry::Vacant(entry) => {
                entry.insert(Pending {
                    kind: event.kind,
                    deadline,
                });
            }
            Entry::Occupied(mut entry) => match coalesce(entry.get().kind, event.kind) {
                Some(kind) => {
                    *entry.get_mut() = Pending { kind, deadline };
                }
                // Created and removed inside one window: nothing to report.
                None => {
                    entry.remove();
                }
            },
        }
    }

    /// Remove and return the events whose window has elapsed, oldest first.
    pub(crate) fn drain_ready(&mut self, now: Instant) -> Vec<WatchEvent> {
        let ready: Vec<PathBuf> = self
            .pending
            .iter()
            .filter(|(_, pending)| pending.deadline <= now)
            .map(|(path, _)| path.clone())
            .collect();

        let mut events: Vec<(Instant, WatchEvent)> = ready
            .into_iter()
            .filter_map(|path| {
                let pending = self.pending.remove(&path)?;
                Some((
                    pending.deadline,
                    WatchEvent {
                        kind: pending.kind,
                        path,
                    },
                ))
            })
            .collect();
        events.sort_by_key(|(deadline, _)| *deadline);
        events.into_iter().map(|(_, event)| event).collect()
    }

    /// Earliest pending deadline.
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|pending| pending.deadline).min()
    }
}

/// Merge two kinds for one path. `None` discards both.
fn coalesce(existing: WatchEventKind, new: WatchEventKind) -> Option<WatchEventKind> {
    use WatchEventKind::{Add, AddDir, Change, Unlink, UnlinkDir};

    match (existing, new) {
        (Add, Change) => Some(Add),
        (Add, Unlink) | (AddDir, UnlinkDir) => None,
        (Unlink, Add) => Some(Change),
        (Unlink, Change) => Some(Unlink),
        (_, new) => Some(new),
    }
}
