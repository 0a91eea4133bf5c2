// src/watch/debounce.rs

//! Write-finish debouncing.
//!
//! Editors and the TiddlyWiki server write a tiddler in several syscalls, and
//! a save usually touches the file more than once. A path is held here until
//! its size and modification time have stopped changing for
//! `stability_threshold`, then released as a single event.
//!
//! This is a synchronous state machine with no timers of its own: the
//! watcher task calls [`WriteDebouncer::poll`] every `poll_interval` with the
//! current time and a stat function.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, trace};

use crate::config::DebounceSettings;
use crate::types::{FileEvent, FileEventKind, FileStamp};

#[derive(Debug)]
struct PendingWrite {
    kind: FileEventKind,
    last_stamp: Option<FileStamp>,
    stable_since: Instant,
}

#[derive(Debug)]
pub struct WriteDebouncer {
    settings: DebounceSettings,
    pending: HashMap<PathBuf, PendingWrite>,
}

impl WriteDebouncer {
    pub fn new(settings: DebounceSettings) -> Self {
        Self {
            settings,
            pending: HashMap::new(),
        }
    }

    /// Note a write to `path`. Restarts its quiescence window.
    ///
    /// An add followed by changes is still reported as an add.
    pub fn record(&mut self, path: PathBuf, kind: FileEventKind, now: Instant) {
        match self.pending.get_mut(&path) {
            Some(pending) => {
                trace!(?path, %kind, "write while pending; restarting window");
                if kind == FileEventKind::Added {
                    pending.kind = FileEventKind::Added;
                }
                pending.stable_since = now;
            }
            None => {
                debug!(?path, %kind, "write pending");
                self.pending.insert(
                    path,
                    PendingWrite {
                        kind,
                        last_stamp: None,
                        stable_since: now,
                    },
                );
            }
        }
    }

    /// Drop a pending write, e.g. because the file was removed.
    pub fn cancel(&mut self, path: &Path) -> bool {
        self.pending.remove(path).is_some()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Re-check every pending path and release those that have settled.
    ///
    /// `stat` returns `None` when the path is gone or is not a regular file;
    /// such entries are dropped without an event.
    pub fn poll<F>(&mut self, now: Instant, mut stat: F) -> Vec<FileEvent>
    where
        F: FnMut(&Path) -> Option<FileStamp>,
    {
        let threshold = self.settings.stability_threshold;
        let mut settled = Vec::new();
        let mut vanished = Vec::new();

        for (path, pending) in self.pending.iter_mut() {
            match stat(path) {
                None => vanished.push(path.clone()),
                Some(stamp) if pending.last_stamp != Some(stamp) => {
                    pending.last_stamp = Some(stamp);
                    pending.stable_since = now;
                }
                Some(_) => {
                    if now.saturating_duration_since(pending.stable_since) >= threshold {
                        settled.push(path.clone());
                    }
                }
            }
        }

        for path in vanished {
            debug!(?path, "pending write vanished before settling; dropping");
            self.pending.remove(&path);
        }

        settled.sort();
        settled
            .into_iter()
            .filter_map(|path| {
                let pending = self.pending.remove(&path)?;
                Some(FileEvent::new(path, pending.kind))
            })
            .collect()
    }
}
