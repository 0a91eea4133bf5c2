// src/watch/watcher.rs

use std::path::PathBuf;
use std::sync::Arc;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::{DebounceSettings, Settings};
use crate::engine::DispatchEvent;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::types::{FileEvent, FileEventKind};
use crate::watch::debounce::WriteDebouncer;
use crate::watch::event_handler::classify_event;

/// Handle for the filesystem watcher.
///
/// Keeps the underlying `RecommendedWatcher` alive; dropping it stops file
/// watching and ends the event pump.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
    pump: JoinHandle<()>,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

impl Drop for WatcherHandle {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

/// Start watching `settings.wiki_dir` (top level only) and feed settled
/// file events into `dispatch_tx`.
pub fn spawn_watcher(
    settings: Arc<Settings>,
    fs: Arc<dyn FileSystem>,
    dispatch_tx: mpsc::Sender<DispatchEvent>,
) -> Result<WatcherHandle> {
    let root = settings.wiki_dir.clone();

    // Channel from the blocking notify callback into the async world.
    let (raw_tx, raw_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            if let Err(err) = raw_tx.send(res) {
                // The pump is gone; tracing may already be torn down.
                eprintln!("tiddlytime: failed to forward notify event: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::NonRecursive)?;

    info!(
        dir = ?root,
        stability_ms = settings.debounce.stability_threshold.as_millis() as u64,
        poll_ms = settings.debounce.poll_interval.as_millis() as u64,
        "file watcher started"
    );

    let pump = tokio::spawn(pump_events(
        root,
        settings.debounce,
        fs,
        raw_rx,
        dispatch_tx,
    ));

    Ok(WatcherHandle {
        _inner: watcher,
        pump,
    })
}

/// Event pump: classifies raw notify events, holds writes in the debouncer,
/// and forwards settled events.
///
/// Split out from [`spawn_watcher`] so tests can drive it with synthetic
/// events and a mock filesystem.
pub async fn pump_events(
    root: PathBuf,
    debounce: DebounceSettings,
    fs: Arc<dyn FileSystem>,
    mut raw_rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
    dispatch_tx: mpsc::Sender<DispatchEvent>,
) {
    let mut debouncer = WriteDebouncer::new(debounce);
    let mut ticker = tokio::time::interval(debounce.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            maybe = raw_rx.recv() => {
                let Some(res) = maybe else {
                    debug!("notify channel closed; watcher pump finished");
                    break;
                };

                let forward = match res {
                    Ok(event) => {
                        debug!(?event, "received notify event");
                        on_notify_event(&root, &event, fs.as_ref(), &mut debouncer)
                    }
                    Err(err) => vec![DispatchEvent::WatchError(err.to_string())],
                };

                for ev in forward {
                    if dispatch_tx.send(ev).await.is_err() {
                        warn!("dispatcher channel closed; stopping watcher pump");
                        return;
                    }
                }
            }

            _ = ticker.tick() => {
                if debouncer.is_idle() {
                    continue;
                }
                let now = Instant::now().into_std();
                let settled = debouncer.poll(now, |path| {
                    if fs.is_file(path) {
                        fs.stat(path).ok()
                    } else {
                        None
                    }
                });

                for event in settled {
                    debug!(path = ?event.path, kind = %event.kind, "write settled");
                    if dispatch_tx.send(DispatchEvent::File(event)).await.is_err() {
                        warn!("dispatcher channel closed; stopping watcher pump");
                        return;
                    }
                }
            }
        }
    }
}

/// Adds and changes go into the debouncer; removals bypass it and cancel any
/// pending write for the same path.
fn on_notify_event(
    root: &std::path::Path,
    event: &Event,
    fs: &dyn FileSystem,
    debouncer: &mut WriteDebouncer,
) -> Vec<DispatchEvent> {
    let now = Instant::now().into_std();
    let mut forward = Vec::new();

    for (path, kind) in classify_event(root, event, |p| fs.exists(p)) {
        match kind {
            FileEventKind::Removed => {
                if debouncer.cancel(&path) {
                    debug!(?path, "removed while a write was pending");
                }
                forward.push(DispatchEvent::File(FileEvent::new(path, kind)));
            }
            FileEventKind::Added | FileEventKind::Changed => {
                debouncer.record(path, kind, now);
            }
        }
    }

    forward
}
