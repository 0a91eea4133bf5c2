// src/engine/core.rs

//! Pure dispatch core.
//!
//! A synchronous, deterministic step function that consumes
//! [`DispatchEvent`]s and returns the commands the IO shell should run.
//! No channels, no Tokio types, no processes; it is unit tested directly.

use std::sync::Arc;

use tracing::info;

use crate::config::Settings;
use crate::engine::event_handlers::{handle_file_event, handle_watch_error, CoreStep, FileDecision};
use crate::engine::DispatchEvent;

/// Running totals, logged at shutdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub dispatched: u64,
    pub ignored: u64,
    pub removed: u64,
    pub watch_errors: u64,
}

#[derive(Debug)]
pub struct DispatchCore {
    settings: Arc<Settings>,
    stats: DispatchStats,
}

impl DispatchCore {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            settings,
            stats: DispatchStats::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Feed one event into the core.
    pub fn step(&mut self, event: DispatchEvent) -> CoreStep {
        match event {
            DispatchEvent::File(file_event) => {
                let (decision, step) = handle_file_event(&self.settings, &file_event);
                match decision {
                    FileDecision::Dispatch => self.stats.dispatched += 1,
                    FileDecision::Ignored => self.stats.ignored += 1,
                    FileDecision::Removed => self.stats.removed += 1,
                }
                step
            }
            DispatchEvent::WatchError(message) => {
                self.stats.watch_errors += 1;
                handle_watch_error(&message)
            }
            DispatchEvent::ShutdownRequested => {
                info!(
                    dispatched = self.stats.dispatched,
                    ignored = self.stats.ignored,
                    removed = self.stats.removed,
                    watch_errors = self.stats.watch_errors,
                    "shutdown requested"
                );
                CoreStep::exit()
            }
        }
    }
}
