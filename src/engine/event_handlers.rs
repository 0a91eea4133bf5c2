// src/engine/event_handlers.rs

//! Per-event decision logic for the core.

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::exec::HeartbeatCommand;
use crate::types::{FileEvent, FileEventKind};

/// What the async shell should do after a core step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Hand this heartbeat to the backend.
    SendHeartbeat(HeartbeatCommand),
    /// Stop the dispatch loop.
    RequestExit,
}

/// Result of feeding one event into the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    pub commands: Vec<CoreCommand>,
    pub keep_running: bool,
}

impl CoreStep {
    pub fn idle() -> Self {
        Self {
            commands: Vec::new(),
            keep_running: true,
        }
    }

    pub fn send(cmd: HeartbeatCommand) -> Self {
        Self {
            commands: vec![CoreCommand::SendHeartbeat(cmd)],
            keep_running: true,
        }
    }

    pub fn exit() -> Self {
        Self {
            commands: vec![CoreCommand::RequestExit],
            keep_running: false,
        }
    }
}

/// Outcome of [`handle_file_event`], for the core's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDecision {
    Dispatch,
    Ignored,
    Removed,
}

/// Decide what to do with a settled file event.
///
/// The ignore policy runs before any command is built.
pub fn handle_file_event(settings: &Settings, event: &FileEvent) -> (FileDecision, CoreStep) {
    match event.kind {
        FileEventKind::Removed => {
            info!(path = ?event.path, "file removed; no heartbeat");
            (FileDecision::Removed, CoreStep::idle())
        }
        FileEventKind::Added | FileEventKind::Changed => {
            if settings.ignore.is_ignored(&event.path) {
                debug!(path = ?event.path, kind = %event.kind, "ignored by policy");
                return (FileDecision::Ignored, CoreStep::idle());
            }

            let cmd = HeartbeatCommand::build(settings, &event.path, event.observed_at);
            info!(
                path = ?event.path,
                kind = %event.kind,
                project = %settings.project,
                "file {}; sending heartbeat",
                event.kind
            );
            (FileDecision::Dispatch, CoreStep::send(cmd))
        }
    }
}

/// Watcher errors are logged and otherwise ignored.
pub fn handle_watch_error(message: &str) -> CoreStep {
    warn!(error = %message, "file watcher error");
    CoreStep::idle()
}
