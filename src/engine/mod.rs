// src/engine/mod.rs

//! Dispatch engine.
//!
//! The pure decision step lives in [`core`]: given a [`DispatchEvent`] it
//! decides whether a heartbeat should be sent and builds the command. The
//! async shell in [`runtime`] reads events from the watcher channel and hands
//! commands to a [`crate::exec::HeartbeatBackend`].

use crate::types::FileEvent;

/// Events flowing into the dispatcher from the watcher and signal handlers.
#[derive(Debug, Clone)]
pub enum DispatchEvent {
    /// A settled add/change, or a removal.
    File(FileEvent),
    /// The watcher backend reported an error. Logged, never fatal.
    WatchError(String),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod event_handlers;
pub mod runtime;

pub use self::core::{DispatchCore, DispatchStats};
pub use event_handlers::{CoreCommand, CoreStep};
pub use runtime::Dispatcher;
