// src/exec/backend.rs

//! Pluggable heartbeat backend.
//!
//! The dispatcher talks to a `HeartbeatBackend` instead of spawning
//! processes itself, so tests can swap in a backend that records commands.
//!
//! - [`ProcessBackend`] is the production implementation: every heartbeat
//!   runs on its own detached tokio task.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::errors::Result;
use crate::exec::heartbeat::HeartbeatCommand;
use crate::exec::runner::run_and_log;

/// Trait abstracting how heartbeats are delivered.
pub trait HeartbeatBackend: Send {
    /// Hand off one heartbeat. Implementations must not wait for the
    /// external process to finish.
    fn send(
        &mut self,
        cmd: HeartbeatCommand,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Fire-and-forget process spawner.
///
/// Spawns are not queued, bounded or ordered; two heartbeats for the same
/// file may run concurrently.
#[derive(Debug, Default, Clone)]
pub struct ProcessBackend;

impl ProcessBackend {
    pub fn new() -> Self {
        Self
    }
}

impl HeartbeatBackend for ProcessBackend {
    fn send(
        &mut self,
        cmd: HeartbeatCommand,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            debug!(path = ?cmd.entity(), "detaching heartbeat process");
            // Detached: the JoinHandle is dropped on purpose.
            tokio::spawn(run_and_log(cmd));
            Ok(())
        })
    }
}
