// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::exec::{HeartbeatBackend, HeartbeatCommand};

use super::core::{DispatchCore, DispatchStats};
use super::{CoreCommand, DispatchEvent};

/// Drives the [`DispatchCore`] from the watcher channel and hands heartbeats
/// to a [`HeartbeatBackend`].
///
/// This is a thin IO shell; all decisions are made by the core.
pub struct Dispatcher<B: HeartbeatBackend> {
    core: DispatchCore,
    event_rx: mpsc::Receiver<DispatchEvent>,
    backend: B,
}

impl<B: HeartbeatBackend> fmt::Debug for Dispatcher<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<B: HeartbeatBackend> Dispatcher<B> {
    pub fn new(core: DispatchCore, event_rx: mpsc::Receiver<DispatchEvent>, backend: B) -> Self {
        Self {
            core,
            event_rx,
            backend,
        }
    }

    /// Main event loop.
    ///
    /// Runs until shutdown is requested or every sender is dropped, then
    /// returns the final counters.
    pub async fn run(mut self) -> Result<DispatchStats> {
        info!(
            dir = ?self.core.settings().wiki_dir,
            project = %self.core.settings().project,
            "dispatcher running"
        );

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("dispatch channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "dispatcher received event");

            let step = self.core.step(event);
            for command in step.commands {
                self.execute_command(command).await;
            }

            if !step.keep_running {
                info!("core requested exit; stopping dispatcher");
                break;
            }
        }

        Ok(self.core.stats())
    }

    async fn execute_command(&mut self, command: CoreCommand) {
        match command {
            CoreCommand::SendHeartbeat(cmd) => self.send(cmd).await,
            CoreCommand::RequestExit => {
                debug!("core issued RequestExit command");
            }
        }
    }

    /// Best-effort: a backend failure drops this heartbeat only.
    async fn send(&mut self, cmd: HeartbeatCommand) {
        let entity = cmd.entity().to_path_buf();
        if let Err(err) = self.backend.send(cmd).await {
            warn!(path = ?entity, error = %err, "failed to hand off heartbeat");
        }
    }
}
