use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tiddlytime::errors::Result;
use tiddlytime::exec::{HeartbeatBackend, HeartbeatCommand};

/// A fake backend that records every heartbeat instead of spawning
/// `wakatime-cli`.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    sent: Arc<Mutex<Vec<HeartbeatCommand>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded commands; stays valid after the
    /// backend is moved into a dispatcher.
    pub fn handle(&self) -> Arc<Mutex<Vec<HeartbeatCommand>>> {
        Arc::clone(&self.sent)
    }

    pub fn sent(&self) -> Vec<HeartbeatCommand> {
        self.sent.lock().unwrap().clone()
    }
}

impl HeartbeatBackend for RecordingBackend {
    fn send(
        &mut self,
        cmd: HeartbeatCommand,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let sent = Arc::clone(&self.sent);
        Box::pin(async move {
            sent.lock().unwrap().push(cmd);
            Ok(())
        })
    }
}
