// src/exec/runner.rs

//! Running a single heartbeat process and logging how it went.

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::exec::heartbeat::HeartbeatCommand;

/// How a `wakatime-cli` run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeartbeatOutcome {
    /// Exit 0 and nothing on stderr.
    Sent { stdout: String },
    /// Exit 0, but the CLI complained on stderr.
    SentWithWarnings { stdout: String, stderr: String },
    /// Non-zero exit (or killed by a signal, `code = None`).
    Failed { code: Option<i32>, stderr: String },
}

/// Spawn the heartbeat process and wait for it to exit.
///
/// `Err` means the process could not be started at all. There is no timeout:
/// a hung CLI is waited on forever.
pub async fn run_heartbeat(cmd: &HeartbeatCommand) -> Result<HeartbeatOutcome> {
    debug!(command = %cmd, "spawning heartbeat");

    let output = Command::new(cmd.program())
        .args(cmd.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .with_context(|| format!("spawning {:?}", cmd.program()))?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    let outcome = if !output.status.success() {
        HeartbeatOutcome::Failed {
            code: output.status.code(),
            stderr,
        }
    } else if !stderr.is_empty() {
        HeartbeatOutcome::SentWithWarnings { stdout, stderr }
    } else {
        HeartbeatOutcome::Sent { stdout }
    };

    Ok(outcome)
}

/// Run a heartbeat and log the result. Never fails; nothing is retried.
pub async fn run_and_log(cmd: HeartbeatCommand) {
    let entity = cmd.entity().display().to_string();

    match run_heartbeat(&cmd).await {
        Ok(HeartbeatOutcome::Sent { stdout }) => {
            info!(path = %entity, output = %stdout, "heartbeat sent");
        }
        Ok(HeartbeatOutcome::SentWithWarnings { stdout, stderr }) => {
            warn!(path = %entity, output = %stdout, stderr = %stderr, "heartbeat sent with warnings");
        }
        Ok(HeartbeatOutcome::Failed { code, stderr }) => {
            error!(path = %entity, exit_code = ?code, stderr = %stderr, "heartbeat failed");
        }
        Err(err) => {
            let reason = format!("{err:#}");
            error!(path = %entity, error = %reason, "could not run wakatime-cli");
        }
    }
}
