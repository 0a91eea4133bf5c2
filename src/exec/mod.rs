// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`heartbeat`] builds the `wakatime-cli` argument list.
//! - [`runner`] spawns one process with `tokio::process::Command`, captures
//!   its output and logs the outcome.
//! - [`backend`] provides the `HeartbeatBackend` trait and the production
//!   `ProcessBackend`, which tests replace with a recording fake.

pub mod backend;
pub mod heartbeat;
pub mod runner;

pub use backend::{HeartbeatBackend, ProcessBackend};
pub use heartbeat::HeartbeatCommand;
pub use runner::{run_heartbeat, HeartbeatOutcome};
