// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Wiring up a cross-platform filesystem watcher (`notify`) on the wiki
//!   directory, top level only.
//! - Dropping hidden entries and events that aren't writes.
//! - Holding writes until the file has settled (see [`debounce`]).
//! - The basename ignore policy applied by the dispatcher.
//!
//! It does **not** build or run heartbeats; it only turns filesystem changes
//! into [`crate::engine::DispatchEvent`]s.

pub mod debounce;
pub mod event_handler;
pub mod ignore;
pub mod path_utils;
pub mod watcher;

pub use debounce::WriteDebouncer;
pub use ignore::IgnorePolicy;
pub use watcher::{pump_events, spawn_watcher, WatcherHandle};
