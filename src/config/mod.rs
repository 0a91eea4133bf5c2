// src/config/mod.rs

//! Startup configuration.
//!
//! Everything the dispatcher needs is resolved here exactly once and frozen
//! into [`Settings`]: the validated watch directory, the `wakatime-cli` path,
//! the ignore policy, the project title, and heartbeat labels.

pub mod loader;
pub mod model;
pub mod platform;
pub mod title;
pub mod validate;

pub use loader::{load_from_path, load_raw_config, load_settings};
pub use model::{
    DebounceSettings, HeartbeatSection, RawConfigFile, Settings, WatchSection,
    DEFAULT_ALTERNATE_LANGUAGE, DEFAULT_CATEGORY, DEFAULT_PROJECT,
};
pub use title::{parse_title, resolve_project_title};
pub use validate::{validate_watch_target, WatchTarget};
