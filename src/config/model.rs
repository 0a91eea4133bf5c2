// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::watch::ignore::IgnorePolicy;

pub const DEFAULT_PROJECT: &str = "MyWiki";
pub const DEFAULT_CATEGORY: &str = "coding";
pub const DEFAULT_ALTERNATE_LANGUAGE: &str = "TiddlyWiki";
pub const DEFAULT_TITLE_FILE: &str = "$__SiteTitle.tid";
pub const DEFAULT_STABILITY_THRESHOLD_MS: u64 = 2000;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Optional overrides as read from a TOML file.
///
/// ```toml
/// [heartbeat]
/// category = "coding"
/// alternate_language = "TiddlyWiki"
/// project = "Lab notebook"
/// cli_path = "/opt/wakatime/wakatime-cli"
///
/// [watch]
/// title_file = "$__SiteTitle.tid"
/// ignore = ["Draft of *"]
/// stability_threshold_ms = 2000
/// poll_interval_ms = 100
/// ```
///
/// Every section and key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub heartbeat: HeartbeatSection,

    #[serde(default)]
    pub watch: WatchSection,
}

/// `[heartbeat]` section: what gets passed to `wakatime-cli`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeartbeatSection {
    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default = "default_alternate_language")]
    pub alternate_language: String,

    /// Fixed project name; when set the site title file is not read.
    #[serde(default)]
    pub project: Option<String>,

    #[serde(default)]
    pub cli_path: Option<PathBuf>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_alternate_language() -> String {
    DEFAULT_ALTERNATE_LANGUAGE.to_string()
}

impl Default for HeartbeatSection {
    fn default() -> Self {
        Self {
            category: default_category(),
            alternate_language: default_alternate_language(),
            project: None,
            cli_path: None,
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    #[serde(default = "default_title_file")]
    pub title_file: String,

    /// Extra basename globs, on top of the built-in ignore rules.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// How long a file's size/mtime must stay unchanged before a write
    /// counts as finished.
    #[serde(default = "default_stability_threshold_ms")]
    pub stability_threshold_ms: u64,

    /// How often pending writes are re-checked.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_title_file() -> String {
    DEFAULT_TITLE_FILE.to_string()
}

fn default_stability_threshold_ms() -> u64 {
    DEFAULT_STABILITY_THRESHOLD_MS
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            title_file: default_title_file(),
            ignore: Vec::new(),
            stability_threshold_ms: default_stability_threshold_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Write-finish debounce timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceSettings {
    pub stability_threshold: Duration,
    pub poll_interval: Duration,
}

impl Default for DebounceSettings {
    fn default() -> Self {
        Self {
            stability_threshold: Duration::from_millis(DEFAULT_STABILITY_THRESHOLD_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// Fully resolved, immutable runtime settings.
///
/// Built once by [`crate::config::load_settings`] before the watcher starts
/// and shared read-only (`Arc<Settings>`) afterwards.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Validated watch directory (canonicalized when possible).
    pub wiki_dir: PathBuf,
    /// Number of entries found in `wiki_dir` at startup.
    pub entry_count: usize,
    /// `wakatime-cli` executable.
    pub cli_path: PathBuf,
    pub project: String,
    pub category: String,
    pub alternate_language: String,
    pub ignore: IgnorePolicy,
    pub debounce: DebounceSettings,
}
