// src/config/loader.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::model::{DebounceSettings, RawConfigFile, Settings};
use crate::config::platform::{cli_binary_name, default_cli_path};
use crate::config::title::resolve_project_title;
use crate::config::validate::{validate_raw_config, validate_watch_target};
use crate::errors::{Result, TiddlytimeError};
use crate::fs::FileSystem;
use crate::watch::ignore::IgnorePolicy;

/// Read and deserialize a TOML overrides file.
///
/// This only performs TOML deserialization; semantic checks happen in
/// [`load_raw_config`].
pub fn load_from_path(fs: &dyn FileSystem, path: &Path) -> Result<RawConfigFile> {
    let contents = fs.read_to_string(path)?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load the optional overrides file and validate it.
///
/// `None` means "no file": built-in defaults. A path that was asked for
/// explicitly but does not exist is an error.
pub fn load_raw_config(fs: &dyn FileSystem, path: Option<&Path>) -> Result<RawConfigFile> {
    let Some(path) = path else {
        return Ok(RawConfigFile::default());
    };

    if !fs.is_file(path) {
        return Err(TiddlytimeError::ConfigError(format!(
            "config file not found: {:?}",
            path
        )));
    }

    let cfg = load_from_path(fs, path)?;
    validate_raw_config(&cfg)?;
    info!(config = ?path, "loaded config overrides");
    Ok(cfg)
}

/// Build the immutable [`Settings`] for this process.
///
/// Precedence, lowest to highest: built-in defaults, TOML file, CLI flags
/// (which include `TIDDLER_PATH` / `TIDDLYTIME_CONFIG` via `clap`'s `env`).
///
/// Fails only on the fatal startup conditions: unset/missing/unreadable
/// watch directory, a bad config file, or a blank category/project.
/// The project title never fails; it falls back to a default.
pub fn load_settings(args: &CliArgs, fs: &dyn FileSystem) -> Result<Settings> {
    let raw = load_raw_config(fs, args.config.as_deref())?;

    let wiki_dir = args
        .wiki_dir
        .as_deref()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(TiddlytimeError::WatchTargetUnset)?;
    let target = validate_watch_target(fs, wiki_dir)?;

    let ignore = IgnorePolicy::with_patterns(&raw.watch.ignore)?;

    let cli_path = pick_cli_path(
        args.cli_path.clone().or(raw.heartbeat.cli_path.clone()),
        default_cli_path(),
    );
    if !fs.is_file(&cli_path) {
        warn!(
            cli = ?cli_path,
            "wakatime-cli not found; heartbeats will fail until it is installed"
        );
    }

    let project = match args.project.clone().or(raw.heartbeat.project.clone()) {
        Some(p) => {
            info!(project = %p, "using configured project name");
            p
        }
        None => resolve_project_title(fs, &target.path, &raw.watch.title_file),
    };

    let category = args
        .category
        .clone()
        .unwrap_or_else(|| raw.heartbeat.category.clone());

    require_label("category", &category)?;
    require_label("project", &project)?;

    let debounce = DebounceSettings {
        stability_threshold: Duration::from_millis(raw.watch.stability_threshold_ms),
        poll_interval: Duration::from_millis(raw.watch.poll_interval_ms),
    };

    Ok(Settings {
        wiki_dir: target.path,
        entry_count: target.entry_count,
        cli_path,
        project,
        category,
        alternate_language: raw.heartbeat.alternate_language,
        ignore,
        debounce,
    })
}

/// Explicit path if given, else the per-user install, else the bare binary
/// name so the spawn goes through `PATH`.
fn pick_cli_path(explicit: Option<PathBuf>, home_install: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    home_install.unwrap_or_else(|| {
        let name = cli_binary_name(std::env::consts::OS, std::env::consts::ARCH);
        warn!(
            binary = %name,
            "no home directory to locate wakatime-cli; falling back to PATH lookup"
        );
        PathBuf::from(name)
    })
}

/// Heartbeat labels end up as argv values; `wakatime-cli` rejects blanks.
fn require_label(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TiddlytimeError::ConfigError(format!("{name} must not be empty")));
    }
    Ok(())
}
