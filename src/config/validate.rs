// src/config/validate.rs

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::model::RawConfigFile;
use crate::errors::{Result, TiddlytimeError};
use crate::fs::FileSystem;

/// The watch directory after startup checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub path: PathBuf,
    pub entry_count: usize,
}

/// Confirm the watch directory exists, is a directory, and can be listed.
///
/// The listing is only used for a diagnostic entry count. Every failure here
/// is fatal to startup.
pub fn validate_watch_target(fs: &dyn FileSystem, path: &Path) -> Result<WatchTarget> {
    if !fs.exists(path) {
        return Err(TiddlytimeError::WatchTargetMissing(path.to_path_buf()));
    }
    if !fs.is_dir(path) {
        return Err(TiddlytimeError::WatchTargetNotDir(path.to_path_buf()));
    }

    let path = match fs.canonicalize(path) {
        Ok(canon) => canon,
        Err(err) => {
            debug!(?path, error = %err, "could not canonicalize watch directory; using as given");
            path.to_path_buf()
        }
    };

    let entries = fs
        .list_dir(&path)
        .map_err(|err| TiddlytimeError::WatchTargetUnreadable {
            path: path.clone(),
            reason: format!("{err:#}"),
        })?;

    info!(dir = ?path, entries = entries.len(), "watch directory validated");

    Ok(WatchTarget {
        path,
        entry_count: entries.len(),
    })
}

/// Semantic checks on the optional TOML overrides.
pub fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_heartbeat(cfg)?;
    validate_watch(cfg)?;
    Ok(())
}

fn validate_heartbeat(cfg: &RawConfigFile) -> Result<()> {
    if cfg.heartbeat.category.trim().is_empty() {
        return Err(TiddlytimeError::ConfigError(
            "[heartbeat].category must not be empty".to_string(),
        ));
    }
    if let Some(project) = &cfg.heartbeat.project {
        if project.trim().is_empty() {
            return Err(TiddlytimeError::ConfigError(
                "[heartbeat].project must not be empty when set".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_watch(cfg: &RawConfigFile) -> Result<()> {
    let watch = &cfg.watch;

    if watch.poll_interval_ms == 0 {
        return Err(TiddlytimeError::ConfigError(
            "[watch].poll_interval_ms must be >= 1 (got 0)".to_string(),
        ));
    }
    if watch.stability_threshold_ms < watch.poll_interval_ms {
        return Err(TiddlytimeError::ConfigError(format!(
            "[watch].stability_threshold_ms ({}) must be >= poll_interval_ms ({})",
            watch.stability_threshold_ms, watch.poll_interval_ms
        )));
    }
    if watch.title_file.trim().is_empty() {
        return Err(TiddlytimeError::ConfigError(
            "[watch].title_file must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn counts_entries() {
        let fs = MockFileSystem::new();
        fs.add_file("/wiki/Note.tid", "x");
        fs.add_file("/wiki/$__StoryList.tid", "y");
        let target = validate_watch_target(&fs, Path::new("/wiki")).unwrap();
        assert_eq!(target.path, PathBuf::from("/wiki"));
        assert_eq!(target.entry_count, 2);
    }

    #[test]
    fn missing_dir() {
        let fs = MockFileSystem::new();
        let err = validate_watch_target(&fs, Path::new("/nope")).unwrap_err();
        assert!(matches!(err, TiddlytimeError::WatchTargetMissing(_)));
    }

    #[test]
    fn file_is_not_a_dir() {
        let fs = MockFileSystem::new();
        fs.add_file("/wiki.tid", "x");
        let err = validate_watch_target(&fs, Path::new("/wiki.tid")).unwrap_err();
        assert!(matches!(err, TiddlytimeError::WatchTargetNotDir(_)));
    }

    #[test]
    fn unreadable_dir() {
        let fs = MockFileSystem::new();
        fs.add_dir("/wiki");
        fs.deny_read("/wiki");
        let err = validate_watch_target(&fs, Path::new("/wiki")).unwrap_err();
        assert!(matches!(err, TiddlytimeError::WatchTargetUnreadable { .. }));
    }

    #[test]
    fn rejects_bad_timings() {
        let mut cfg = RawConfigFile::default();
        cfg.watch.poll_interval_ms = 0;
        assert!(validate_raw_config(&cfg).is_err());

        let mut cfg = RawConfigFile::default();
        cfg.watch.stability_threshold_ms = 50;
        cfg.watch.poll_interval_ms = 100;
        assert!(validate_raw_config(&cfg).is_err());
    }

    #[test]
    fn rejects_blank_category() {
        let mut cfg = RawConfigFile::default();
        cfg.heartbeat.category = "  ".to_string();
        assert!(matches!(
            validate_raw_config(&cfg),
            Err(TiddlytimeError::ConfigError(_))
        ));
    }
}
