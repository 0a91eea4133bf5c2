#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use tiddlytime::config::{
    DebounceSettings, Settings, DEFAULT_ALTERNATE_LANGUAGE, DEFAULT_CATEGORY, DEFAULT_PROJECT,
};
use tiddlytime::watch::IgnorePolicy;

/// Builder for `Settings` to simplify test setup.
///
/// Skips every filesystem check `load_settings` does, so the wiki directory
/// and binary need not exist.
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    pub fn new(wiki_dir: impl AsRef<Path>) -> Self {
        Self {
            settings: Settings {
                wiki_dir: wiki_dir.as_ref().to_path_buf(),
                entry_count: 0,
                cli_path: PathBuf::from("/usr/local/bin/wakatime-cli"),
                project: DEFAULT_PROJECT.to_string(),
                category: DEFAULT_CATEGORY.to_string(),
                alternate_language: DEFAULT_ALTERNATE_LANGUAGE.to_string(),
                ignore: IgnorePolicy::default(),
                debounce: DebounceSettings::default(),
            },
        }
    }

    pub fn cli_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings.cli_path = path.into();
        self
    }

    pub fn project(mut self, project: &str) -> Self {
        self.settings.project = project.to_string();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.settings.category = category.to_string();
        self
    }

    pub fn ignore_patterns(mut self, patterns: &[&str]) -> Self {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        self.settings.ignore =
            IgnorePolicy::with_patterns(&patterns).expect("invalid ignore pattern in test");
        self
    }

    pub fn debounce_ms(mut self, stability_threshold: u64, poll_interval: u64) -> Self {
        self.settings.debounce = DebounceSettings {
            stability_threshold: Duration::from_millis(stability_threshold),
            poll_interval: Duration::from_millis(poll_interval),
        };
        self
    }

    pub fn build(self) -> Settings {
        self.settings
    }
}
