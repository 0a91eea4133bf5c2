// src/watch/ignore.rs

//! Which files never produce a heartbeat.
//!
//! TiddlyWiki rewrites its story/history list tiddlers whenever the user
//! merely navigates, and keeps binary-tiddler metadata in `.meta` sidecars.
//! Neither is writing activity.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Basenames that are always ignored.
pub const BUILTIN_IGNORED_NAMES: &[&str] =
    &["$__StoryList.tid", "$__StoryList_1.tid", "$__HistoryList.tid"];

/// Suffix rule: sidecar metadata files.
pub const META_SUFFIX: &str = ".meta";

/// Compiled ignore policy, matched against a path's basename only.
#[derive(Clone)]
pub struct IgnorePolicy {
    names: BTreeSet<String>,
    extra_patterns: Vec<String>,
    extra_set: Option<GlobSet>,
}

impl fmt::Debug for IgnorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IgnorePolicy")
            .field("names", &self.names)
            .field("extra_patterns", &self.extra_patterns)
            .finish_non_exhaustive()
    }
}

impl Default for IgnorePolicy {
    fn default() -> Self {
        Self {
            names: BUILTIN_IGNORED_NAMES.iter().map(|s| s.to_string()).collect(),
            extra_patterns: Vec::new(),
            extra_set: None,
        }
    }
}

impl IgnorePolicy {
    /// Built-in rules plus extra basename globs (e.g. `"Draft of *"`).
    pub fn with_patterns(extra_patterns: &[String]) -> Result<Self> {
        let mut policy = Self::default();
        if extra_patterns.is_empty() {
            return Ok(policy);
        }

        let mut builder = GlobSetBuilder::new();
        for pat in extra_patterns {
            let glob = Glob::new(pat).with_context(|| format!("invalid ignore pattern: {pat}"))?;
            builder.add(glob);
        }
        policy.extra_set = Some(builder.build()?);
        policy.extra_patterns = extra_patterns.to_vec();
        Ok(policy)
    }

    /// True if no heartbeat should be sent for `path`.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy();

        if name.ends_with(META_SUFFIX) || self.names.contains(name.as_ref()) {
            return true;
        }
        match &self.extra_set {
            Some(set) => set.is_match(name.as_ref()),
            None => false,
        }
    }

    /// Human-readable rule list, for dry-run output and startup logs.
    pub fn describe(&self) -> Vec<String> {
        let mut rules: Vec<String> = self.names.iter().cloned().collect();
        rules.push(format!("*{META_SUFFIX}"));
        rules.extend(self.extra_patterns.iter().cloned());
        rules
    }
}
