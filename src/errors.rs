// src/errors.rs

//! Crate-wide error type and `Result` alias.
//!
//! Only startup failures surface as `TiddlytimeError`; anything that goes
//! wrong once the dispatcher is running is logged where it happens.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TiddlytimeError {
    #[error("watch directory not set: export TIDDLER_PATH or pass --wiki-dir")]
    WatchTargetUnset,

    #[error("watch directory does not exist: {0:?}")]
    WatchTargetMissing(PathBuf),

    #[error("watch target is not a directory: {0:?}")]
    WatchTargetNotDir(PathBuf),

    #[error("watch directory is not readable: {path:?}: {reason}")]
    WatchTargetUnreadable { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("file watcher error: {0}")]
    WatchError(#[from] notify::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TiddlytimeError>;
