#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub use tiddlytime_test_utils::{
    init_tracing, wait_until, with_timeout, RecordingBackend, SettingsBuilder,
};

/// A temporary wiki folder with one ordinary tiddler and a story list.
pub fn sample_wiki() -> std::io::Result<TempDir> {
    let dir = tempfile::tempdir()?;
    write_tiddler(dir.path(), "Note.tid", "title: Note\n\nSome text")?;
    write_tiddler(dir.path(), "$__StoryList.tid", "title: $:/StoryList\nlist: Note\n\n")?;
    Ok(dir)
}

pub fn write_tiddler(dir: &Path, name: &str, contents: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// `--entity` value of a recorded heartbeat, as a path.
pub fn entity_of(cmd: &tiddlytime::exec::HeartbeatCommand) -> PathBuf {
    PathBuf::from(cmd.arg_value("--entity").expect("heartbeat without --entity"))
}
