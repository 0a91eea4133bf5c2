use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

/// What happened to a file in the watched directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEventKind {
    Added,
    Changed,
    Removed,
}

impl fmt::Display for FileEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileEventKind::Added => "added",
            FileEventKind::Changed => "changed",
            FileEventKind::Removed => "removed",
        };
        f.write_str(s)
    }
}

/// A single filesystem change, after hidden-entry filtering and debouncing.
///
/// `observed_at` is the moment the event became final (for writes: when the
/// file settled). It is used as the heartbeat timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    pub path: PathBuf,
    pub kind: FileEventKind,
    pub observed_at: SystemTime,
}

impl FileEvent {
    pub fn new(path: impl Into<PathBuf>, kind: FileEventKind) -> Self {
        Self {
            path: path.into(),
            kind,
            observed_at: SystemTime::now(),
        }
    }

    pub fn at(mut self, observed_at: SystemTime) -> Self {
        self.observed_at = observed_at;
        self
    }
}

/// Size + modification time of a file, compared between debounce polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    pub len: u64,
    pub modified: Option<SystemTime>,
}
