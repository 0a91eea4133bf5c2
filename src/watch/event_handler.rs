// src/watch/event_handler.rs

//! Turning raw `notify` events into file-level changes.

use std::path::{Path, PathBuf};

use notify::event::{AccessKind, AccessMode, CreateKind, MetadataKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind};

use crate::types::FileEventKind;
use crate::watch::path_utils::is_hidden;

/// Classify a `notify` event into `(path, kind)` pairs we care about.
///
/// - Hidden entries, the root itself, and directory create/remove events are
///   dropped.
/// - Pure reads, permission/ownership changes and atime updates are dropped.
/// - Renames are split into a removal of the old name and an add of the new
///   one. When the backend can't tell which side of a rename a path is on,
///   `exists` decides.
pub fn classify_event<F>(root: &Path, event: &Event, exists: F) -> Vec<(PathBuf, FileEventKind)>
where
    F: Fn(&Path) -> bool,
{
    let kinds: Vec<(PathBuf, FileEventKind)> = match &event.kind {
        EventKind::Create(CreateKind::Folder) | EventKind::Remove(RemoveKind::Folder) => Vec::new(),
        EventKind::Create(_) => tag(&event.paths, FileEventKind::Added),
        EventKind::Remove(_) => tag(&event.paths, FileEventKind::Removed),

        EventKind::Modify(ModifyKind::Name(mode)) => match mode {
            RenameMode::From => tag(&event.paths, FileEventKind::Removed),
            RenameMode::To => tag(&event.paths, FileEventKind::Added),
            RenameMode::Both if event.paths.len() == 2 => vec![
                (event.paths[0].clone(), FileEventKind::Removed),
                (event.paths[1].clone(), FileEventKind::Added),
            ],
            _ => event
                .paths
                .iter()
                .map(|p| {
                    let kind = if exists(p) {
                        FileEventKind::Added
                    } else {
                        FileEventKind::Removed
                    };
                    (p.clone(), kind)
                })
                .collect(),
        },
        EventKind::Modify(ModifyKind::Metadata(
            MetadataKind::AccessTime | MetadataKind::Permissions | MetadataKind::Ownership,
        )) => Vec::new(),
        EventKind::Modify(_) => tag(&event.paths, FileEventKind::Changed),

        // inotify reports the end of a write session as close-after-write.
        EventKind::Access(AccessKind::Close(AccessMode::Write)) => {
            tag(&event.paths, FileEventKind::Changed)
        }
        EventKind::Access(_) | EventKind::Any | EventKind::Other => Vec::new(),
    };

    kinds
        .into_iter()
        .filter(|(path, _)| path != root && !is_hidden(root, path))
        .collect()
}

fn tag(paths: &[PathBuf], kind: FileEventKind) -> Vec<(PathBuf, FileEventKind)> {
    paths.iter().map(|p| (p.clone(), kind)).collect()
}

#[cfg(test)]
mod tests {
    use notify::event::DataChange;

    use super::*;

    fn event(kind: EventKind, paths: &[&str]) -> Event {
        let mut ev = Event::new(kind);
        for p in paths {
            ev = ev.add_path(PathBuf::from(p));
        }
        ev
    }

    fn root() -> &'static Path {
        Path::new("/wiki")
    }

    #[test]
    fn create_and_write() {
        let created = event(EventKind::Create(CreateKind::File), &["/wiki/New.tid"]);
        assert_eq!(
            classify_event(root(), &created, |_| true),
            vec![(PathBuf::from("/wiki/New.tid"), FileEventKind::Added)]
        );

        let written = event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            &["/wiki/Note.tid"],
        );
        assert_eq!(
            classify_event(root(), &written, |_| true),
            vec![(PathBuf::from("/wiki/Note.tid"), FileEventKind::Changed)]
        );
    }

    #[test]
    fn touch_counts_as_change() {
        let touched = event(
            EventKind::Modify(ModifyKind::Metadata(MetadataKind::Any)),
            &["/wiki/Note.tid"],
        );
        assert_eq!(classify_event(root(), &touched, |_| true).len(), 1);

        let chmod = event(
            EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions)),
            &["/wiki/Note.tid"],
        );
        assert!(classify_event(root(), &chmod, |_| true).is_empty());
    }

    #[test]
    fn hidden_and_folders_dropped() {
        let hidden = event(EventKind::Create(CreateKind::File), &["/wiki/.Note.tid.swp"]);
        assert!(classify_event(root(), &hidden, |_| true).is_empty());

        let folder = event(EventKind::Create(CreateKind::Folder), &["/wiki/files"]);
        assert!(classify_event(root(), &folder, |_| true).is_empty());

        let on_root = event(EventKind::Modify(ModifyKind::Any), &["/wiki"]);
        assert!(classify_event(root(), &on_root, |_| true).is_empty());
    }

    #[test]
    fn rename_both_splits() {
        let renamed = event(
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            &["/wiki/Old.tid", "/wiki/New.tid"],
        );
        assert_eq!(
            classify_event(root(), &renamed, |_| true),
            vec![
                (PathBuf::from("/wiki/Old.tid"), FileEventKind::Removed),
                (PathBuf::from("/wiki/New.tid"), FileEventKind::Added),
            ]
        );
    }

    #[test]
    fn ambiguous_rename_checks_existence() {
        let renamed = event(
            EventKind::Modify(ModifyKind::Name(RenameMode::Any)),
            &["/wiki/Here.tid", "/wiki/Gone.tid"],
        );
        let out = classify_event(root(), &renamed, |p| p.ends_with("Here.tid"));
        assert_eq!(
            out,
            vec![
                (PathBuf::from("/wiki/Here.tid"), FileEventKind::Added),
                (PathBuf::from("/wiki/Gone.tid"), FileEventKind::Removed),
            ]
        );
    }

    #[test]
    fn reads_are_ignored() {
        let read = event(
            EventKind::Access(AccessKind::Open(AccessMode::Read)),
            &["/wiki/Note.tid"],
        );
        assert!(classify_event(root(), &read, |_| true).is_empty());
    }
}
