// tests/dispatcher.rs

mod common;
use crate::common::{entity_of, init_tracing, with_timeout, RecordingBackend, SettingsBuilder};

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use tiddlytime::engine::{DispatchCore, DispatchEvent, Dispatcher};
use tiddlytime::types::{FileEvent, FileEventKind};

type TestResult = Result<(), Box<dyn Error>>;

fn dispatcher(
    settings: SettingsBuilder,
) -> (mpsc::Sender<DispatchEvent>, Dispatcher<RecordingBackend>, RecordingBackend) {
    let (tx, rx) = mpsc::channel(16);
    let backend = RecordingBackend::new();
    let core = DispatchCore::new(Arc::new(settings.build()));
    (tx, Dispatcher::new(core, rx, backend.clone()), backend)
}

fn file(path: &str, kind: FileEventKind) -> DispatchEvent {
    DispatchEvent::File(FileEvent::new(path, kind))
}

#[tokio::test]
async fn story_list_and_note_touched_dispatches_once() -> TestResult {
    init_tracing();

    let (tx, dispatcher, backend) = dispatcher(SettingsBuilder::new("/wiki"));
    let run = tokio::spawn(dispatcher.run());

    tx.send(file("/wiki/Note.tid", FileEventKind::Changed)).await?;
    tx.send(file("/wiki/$__StoryList.tid", FileEventKind::Changed)).await?;
    tx.send(DispatchEvent::ShutdownRequested).await?;

    let stats = with_timeout(run).await??;
    assert_eq!(stats.dispatched, 1);
    assert_eq!(stats.ignored, 1);

    let sent = backend.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(entity_of(&sent[0]), PathBuf::from("/wiki/Note.tid"));
    Ok(())
}

#[tokio::test]
async fn path_with_spaces_is_passed_verbatim() -> TestResult {
    init_tracing();

    let (tx, dispatcher, backend) = dispatcher(SettingsBuilder::new("/my wiki").project("Field Notes"));
    let run = tokio::spawn(dispatcher.run());

    tx.send(file("/my wiki/A \"quoted\" note.tid", FileEventKind::Added)).await?;
    drop(tx);
    with_timeout(run).await??;

    let sent = backend.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(entity_of(&sent[0]), PathBuf::from("/my wiki/A \"quoted\" note.tid"));
    assert_eq!(sent[0].arg_value("--project").unwrap(), "Field Notes");
    assert_eq!(sent[0].arg_value("--category").unwrap(), "coding");
    assert_eq!(sent[0].arg_value("--alternate-language").unwrap(), "TiddlyWiki");
    Ok(())
}

#[tokio::test]
async fn removals_and_watch_errors_do_not_dispatch_or_stop() -> TestResult {
    init_tracing();

    let (tx, dispatcher, backend) = dispatcher(SettingsBuilder::new("/wiki"));
    let run = tokio::spawn(dispatcher.run());

    tx.send(file("/wiki/Old.tid", FileEventKind::Removed)).await?;
    tx.send(DispatchEvent::WatchError("inotify queue overflow".into())).await?;
    tx.send(file("/wiki/New.tid", FileEventKind::Added)).await?;
    drop(tx);

    let stats = with_timeout(run).await??;
    assert_eq!(stats.removed, 1);
    assert_eq!(stats.watch_errors, 1);
    assert_eq!(stats.dispatched, 1);

    let sent = backend.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(entity_of(&sent[0]), PathBuf::from("/wiki/New.tid"));
    Ok(())
}

#[tokio::test]
async fn every_change_to_same_file_is_its_own_heartbeat() -> TestResult {
    init_tracing();

    let (tx, dispatcher, backend) = dispatcher(SettingsBuilder::new("/wiki"));
    let run = tokio::spawn(dispatcher.run());

    for _ in 0..3 {
        tx.send(file("/wiki/Note.tid", FileEventKind::Changed)).await?;
    }
    drop(tx);
    with_timeout(run).await??;

    assert_eq!(backend.sent().len(), 3);
    Ok(())
}

#[tokio::test]
async fn extra_ignore_patterns_apply() -> TestResult {
    init_tracing();

    let (tx, dispatcher, backend) =
        dispatcher(SettingsBuilder::new("/wiki").ignore_patterns(&["Draft of *"]));
    let run = tokio::spawn(dispatcher.run());

    tx.send(file("/wiki/Draft of 'Note'.tid", FileEventKind::Changed)).await?;
    tx.send(file("/wiki/image.png.meta", FileEventKind::Changed)).await?;
    drop(tx);
    let stats = with_timeout(run).await??;

    assert_eq!(stats.ignored, 2);
    assert!(backend.sent().is_empty());
    Ok(())
}

#[tokio::test]
async fn category_override_reaches_argv() -> TestResult {
    init_tracing();

    let settings = SettingsBuilder::new("/wiki").category("writing docs").build();
    let backend = RecordingBackend::new();
    let recorded = backend.handle();

    let (tx, rx) = mpsc::channel(16);
    let run = tokio::spawn(Dispatcher::new(DispatchCore::new(Arc::new(settings)), rx, backend).run());

    tx.send(file("/wiki/Note.tid", FileEventKind::Changed)).await?;
    drop(tx);
    with_timeout(run).await??;

    let sent = recorded.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].arg_value("--category").unwrap(), "writing docs");
    Ok(())
}
