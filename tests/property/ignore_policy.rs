use std::path::PathBuf;
use std::sync::Arc;

use proptest::prelude::*;
use tiddlytime::engine::{CoreCommand, DispatchCore, DispatchEvent};
use tiddlytime::types::{FileEvent, FileEventKind};
use tiddlytime::watch::ignore::BUILTIN_IGNORED_NAMES;
use tiddlytime_test_utils::SettingsBuilder;

fn core() -> DispatchCore {
    DispatchCore::new(Arc::new(SettingsBuilder::new("/wiki").build()))
}

fn kind_strategy() -> impl Strategy<Value = FileEventKind> {
    prop_oneof![Just(FileEventKind::Added), Just(FileEventKind::Changed)]
}

proptest! {
    #[test]
    fn meta_sidecars_never_dispatch(
        stem in "[A-Za-z0-9 $_.'-]{0,24}",
        kind in kind_strategy(),
    ) {
        let mut core = core();
        let path = PathBuf::from("/wiki").join(format!("{stem}.meta"));
        let step = core.step(DispatchEvent::File(FileEvent::new(path, kind)));
        prop_assert!(step.commands.is_empty());
        prop_assert_eq!(core.stats().dispatched, 0);
    }

    #[test]
    fn ignored_names_never_dispatch(
        idx in 0..BUILTIN_IGNORED_NAMES.len(),
        kind in kind_strategy(),
    ) {
        let mut core = core();
        let path = PathBuf::from("/wiki").join(BUILTIN_IGNORED_NAMES[idx]);
        let step = core.step(DispatchEvent::File(FileEvent::new(path, kind)));
        prop_assert!(step.commands.is_empty());
    }

    #[test]
    fn other_tiddlers_dispatch_exactly_once(
        stem in "[A-Za-z0-9 _'-]{1,24}",
        kind in kind_strategy(),
    ) {
        let name = format!("{stem}.tid");
        prop_assume!(!BUILTIN_IGNORED_NAMES.contains(&name.as_str()));

        let mut core = core();
        let path = PathBuf::from("/wiki").join(&name);
        let step = core.step(DispatchEvent::File(FileEvent::new(path.clone(), kind)));

        prop_assert_eq!(step.commands.len(), 1);
        match &step.commands[0] {
            CoreCommand::SendHeartbeat(cmd) => {
                prop_assert_eq!(cmd.entity(), path.as_path());
                let entity = cmd.arg_value("--entity").map(PathBuf::from);
                prop_assert_eq!(entity, Some(path));
            }
            other => prop_assert!(false, "unexpected command {:?}", other),
        }
    }
}
