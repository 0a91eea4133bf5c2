// src/exec/heartbeat.rs

//! The `wakatime-cli` argument contract.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::Settings;

/// Sent as `--plugin` so heartbeats are attributed to this tool.
pub const PLUGIN_ID: &str = concat!("tiddlytime/", env!("CARGO_PKG_VERSION"));

/// One fully-built `wakatime-cli` invocation.
///
/// Arguments are kept as separate argv entries and never go through a shell,
/// so paths with spaces or quotes are passed verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatCommand {
    program: PathBuf,
    entity: PathBuf,
    args: Vec<OsString>,
}

impl HeartbeatCommand {
    /// Build the heartbeat for `path`, observed at `time`.
    ///
    /// Relative paths are resolved against the wiki directory.
    pub fn build(settings: &Settings, path: &Path, time: SystemTime) -> Self {
        let entity = if path.is_absolute() {
            path.to_path_buf()
        } else {
            settings.wiki_dir.join(path)
        };

        let args: Vec<OsString> = vec![
            "--entity".into(),
            entity.clone().into_os_string(),
            "--write".into(),
            "--time".into(),
            format_time(time).into(),
            "--category".into(),
            settings.category.clone().into(),
            "--alternate-language".into(),
            settings.alternate_language.clone().into(),
            "--project".into(),
            settings.project.clone().into(),
            "--plugin".into(),
            PLUGIN_ID.into(),
        ];

        Self {
            program: settings.cli_path.clone(),
            entity,
            args,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The file the heartbeat is about.
    pub fn entity(&self) -> &Path {
        &self.entity
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Value following `flag`, if present.
    pub fn arg_value(&self, flag: &str) -> Option<&OsString> {
        let idx = self.args.iter().position(|a| a == flag)?;
        self.args.get(idx + 1)
    }
}

impl fmt::Display for HeartbeatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.contains(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Unix seconds with millisecond precision, as `wakatime-cli --time` expects.
fn format_time(time: SystemTime) -> String {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();
    format!("{secs:.3}")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::DebounceSettings;
    use crate::watch::IgnorePolicy;

    fn settings() -> Settings {
        Settings {
            wiki_dir: PathBuf::from("/wiki"),
            entry_count: 0,
            cli_path: PathBuf::from("/home/me/.wakatime/wakatime-cli-linux-amd64"),
            project: "Field Notes".to_string(),
            category: "coding".to_string(),
            alternate_language: "TiddlyWiki".to_string(),
            ignore: IgnorePolicy::default(),
            debounce: DebounceSettings::default(),
        }
    }

    #[test]
    fn argv_layout() {
        let at = UNIX_EPOCH + Duration::from_millis(1_700_000_000_250);
        let cmd = HeartbeatCommand::build(&settings(), Path::new("/wiki/My Note.tid"), at);

        assert_eq!(cmd.program(), Path::new("/home/me/.wakatime/wakatime-cli-linux-amd64"));
        let args: Vec<String> = cmd
            .args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "--entity",
                "/wiki/My Note.tid",
                "--write",
                "--time",
                "1700000000.250",
                "--category",
                "coding",
                "--alternate-language",
                "TiddlyWiki",
                "--project",
                "Field Notes",
                "--plugin",
                PLUGIN_ID,
            ]
        );
    }

    #[test]
    fn relative_path_is_resolved() {
        let cmd = HeartbeatCommand::build(&settings(), Path::new("Note.tid"), UNIX_EPOCH);
        assert_eq!(cmd.entity(), Path::new("/wiki/Note.tid"));
        assert_eq!(cmd.arg_value("--entity").unwrap(), "/wiki/Note.tid");
    }

    #[test]
    fn display_quotes_spaces() {
        let cmd = HeartbeatCommand::build(&settings(), Path::new("/wiki/My Note.tid"), UNIX_EPOCH);
        let shown = cmd.to_string();
        assert!(shown.contains("\"/wiki/My Note.tid\""));
        assert!(shown.contains("--project \"Field Notes\""));
    }
}
