// src/config/title.rs

//! Project title lookup.
//!
//! A `.tid` file is a block of `field: value` header lines, a blank line,
//! then the tiddler text. For `$__SiteTitle.tid` that text is the wiki's
//! title, which we report as the WakaTime project.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{info, warn};

use crate::config::model::DEFAULT_PROJECT;
use crate::fs::FileSystem;

fn blank_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\r?\n[ \t]*\r?\n").expect("static regex"))
}

/// Extract the title: the first block after the first blank line, trimmed.
///
/// Returns `None` when there is no blank line or the block is empty.
pub fn parse_title(contents: &str) -> Option<String> {
    let re = blank_line();
    let mut parts = re.splitn(contents, 2);
    parts.next();
    let body = parts.next()?.trim_start();

    let block = re.split(body).next()?.trim();
    if block.is_empty() {
        None
    } else {
        Some(block.to_string())
    }
}

/// Read `title_file` inside `wiki_dir` and parse it, falling back to
/// [`DEFAULT_PROJECT`] on any failure.
pub fn resolve_project_title(fs: &dyn FileSystem, wiki_dir: &Path, title_file: &str) -> String {
    let path = wiki_dir.join(title_file);

    if !fs.exists(&path) {
        warn!(
            path = ?path,
            default = DEFAULT_PROJECT,
            "site title file not found; using default project name"
        );
        return DEFAULT_PROJECT.to_string();
    }

    let contents = match fs.read_to_string(&path) {
        Ok(c) => c,
        Err(err) => {
            warn!(
                path = ?path,
                error = %err,
                default = DEFAULT_PROJECT,
                "failed to read site title file; using default project name"
            );
            return DEFAULT_PROJECT.to_string();
        }
    };

    match parse_title(&contents) {
        Some(title) => {
            info!(project = %title, "project title resolved from {:?}", path);
            title
        }
        None => {
            warn!(
                path = ?path,
                default = DEFAULT_PROJECT,
                "no title text in site title file; using default project name"
            );
            DEFAULT_PROJECT.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn title_after_header() {
        assert_eq!(
            parse_title("metadata line\n\nActual Title"),
            Some("Actual Title".to_string())
        );
    }

    #[test]
    fn title_is_trimmed_and_stops_at_next_block() {
        let tid = "created: 20240101\r\ntitle: $:/SiteTitle\r\n\r\n  My Notes  \n\nleftover";
        assert_eq!(parse_title(tid), Some("My Notes".to_string()));
    }

    #[test]
    fn extra_blank_lines_before_text() {
        assert_eq!(parse_title("title: x\n\n\n\nWiki"), Some("Wiki".to_string()));
    }

    #[test]
    fn no_blank_line_or_empty_text() {
        assert_eq!(parse_title("title: $:/SiteTitle"), None);
        assert_eq!(parse_title("title: $:/SiteTitle\n\n   \n"), None);
        assert_eq!(parse_title(""), None);
    }

    #[test]
    fn missing_file_falls_back() {
        let fs = MockFileSystem::new();
        fs.add_dir("/wiki");
        let title = resolve_project_title(&fs, Path::new("/wiki"), "$__SiteTitle.tid");
        assert_eq!(title, DEFAULT_PROJECT);
    }

    #[test]
    fn unreadable_file_falls_back() {
        let fs = MockFileSystem::new();
        fs.add_file("/wiki/$__SiteTitle.tid", "title: $:/SiteTitle\n\nSecret");
        fs.deny_read("/wiki/$__SiteTitle.tid");
        let title = resolve_project_title(&fs, Path::new("/wiki"), "$__SiteTitle.tid");
        assert_eq!(title, DEFAULT_PROJECT);
    }

    #[test]
    fn reads_title_from_file() {
        let fs = MockFileSystem::new();
        fs.add_file("/wiki/$__SiteTitle.tid", "title: $:/SiteTitle\ntype: text/vnd.tiddlywiki\n\nGarden");
        let title = resolve_project_title(&fs, Path::new("/wiki"), "$__SiteTitle.tid");
        assert_eq!(title, "Garden");
    }
}
