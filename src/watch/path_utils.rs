// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::{Component, Path, PathBuf};

/// Return `path` relative to `root`.
///
/// - First we try a direct `strip_prefix(root)`.
/// - If that fails (e.g. due to symlinks or different absolute prefixes),
///   we canonicalize both paths and try again.
///
/// Returns `None` if the path cannot be reasonably related to `root`.
pub fn relative_to(root: &Path, path: &Path) -> Option<PathBuf> {
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(rel.to_path_buf());
    }

    // Helps on macOS, where events may arrive under /private/var/... for a
    // root given as /var/...
    if let (Ok(root_canon), Ok(path_canon)) = (root.canonicalize(), path.canonicalize()) {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return Some(rel.to_path_buf());
        }
    }

    None
}

/// True if any component of `path` below `root` is a dotfile.
///
/// Paths that can't be related to `root` fall back to checking the basename.
pub fn is_hidden(root: &Path, path: &Path) -> bool {
    let starts_with_dot = |c: Component<'_>| match c {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    };

    match relative_to(root, path) {
        Some(rel) => rel.components().any(starts_with_dot),
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(false),
    }
}
