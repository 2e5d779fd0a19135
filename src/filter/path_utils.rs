// src/filter/path_utils.rs

use std::borrow::Cow;
use std::path::Path;

/// Final component of `path` as text (lossy for non-UTF-8 names).
pub fn file_name_str(path: &Path) -> Option<Cow<'_, str>> {
    path.file_name().map(|n| n.to_string_lossy())
}

/// `path` relative to `root` with forward slashes, or `None` if it lies
/// outside `root`. Purely lexical: both paths are expected to share the
/// canonical root the watcher walks from.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(root)
        .ok()
        .map(|rel| rel.to_string_lossy().replace('\\', "/"))
}
