#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use pollwatch::filter::PathFilter;
use pollwatch::fs::mock::MockFileSystem;
use pollwatch::types::FingerprintMode;
use pollwatch::{ChangeSet, Watcher};

pub use pollwatch_test_utils::builders;
pub use pollwatch_test_utils::init_tracing;

pub const MOCK_ROOT: &str = "/proj";

/// Watcher over an in-memory tree rooted at [`MOCK_ROOT`].
pub fn mock_watcher(
    fs: &MockFileSystem,
    filter: Arc<dyn PathFilter>,
    mode: FingerprintMode,
) -> Watcher {
    Watcher::with_fs(MOCK_ROOT, filter, Arc::new(fs.clone()), mode)
        .expect("mock root should be watchable")
}

/// Change set listing `(kind, path)` pairs as strings, for readable asserts.
pub fn describe(changes: &ChangeSet) -> Vec<String> {
    changes
        .iter()
        .map(|(kind, path)| format!("{kind} {}", path.display()))
        .collect()
}

/// Same as [`describe`] but with paths relative to `root`.
pub fn describe_relative(changes: &ChangeSet, root: &Path) -> Vec<String> {
    changes
        .iter()
        .map(|(kind, path)| {
            let rel = path.strip_prefix(root).unwrap_or(path);
            format!("{kind} {}", rel.to_string_lossy().replace('\\', "/"))
        })
        .collect()
}
