// src/watch/watcher.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::changes::ChangeSet;
use crate::errors::{PollwatchError, Result};
use crate::filter::{PathFilter, Unfiltered};
use crate::fs::{FileSystem, RealFileSystem};
use crate::snapshot::{diff, Snapshot, Snapshotter};
use crate::types::FingerprintMode;
use crate::watch::{ChangeDetector, WatcherFactory};

/// Polling watcher over one directory tree.
///
/// Construction takes the baseline snapshot; every [`check`] takes a fresh
/// one, diffs it against the baseline and then replaces the baseline. The
/// snapshot is owned here and never shared, so callers must serialize
/// `check` calls (it takes `&mut self`).
///
/// [`check`]: ChangeDetector::check
#[derive(Debug)]
pub struct Watcher {
    root: PathBuf,
    snapshotter: Snapshotter,
    snapshot: Snapshot,
}

impl Watcher {
    /// Watch `root` on the real filesystem using metadata fingerprints.
    pub fn new(root: impl AsRef<Path>, filter: Arc<dyn PathFilter>) -> Result<Self> {
        Self::with_fs(root, filter, Arc::new(RealFileSystem), FingerprintMode::Metadata)
    }

    /// Watch `root` with no filtering at all.
    pub fn unfiltered(root: impl AsRef<Path>) -> Result<Self> {
        Self::new(root, Arc::new(Unfiltered))
    }

    /// Watch `root` through an arbitrary [`FileSystem`].
    ///
    /// Fails with a configuration error if `root` is missing or not a
    /// directory.
    pub fn with_fs(
        root: impl AsRef<Path>,
        filter: Arc<dyn PathFilter>,
        fs: Arc<dyn FileSystem>,
        mode: FingerprintMode,
    ) -> Result<Self> {
        let root = root.as_ref();
        if !fs.is_dir(root) {
            return Err(PollwatchError::ConfigError(format!(
                "watch root {:?} does not exist or is not a directory",
                root
            )));
        }
        // Canonicalize once so reported paths are absolute and stable.
        let root = fs.canonicalize(root).unwrap_or_else(|_| root.to_path_buf());

        let snapshotter = Snapshotter::new(fs, filter, mode);
        let snapshot = snapshotter.snapshot(&root, None)?;

        info!(root = ?root, files = snapshot.len(), ?mode, "watcher baseline taken");

        Ok(Self {
            root,
            snapshotter,
            snapshot,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The baseline the next check diffs against.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

impl ChangeDetector for Watcher {
    fn check(&mut self) -> Result<ChangeSet> {
        let fresh = self.snapshotter.snapshot(&self.root, Some(&self.snapshot))?;
        let changes = diff(&self.snapshot, &fresh);
        self.snapshot = fresh;

        if !changes.is_empty() {
            debug!(root = ?self.root, changes = changes.len(), "check found changes");
        }
        Ok(changes)
    }

    fn tracked_files(&self) -> Option<usize> {
        Some(self.snapshot.len())
    }
}

/// Factory producing [`Watcher`]s on a given filesystem.
#[derive(Debug, Clone)]
pub struct SnapshotWatcherFactory {
    fs: Arc<dyn FileSystem>,
    mode: FingerprintMode,
}

impl Default for SnapshotWatcherFactory {
    fn default() -> Self {
        Self::new(FingerprintMode::Metadata)
    }
}

impl SnapshotWatcherFactory {
    pub fn new(mode: FingerprintMode) -> Self {
        Self {
            fs: Arc::new(RealFileSystem),
            mode,
        }
    }

    pub fn with_fs(fs: Arc<dyn FileSystem>, mode: FingerprintMode) -> Self {
        Self { fs, mode }
    }
}

impl WatcherFactory for SnapshotWatcherFactory {
    type Detector = Watcher;

    fn create(&self, root: &Path, filter: Arc<dyn PathFilter>) -> Result<Watcher> {
        Watcher::with_fs(root, filter, Arc::clone(&self.fs), self.mode)
    }
}
