// src/snapshot/mod.rs

//! Directory snapshots.
//!
//! A [`Snapshot`] maps every admitted file under a root to its
//! [`Fingerprint`] at one instant. The [`Snapshotter`] builds one with a full
//! walk; [`diff`] compares two of them.
//!
//! Walking is fail-soft: entries that vanish mid-walk, unreadable
//! directories and symlinks are skipped without error. Only a root that
//! cannot be listed at all fails the walk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, trace};

use crate::errors::{PollwatchError, Result};
use crate::filter::PathFilter;
use crate::fs::{DirEntry, EntryKind, FileSystem};
use crate::types::FingerprintMode;

pub mod diff;
pub mod hash;

pub use diff::diff;
pub use hash::compute_file_hash;

/// Comparable summary of a file's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub modified: SystemTime,
    pub len: u64,
    /// blake3 hex digest, present in [`FingerprintMode::Content`].
    pub content: Option<String>,
}

impl Fingerprint {
    pub fn from_metadata(modified: SystemTime, len: u64) -> Self {
        Self {
            modified,
            len,
            content: None,
        }
    }

    pub fn same_metadata(&self, other: &Fingerprint) -> bool {
        self.modified == other.modified && self.len == other.len
    }

    /// Whether the file counts as modified going from `previous` to `self`.
    ///
    /// With digests on both sides only the content decides; otherwise
    /// modification time and size do.
    pub fn is_modified_from(&self, previous: &Fingerprint) -> bool {
        match (&self.content, &previous.content) {
            (Some(now), Some(before)) => now != before,
            _ => !self.same_metadata(previous),
        }
    }
}

/// Mapping of watched file path to fingerprint at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    files: HashMap<PathBuf, Fingerprint>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<&Fingerprint> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Fingerprint)> + '_ {
        self.files.iter().map(|(p, f)| (p.as_path(), f))
    }

    fn insert(&mut self, path: PathBuf, fingerprint: Fingerprint) {
        self.files.insert(path, fingerprint);
    }
}

impl FromIterator<(PathBuf, Fingerprint)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (PathBuf, Fingerprint)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

/// Walks a tree and fingerprints every admitted file.
#[derive(Debug, Clone)]
pub struct Snapshotter {
    fs: Arc<dyn FileSystem>,
    filter: Arc<dyn PathFilter>,
    mode: FingerprintMode,
}

impl Snapshotter {
    pub fn new(fs: Arc<dyn FileSystem>, filter: Arc<dyn PathFilter>, mode: FingerprintMode) -> Self {
        Self { fs, filter, mode }
    }

    /// Take a full snapshot of `root`.
    ///
    /// `previous` lets content mode reuse digests of files whose metadata did
    /// not change, so only touched files are re-read.
    pub fn snapshot(&self, root: &Path, previous: Option<&Snapshot>) -> Result<Snapshot> {
        let top = self.fs.read_dir(root).map_err(|err| {
            PollwatchError::ConfigError(format!("cannot read watch root {:?}: {err:#}", root))
        })?;

        let mut snapshot = Snapshot::new();
        let mut pending: Vec<Vec<DirEntry>> = vec![top];

        while let Some(entries) = pending.pop() {
            for entry in entries {
                match entry.kind {
                    EntryKind::Dir => {
                        if !self.filter.admit_dir(&entry.path) {
                            trace!(path = ?entry.path, "directory filtered out");
                            continue;
                        }
                        match self.fs.read_dir(&entry.path) {
                            Ok(children) => pending.push(children),
                            Err(err) => {
                                debug!(path = ?entry.path, error = %err, "skipping unreadable directory");
                            }
                        }
                    }
                    EntryKind::File => {
                        if !self.filter.admit_file(&entry.path) {
                            continue;
                        }
                        match self.fingerprint(&entry.path, previous) {
                            Ok(fp) => snapshot.insert(entry.path, fp),
                            Err(err) => {
                                debug!(path = ?entry.path, error = %err, "skipping file that could not be fingerprinted");
                            }
                        }
                    }
                    EntryKind::Symlink | EntryKind::Other => {
                        trace!(path = ?entry.path, kind = ?entry.kind, "skipping non-regular entry");
                    }
                }
            }
        }

        Ok(snapshot)
    }

    fn fingerprint(&self, path: &Path, previous: Option<&Snapshot>) -> anyhow::Result<Fingerprint> {
        let meta = self.fs.metadata(path)?;
        let mut fingerprint = Fingerprint::from_metadata(meta.modified, meta.len);

        if self.mode == FingerprintMode::Content {
            let cached = previous
                .and_then(|s| s.get(path))
                .filter(|old| old.same_metadata(&fingerprint))
                .and_then(|old| old.content.clone());
            let digest = match cached {
                Some(digest) => digest,
                None => compute_file_hash(self.fs.as_ref(), path)?,
            };
            fingerprint.content = Some(digest);
        }

        Ok(fingerprint)
    }
}
