// src/changes.rs

//! Change records produced by diffing snapshots.
//!
//! A [`ChangeSet`] holds at most one [`ChangeKind`] per path. Inserting a
//! second change for the same path replaces the earlier kind, which is what
//! the debounce loop relies on when it coalesces several polls into one
//! batch: the latest observation reflects the current filesystem state.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// What happened to a path between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
}

impl ChangeKind {
    /// The kind observed when diffing in the opposite direction.
    pub fn inverse(self) -> Self {
        match self {
            ChangeKind::Added => ChangeKind::Deleted,
            ChangeKind::Modified => ChangeKind::Modified,
            ChangeKind::Deleted => ChangeKind::Added,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `(kind, path)` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Change {
    pub kind: ChangeKind,
    pub path: PathBuf,
}

impl Change {
    pub fn new(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    pub fn added(path: impl Into<PathBuf>) -> Self {
        Self::new(ChangeKind::Added, path)
    }

    pub fn modified(path: impl Into<PathBuf>) -> Self {
        Self::new(ChangeKind::Modified, path)
    }

    pub fn deleted(path: impl Into<PathBuf>) -> Self {
        Self::new(ChangeKind::Deleted, path)
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.path.display())
    }
}

/// Set of changes keyed by path, iterated in path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    entries: BTreeMap<PathBuf, ChangeKind>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a change, returning the kind it replaced for that path.
    pub fn insert(&mut self, change: Change) -> Option<ChangeKind> {
        self.entries.insert(change.path, change.kind)
    }

    /// Fold `other` into `self`; kinds from `other` win on shared paths.
    pub fn merge(&mut self, other: ChangeSet) {
        self.entries.extend(other.entries);
    }

    pub fn contains(&self, change: &Change) -> bool {
        self.entries.get(&change.path) == Some(&change.kind)
    }

    pub fn kind_of(&self, path: &Path) -> Option<ChangeKind> {
        self.entries.get(path).copied()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.entries.keys().map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChangeKind, &Path)> + '_ {
        self.entries.iter().map(|(path, kind)| (*kind, path.as_path()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<Change> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = Change>>(iter: I) -> Self {
        let mut set = ChangeSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Change> for ChangeSet {
    fn extend<I: IntoIterator<Item = Change>>(&mut self, iter: I) {
        for change in iter {
            self.insert(change);
        }
    }
}

impl IntoIterator for ChangeSet {
    type Item = Change;
    type IntoIter = std::iter::Map<
        std::collections::btree_map::IntoIter<PathBuf, ChangeKind>,
        fn((PathBuf, ChangeKind)) -> Change,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .into_iter()
            .map(entry_to_change as fn((PathBuf, ChangeKind)) -> Change)
    }
}

fn entry_to_change((path, kind): (PathBuf, ChangeKind)) -> Change {
    Change { kind, path }
}
