// src/snapshot/diff.rs

use crate::changes::{Change, ChangeSet};
use crate::snapshot::Snapshot;

/// Compute the changes that turn `previous` into `current`.
///
/// - in `current` only: added
/// - in both with a differing fingerprint: modified
/// - in `previous` only: deleted
pub fn diff(previous: &Snapshot, current: &Snapshot) -> ChangeSet {
    let mut changes = ChangeSet::new();

    for (path, fingerprint) in current.iter() {
        match previous.get(path) {
            None => {
                changes.insert(Change::added(path));
            }
            Some(old) if fingerprint.is_modified_from(old) => {
                changes.insert(Change::modified(path));
            }
            Some(_) => {}
        }
    }

    for path in previous.paths() {
        if !current.contains(path) {
            changes.insert(Change::deleted(path));
        }
    }

    changes
}
