// src/watch/mod.rs

//! Snapshot-based change detection.
//!
//! This module is responsible for:
//! - The [`ChangeDetector`] seam the polling loops drive (`check()`).
//! - The concrete [`Watcher`], which keeps the previous [`Snapshot`] and
//!   diffs a fresh one against it on every check.
//! - The [`WatcherFactory`] used by `engine::watch` / `engine::awatch` to
//!   build a detector for a root, so tests and alternative policies can swap
//!   the implementation.
//!
//! It does **not** sleep, debounce or know about cancellation; that lives in
//! [`crate::engine`].
//!
//! [`Snapshot`]: crate::snapshot::Snapshot

use std::path::Path;
use std::sync::Arc;

use crate::changes::ChangeSet;
use crate::errors::Result;
use crate::filter::PathFilter;

pub mod watcher;

pub use watcher::{SnapshotWatcherFactory, Watcher};

/// Anything that can be polled for changes since its previous poll.
pub trait ChangeDetector {
    /// Changes since the previous call (or since construction).
    ///
    /// Returning [`PollwatchError::Interrupted`] asks the driving loop to
    /// stop; any other error is fatal for the loop.
    ///
    /// [`PollwatchError::Interrupted`]: crate::errors::PollwatchError::Interrupted
    fn check(&mut self) -> Result<ChangeSet>;

    /// Number of files currently tracked, if the detector knows it.
    fn tracked_files(&self) -> Option<usize> {
        None
    }
}

impl<D: ChangeDetector + ?Sized> ChangeDetector for Box<D> {
    fn check(&mut self) -> Result<ChangeSet> {
        (**self).check()
    }

    fn tracked_files(&self) -> Option<usize> {
        (**self).tracked_files()
    }
}

/// Builds the detector a watch loop will drive.
pub trait WatcherFactory {
    type Detector: ChangeDetector;

    fn create(&self, root: &Path, filter: Arc<dyn PathFilter>) -> Result<Self::Detector>;
}

impl<D, F> WatcherFactory for F
where
    D: ChangeDetector,
    F: Fn(&Path, Arc<dyn PathFilter>) -> Result<D>,
{
    type Detector = D;

    fn create(&self, root: &Path, filter: Arc<dyn PathFilter>) -> Result<D> {
        self(root, filter)
    }
}
