// src/engine/mod.rs

//! Debounced polling loops.
//!
//! This module ties together:
//! - a change detector (usually a [`Watcher`](crate::watch::Watcher))
//! - the debounce core that coalesces polls into batches
//! - adaptive sleeping between polls
//! - cooperative cancellation
//!
//! The pure state machine lives in [`core`]; the blocking iterator shell is
//! [`blocking`] and the Tokio shell is [`runtime`].

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::{PollwatchError, Result};
use crate::filter::PathFilter;
use crate::watch::WatcherFactory;

pub mod blocking;
pub mod cancel;
pub mod clock;
pub mod core;
pub mod runtime;

pub use blocking::Watch;
pub use cancel::CancelToken;
pub use clock::{Clock, SystemClock};
pub use self::core::{Debouncer, Emission, LoopState, CHECK_COST_MULTIPLIER};
pub use runtime::AsyncWatch;

pub const DEFAULT_DEBOUNCE_MS: u64 = 400;
pub const DEFAULT_MIN_SLEEP_MS: u64 = 50;

/// Timing knobs shared by the blocking and async loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    /// How long changes are coalesced, counted from the first poll that
    /// found any.
    pub debounce: Duration,
    /// Lower bound on the pause between two polls.
    pub min_sleep: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self::from_millis(DEFAULT_DEBOUNCE_MS, DEFAULT_MIN_SLEEP_MS)
    }
}

impl WatchOptions {
    pub fn from_millis(debounce_ms: u64, min_sleep_ms: u64) -> Self {
        Self {
            debounce: Duration::from_millis(debounce_ms),
            min_sleep: Duration::from_millis(min_sleep_ms),
        }
    }

    /// Both durations must be non-zero.
    pub fn validate(&self) -> Result<()> {
        if self.debounce.is_zero() {
            return Err(PollwatchError::ConfigError(
                "debounce must be > 0 ms".to_string(),
            ));
        }
        if self.min_sleep.is_zero() {
            return Err(PollwatchError::ConfigError(
                "min_sleep must be > 0 ms".to_string(),
            ));
        }
        Ok(())
    }
}

/// Watch `root` with a blocking iterator of debounced change batches.
///
/// The detector is built by `factory` (pass [`SnapshotWatcherFactory`] for
/// the standard snapshot watcher). Construction errors, such as a missing
/// root, are returned here rather than from the iterator.
///
/// [`SnapshotWatcherFactory`]: crate::watch::SnapshotWatcherFactory
pub fn watch<F: WatcherFactory>(
    root: impl AsRef<Path>,
    filter: Arc<dyn PathFilter>,
    options: &WatchOptions,
    factory: &F,
    cancel: CancelToken,
) -> Result<Watch<F::Detector>> {
    options.validate()?;
    let detector = factory.create(root.as_ref(), filter)?;
    Ok(Watch::new(detector, options, cancel, SystemClock))
}

/// Async variant of [`watch`].
pub fn awatch<F>(
    root: impl AsRef<Path>,
    filter: Arc<dyn PathFilter>,
    options: &WatchOptions,
    factory: &F,
    cancel: CancelToken,
) -> Result<AsyncWatch<F::Detector>>
where
    F: WatcherFactory,
    F::Detector: Send + 'static,
{
    options.validate()?;
    let detector = factory.create(root.as_ref(), filter)?;
    Ok(AsyncWatch::new(detector, options, cancel))
}
