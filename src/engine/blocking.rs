// src/engine/blocking.rs

//! Blocking, pull-driven watch loop.

use std::fmt;

use tracing::{debug, info};

use crate::changes::ChangeSet;
use crate::engine::clock::{Clock, SystemClock};
use crate::engine::core::{log_emission, Debouncer, LoopState};
use crate::engine::{CancelToken, WatchOptions};
use crate::errors::{PollwatchError, Result};
use crate::watch::ChangeDetector;

/// Iterator of debounced change batches.
///
/// Nothing is polled until `next` is called, and each call runs polls (with
/// sleeps in between) only until one batch is ready. The iterator ends,
/// without an error, when the [`CancelToken`] fires or the detector returns
/// [`PollwatchError::Interrupted`]. Any other detector error is yielded once
/// and then the iterator ends.
pub struct Watch<D, C = SystemClock> {
    detector: D,
    core: Debouncer,
    clock: C,
    cancel: CancelToken,
    /// Sleep owed before the next poll; `None` before the first poll.
    pending_sleep: Option<std::time::Duration>,
    finished: bool,
}

impl<D, C> fmt::Debug for Watch<D, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watch")
            .field("core", &self.core)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl<D: ChangeDetector, C: Clock> Watch<D, C> {
    pub fn new(detector: D, options: &WatchOptions, cancel: CancelToken, clock: C) -> Self {
        let core = Debouncer::new(options, clock.now());
        Self {
            detector,
            core,
            clock,
            cancel,
            pending_sleep: None,
            finished: false,
        }
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn state(&self) -> LoopState {
        self.core.state()
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    fn stop(&mut self, reason: &str) -> Option<Result<ChangeSet>> {
        if !self.finished {
            info!(reason, "watch loop stopped");
        }
        self.core.cancel();
        self.finished = true;
        None
    }
}

impl<D: ChangeDetector, C: Clock> Iterator for Watch<D, C> {
    type Item = Result<ChangeSet>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(pause) = self.pending_sleep.take() {
                if !self.clock.sleep(pause, &self.cancel) {
                    return self.stop("cancelled while sleeping");
                }
            }
            if self.cancel.is_cancelled() {
                return self.stop("cancelled");
            }

            let started = self.clock.now();
            let result = self.detector.check();
            let now = self.clock.now();
            let check_time = now.saturating_duration_since(started);

            let changes = match result {
                Ok(changes) => changes,
                Err(PollwatchError::Interrupted) => return self.stop("detector interrupted"),
                Err(err) => {
                    debug!(error = %err, "check failed; ending watch");
                    self.core.cancel();
                    self.finished = true;
                    return Some(Err(err));
                }
            };

            let emission = self.core.record(changes, check_time, now);
            self.pending_sleep = Some(self.core.next_sleep());

            if let Some(emission) = emission {
                log_emission(&emission, check_time, self.detector.tracked_files());
                return Some(Ok(emission.changes));
            }
        }
    }
}
