// src/engine/runtime.rs

use std::fmt;
use std::pin::Pin;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio::time::Sleep;
use tracing::{debug, info, warn};

use crate::changes::ChangeSet;
use crate::engine::core::{log_emission, Debouncer, LoopState};
use crate::engine::{CancelToken, WatchOptions};
use crate::errors::{PollwatchError, Result};
use crate::watch::ChangeDetector;

/// Async counterpart of [`Watch`](super::Watch), driven on Tokio.
///
/// Each `check()` runs on the blocking thread pool so large trees do not
/// stall the runtime. Sleeps race the [`CancelToken`], so cancellation ends
/// the stream without waiting for the current sleep to finish.
///
/// `next` is cancel-safe: if its future is dropped mid-sleep or mid-check,
/// the sleep deadline and the running check are kept and the following call
/// resumes them.
pub struct AsyncWatch<D> {
    /// `None` while a check is in flight.
    detector: Option<D>,
    in_flight: Option<JoinHandle<CheckOutcome<D>>>,
    sleep: Option<Pin<Box<Sleep>>>,
    core: Debouncer,
    cancel: CancelToken,
    pending_sleep: Option<Duration>,
    finished: bool,
}

/// Detector handed back from the blocking pool, with its result and cost.
type CheckOutcome<D> = (D, Result<ChangeSet>, Duration);

impl<D> fmt::Debug for AsyncWatch<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncWatch")
            .field("core", &self.core)
            .field("checking", &self.in_flight.is_some())
            .field("sleeping", &self.sleep.is_some())
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl<D> AsyncWatch<D>
where
    D: ChangeDetector + Send + 'static,
{
    pub fn new(detector: D, options: &WatchOptions, cancel: CancelToken) -> Self {
        Self {
            detector: Some(detector),
            in_flight: None,
            sleep: None,
            core: Debouncer::new(options, Instant::now()),
            cancel,
            pending_sleep: None,
            finished: false,
        }
    }

    pub fn state(&self) -> LoopState {
        self.core.state()
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Wait for the next debounced batch.
    ///
    /// Returns `None` once the stream has ended (cancelled, interrupted, or
    /// after a fatal error was returned).
    pub async fn next(&mut self) -> Option<Result<ChangeSet>> {
        if self.finished {
            return None;
        }

        loop {
            if self.in_flight.is_none() {
                if let Some(pause) = self.pending_sleep.take() {
                    self.sleep = Some(Box::pin(tokio::time::sleep(pause)));
                }
                if let Some(sleep) = self.sleep.as_mut() {
                    let cancel = self.cancel.clone();
                    let cancelled = tokio::select! {
                        _ = sleep.as_mut() => false,
                        _ = cancel.cancelled() => true,
                    };
                    self.sleep = None;
                    if cancelled {
                        return self.stop("cancelled while sleeping");
                    }
                }
                if self.cancel.is_cancelled() {
                    return self.stop("cancelled");
                }

                let Some(mut detector) = self.detector.take() else {
                    return self.stop("detector unavailable");
                };
                self.in_flight = Some(tokio::task::spawn_blocking(move || {
                    let started = Instant::now();
                    let result = detector.check();
                    (detector, result, started.elapsed())
                }));
            }

            let Some(handle) = self.in_flight.as_mut() else {
                continue;
            };
            let joined = handle.await;
            self.in_flight = None;
            let now = Instant::now();

            let (result, check_time) = match joined {
                Ok((detector, result, check_time)) => {
                    self.detector = Some(detector);
                    (result, check_time)
                }
                Err(join_err) => {
                    warn!(error = %join_err, "change detector task failed");
                    self.core.cancel();
                    self.finished = true;
                    return Some(Err(PollwatchError::Other(anyhow::anyhow!(
                        "change detector task failed: {join_err}"
                    ))));
                }
            };

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
                let files = self.detector.as_ref().and_then(|d| d.tracked_files());
                log_emission(&emission, check_time, files);
                return Some(Ok(emission.changes));
            }
        }
    }

    fn stop(&mut self, reason: &str) -> Option<Result<ChangeSet>> {
        if !self.finished {
            info!(reason, "async watch stopped");
        }
        self.core.cancel();
        self.sleep = None;
        self.finished = true;
        None
    }
}
