use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pollwatch::engine::CancelToken;
use pollwatch::errors::{PollwatchError, Result};
use pollwatch::{Change, ChangeDetector, ChangeSet};

use crate::clock::ManualClock;

/// What a [`ScriptedDetector`] does once its script runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhenExhausted {
    /// Return `PollwatchError::Interrupted`, ending the watch loop.
    Interrupt,
    /// Keep returning empty change sets.
    Idle,
}

/// Change detector that replays a fixed list of `check()` results.
pub struct ScriptedDetector {
    script: VecDeque<Result<ChangeSet>>,
    when_exhausted: WhenExhausted,
    checks: Arc<AtomicUsize>,
    cost: Option<(ManualClock, Duration)>,
    delay: Option<Duration>,
    cancel_at: Option<(usize, CancelToken)>,
    files: Option<usize>,
}

impl ScriptedDetector {
    pub fn new(script: impl IntoIterator<Item = ChangeSet>) -> Self {
        Self::from_results(script.into_iter().map(Ok))
    }

    pub fn from_results(script: impl IntoIterator<Item = Result<ChangeSet>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            when_exhausted: WhenExhausted::Interrupt,
            checks: Arc::new(AtomicUsize::new(0)),
            cost: None,
            delay: None,
            cancel_at: None,
            files: None,
        }
    }

    pub fn idle_when_exhausted(mut self) -> Self {
        self.when_exhausted = WhenExhausted::Idle;
        self
    }

    /// Advance `clock` by `cost` on every check.
    pub fn with_check_cost(mut self, clock: ManualClock, cost: Duration) -> Self {
        self.cost = Some((clock, cost));
        self
    }

    /// Block the calling thread for `delay` on every check, like a slow walk.
    pub fn with_check_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Cancel `token` while performing the `nth` check (1-based).
    pub fn cancel_on_check(mut self, nth: usize, token: CancelToken) -> Self {
        self.cancel_at = Some((nth, token));
        self
    }

    pub fn with_tracked_files(mut self, files: usize) -> Self {
        self.files = Some(files);
        self
    }

    /// Shared counter of `check()` calls.
    pub fn check_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.checks)
    }
}

impl ChangeDetector for ScriptedDetector {
    fn check(&mut self) -> Result<ChangeSet> {
        let n = self.checks.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some((clock, cost)) = &self.cost {
            clock.advance(*cost);
        }
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if let Some((nth, token)) = &self.cancel_at {
            if *nth == n {
                token.cancel();
            }
        }

        match self.script.pop_front() {
            Some(result) => result,
            None => match self.when_exhausted {
                WhenExhausted::Interrupt => Err(PollwatchError::Interrupted),
                WhenExhausted::Idle => Ok(ChangeSet::new()),
            },
        }
    }

    fn tracked_files(&self) -> Option<usize> {
        self.files
    }
}

/// Shorthand for a change set of `added` entries at the given paths.
pub fn added(paths: &[&str]) -> ChangeSet {
    paths.iter().map(|p| Change::added(*p)).collect()
}
