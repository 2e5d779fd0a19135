// src/engine/core.rs

//! Pure debounce state machine.
//!
//! [`Debouncer`] consumes the result of each poll and decides whether the
//! accumulated changes should be emitted yet. It never sleeps, reads a clock
//! or touches the filesystem: the shells in [`super::blocking`] and
//! [`super::runtime`] pass in timestamps and perform the sleeps it asks for.
//!
//! States:
//! - `Polling`: nothing pending.
//! - `Accumulating`: changes pending, debounce window still open.
//! - `Cancelled`: terminal.
//!
//! Emitting is the transient step between `Accumulating` and `Polling`.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::changes::ChangeSet;
use crate::engine::WatchOptions;

/// Sleep between polls is this multiple of the last check's duration, so a
/// tree that takes 10ms to scan is polled at most every 200ms.
pub const CHECK_COST_MULTIPLIER: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Polling,
    Accumulating,
    Cancelled,
}

/// One batch handed to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub changes: ChangeSet,
    /// Time since the cycle started (previous emission or loop start).
    pub elapsed: Duration,
    /// Polls performed during the cycle.
    pub polls: usize,
}

#[derive(Debug)]
pub struct Debouncer {
    debounce: Duration,
    min_sleep: Duration,
    state: LoopState,
    pending: ChangeSet,
    cycle_started: Instant,
    first_change_at: Option<Instant>,
    polls: usize,
    last_check: Duration,
}

impl Debouncer {
    pub fn new(options: &WatchOptions, now: Instant) -> Self {
        Self {
            debounce: options.debounce,
            min_sleep: options.min_sleep,
            state: LoopState::Polling,
            pending: ChangeSet::new(),
            cycle_started: now,
            first_change_at: None,
            polls: 0,
            last_check: Duration::ZERO,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn pending(&self) -> &ChangeSet {
        &self.pending
    }

    /// Feed the result of one poll.
    ///
    /// `check_time` is how long the poll took and `now` is when it finished.
    /// Returns the batch to emit once the debounce window, measured from the
    /// first non-empty poll of the cycle, has elapsed.
    pub fn record(&mut self, changes: ChangeSet, check_time: Duration, now: Instant) -> Option<Emission> {
        if self.state == LoopState::Cancelled {
            return None;
        }

        self.polls += 1;
        self.last_check = check_time;

        if !changes.is_empty() {
            if self.first_change_at.is_none() {
                self.first_change_at = Some(now);
            }
            self.pending.merge(changes);
            self.state = LoopState::Accumulating;
        }

        let first = self.first_change_at?;
        if now.saturating_duration_since(first) < self.debounce {
            return None;
        }

        let emission = Emission {
            changes: std::mem::take(&mut self.pending),
            elapsed: now.saturating_duration_since(self.cycle_started),
            polls: self.polls,
        };
        self.cycle_started = now;
        self.first_change_at = None;
        self.polls = 0;
        self.state = LoopState::Polling;
        Some(emission)
    }

    /// How long to wait before the next poll.
    pub fn next_sleep(&self) -> Duration {
        self.min_sleep
            .max(self.last_check.saturating_mul(CHECK_COST_MULTIPLIER))
    }

    /// Enter the terminal state, dropping anything pending.
    pub fn cancel(&mut self) {
        if self.state != LoopState::Cancelled {
            debug!(dropped = self.pending.len(), "debounce loop cancelled");
        }
        self.pending.clear();
        self.first_change_at = None;
        self.state = LoopState::Cancelled;
    }

    pub fn last_check(&self) -> Duration {
        self.last_check
    }
}

/// Debug-level record of an emitted batch.
pub(crate) fn log_emission(emission: &Emission, check_time: Duration, files: Option<usize>) {
    debug!(
        elapsed_ms = emission.elapsed.as_millis() as u64,
        check_ms = check_time.as_millis() as u64,
        polls = emission.polls,
        files,
        changes = emission.changes.len(),
        "emitting change batch"
    );
}
