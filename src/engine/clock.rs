// src/engine/clock.rs

use std::time::{Duration, Instant};

use crate::engine::CancelToken;

/// Time source and sleeper for the blocking watch loop.
///
/// Production code uses [`SystemClock`]; tests can substitute a manual clock
/// that records every requested sleep and advances virtual time instead of
/// blocking.
pub trait Clock {
    fn now(&self) -> Instant;

    /// Pause for `duration` unless `cancel` fires first.
    ///
    /// Returns `false` if the loop should stop.
    fn sleep(&mut self, duration: Duration, cancel: &CancelToken) -> bool;
}

/// Wall clock; sleeps wait on the cancel token so cancellation cuts them short.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration, cancel: &CancelToken) -> bool {
        !cancel.wait_timeout(duration)
    }
}
