use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use pollwatch::engine::{CancelToken, Clock};

/// Deterministic clock for the blocking watch loop.
///
/// `sleep` records the requested duration and advances virtual time instead
/// of blocking. Clones share the same timeline, so a detector holding a clone
/// can simulate slow checks with [`ManualClock::advance`].
#[derive(Debug, Clone)]
pub struct ManualClock {
    state: Arc<Mutex<ClockState>>,
}

#[derive(Debug)]
struct ClockState {
    now: Instant,
    sleeps: Vec<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ClockState {
                now: Instant::now(),
                sleeps: Vec::new(),
            })),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.state.lock().unwrap().now += by;
    }

    /// Every duration passed to `sleep`, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.state.lock().unwrap().sleeps.clone()
    }

    pub fn sleep_count(&self) -> usize {
        self.state.lock().unwrap().sleeps.len()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.state.lock().unwrap().now
    }

    fn sleep(&mut self, duration: Duration, cancel: &CancelToken) -> bool {
        {
            let mut state = self.state.lock().unwrap();
            state.sleeps.push(duration);
            state.now += duration;
        }
        !cancel.is_cancelled()
    }
}
