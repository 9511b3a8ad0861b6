//! Trailing-edge throttle driven by an external clock.
//!
//! The first `schedule` in a quiet period arms a deadline `interval` later;
//! further calls before it fires are absorbed. `poll` fires exactly once per
//! armed deadline. The owner cancels it on teardown.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    deadline: Option<Duration>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Arm the throttle if it is idle. Returns `true` if this call armed it.
    pub fn schedule(&mut self, now: Duration) -> bool {
        if self.deadline.is_some() {
            return false;
        }
        self.deadline = Some(now + self.interval);
        true
    }

    /// Returns `true` once when the armed deadline has passed, disarming it.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }
}
