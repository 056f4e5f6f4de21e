//! Single-slot debounce timer.
//!
//! The timer is a deadline, not a scheduled task. Arming replaces the
//! previous deadline, so at most one timer is ever outstanding and a
//! superseded one has nothing left to fire.

use std::time::{Duration, Instant};

/// Debounce deadline with a fixed delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    /// Create a disarmed timer.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm (or re-arm) the timer to fire `delay` after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Disarm the timer.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Pending deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fire the timer if its deadline has passed.
    ///
    /// Returns `true` exactly once per arming; the timer is disarmed
    /// afterwards.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(600);

    #[test]
    fn new_timer_is_disarmed() {
        let mut timer = DebounceTimer::new(DELAY);
        assert!(!timer.is_armed());
        assert!(!timer.fire(Instant::now() + DELAY * 10));
    }

    #[test]
    fn fires_only_after_deadline() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new(DELAY);
        timer.arm(start);

        assert!(!timer.fire(start + Duration::from_millis(599)));
        assert!(timer.fire(start + DELAY));
        assert!(!timer.is_armed());
    }

    #[test]
    fn fires_once_per_arming() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new(DELAY);
        timer.arm(start);

        assert!(timer.fire(start + DELAY));
        assert!(!timer.fire(start + DELAY * 2));
    }

    #[test]
    fn rearming_supersedes_previous_deadline() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new(DELAY);
        timer.arm(start);
        timer.arm(start + Duration::from_millis(400));

        // The first deadline has passed but was replaced.
        assert!(!timer.fire(start + DELAY));
        assert!(timer.fire(start + Duration::from_millis(1000)));
    }

    #[test]
    fn cancel_disarms() {
        let start = Instant::now();
        let mut timer = DebounceTimer::new(DELAY);
        timer.arm(start);
        timer.cancel();

        assert_eq!(timer.deadline(), None);
        assert!(!timer.fire(start + DELAY));
    }
}
