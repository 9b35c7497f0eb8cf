//! Debounce - Trailing-edge coalescing of repeated triggers.
//!
//! Every `schedule()` pushes the deadline out to `now + delay`; the debouncer
//! fires once, on the first `poll()` at or past the deadline. Nothing runs on
//! its own: the owner polls from its frame tick, so a fire always happens on
//! the owner's thread between other events.
//!
//! # Example
//!
//! ```ignore
//! let mut remeasure = Debouncer::new(Duration::from_millis(200));
//!
//! remeasure.schedule(now);
//! remeasure.schedule(now + Duration::from_millis(150)); // resets the window
//!
//! assert!(!remeasure.poll(now + Duration::from_millis(300)));
//! assert!(remeasure.poll(now + Duration::from_millis(350)));
//! ```

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
    fired: u64,
    disposed: bool,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            fired: 0,
            disposed: false,
        }
    }

    /// Schedule a fire `delay` after `now`, replacing any pending deadline.
    ///
    /// Ignored once disposed.
    pub fn schedule(&mut self, now: Instant) {
        if self.disposed {
            return;
        }
        self.deadline = Some(now + self.delay);
    }

    /// Drop the pending fire, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` exactly once per quiet window, when `now` has reached
    /// the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if !self.disposed && now >= deadline => {
                self.deadline = None;
                self.fired += 1;
                true
            }
            _ => false,
        }
    }

    /// Cancel and refuse any further scheduling.
    pub fn dispose(&mut self) {
        self.deadline = None;
        self.disposed = true;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// When the pending fire is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Number of times the debouncer has fired.
    pub fn fire_count(&self) -> u64 {
        self.fired
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(200);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_after_quiet_window() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.schedule(t0);
        assert!(debouncer.is_pending());
        assert!(!debouncer.poll(t0 + ms(199)));
        assert!(debouncer.poll(t0 + ms(200)));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.fire_count(), 1);
    }

    #[test]
    fn test_burst_coalesces_into_one_fire() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        for i in 0..5 {
            debouncer.schedule(t0 + ms(i * 50));
        }

        // Last schedule at 200ms: deadline 400ms
        assert!(!debouncer.poll(t0 + ms(350)));
        assert!(debouncer.poll(t0 + ms(400)));
        assert!(!debouncer.poll(t0 + ms(1000)));
        assert_eq!(debouncer.fire_count(), 1);
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.schedule(t0);
        debouncer.cancel();

        assert!(!debouncer.poll(t0 + ms(500)));
        assert_eq!(debouncer.fire_count(), 0);
    }

    #[test]
    fn test_dispose_blocks_fire_and_schedule() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.schedule(t0);
        debouncer.dispose();
        assert!(!debouncer.poll(t0 + ms(500)));

        debouncer.schedule(t0 + ms(500));
        assert!(!debouncer.is_pending());
        assert!(debouncer.is_disposed());
    }

    #[test]
    fn test_reschedule_after_fire() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.schedule(t0);
        assert!(debouncer.poll(t0 + ms(200)));

        debouncer.schedule(t0 + ms(300));
        assert_eq!(debouncer.deadline(), Some(t0 + ms(500)));
        assert!(debouncer.poll(t0 + ms(500)));
        assert_eq!(debouncer.fire_count(), 2);
    }
}
