//! Animated Values - Signals that move toward a target over time.
//!
//! An `AnimatedValue` wraps a `Signal<f32>`. `animate_to` starts a linear
//! tween from the current value; `tick` advances it and writes the signal, so
//! anything reading the signal in a derived or effect follows along.
//!
//! A zero duration sets the value immediately, without waiting for a tick.
//!
//! # Example
//!
//! ```ignore
//! use spark_collapsible::state::animate::AnimatedValue;
//!
//! let header = AnimatedValue::new(0.0);
//! header.animate_to(40.0, Duration::ZERO, now);      // snaps
//! header.animate_to(60.0, Duration::from_millis(10), now);
//! header.tick(now + Duration::from_millis(5));       // 50.0
//! ```

use std::cell::RefCell;
use std::time::{Duration, Instant};

use spark_signals::{signal, Signal};

// =============================================================================
// TWEEN
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
}

impl Tween {
    /// Value at `now`, and whether the tween has finished.
    fn sample(&self, now: Instant) -> (f32, bool) {
        let elapsed = now.saturating_duration_since(self.start);
        if elapsed >= self.duration {
            return (self.to, true);
        }
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        (self.from + (self.to - self.from) * progress, false)
    }
}

// =============================================================================
// ANIMATED VALUE
// =============================================================================

pub struct AnimatedValue {
    value: Signal<f32>,
    tween: RefCell<Option<Tween>>,
}

impl AnimatedValue {
    pub fn new(initial: f32) -> Self {
        Self {
            value: signal(initial),
            tween: RefCell::new(None),
        }
    }

    /// Start moving toward `target`. Replaces any running tween.
    pub fn animate_to(&self, target: f32, duration: Duration, now: Instant) {
        if duration.is_zero() {
            self.tween.borrow_mut().take();
            self.value.set(target);
            return;
        }

        let from = self.value.get();
        *self.tween.borrow_mut() = Some(Tween {
            from,
            to: target,
            start: now,
            duration,
        });
    }

    /// Advance the running tween. Returns `true` while still animating.
    pub fn tick(&self, now: Instant) -> bool {
        let Some(tween) = *self.tween.borrow() else {
            return false;
        };

        let (value, done) = tween.sample(now);
        if done {
            self.tween.borrow_mut().take();
        }
        self.value.set(value);
        !done
    }

    /// Current value (tracked when read inside a derived or effect).
    pub fn get(&self) -> f32 {
        self.value.get()
    }

    /// Target of the running tween, or the current value when idle.
    pub fn target(&self) -> f32 {
        match *self.tween.borrow() {
            Some(tween) => tween.to,
            None => self.value.get(),
        }
    }

    pub fn is_animating(&self) -> bool {
        self.tween.borrow().is_some()
    }

    /// The underlying signal.
    pub fn signal(&self) -> Signal<f32> {
        self.value.clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================
