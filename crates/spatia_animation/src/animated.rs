//! Animated values
//!
//! An [`AnimatedValue`] remembers where a transition started, where it is
//! going and when it should arrive. Nothing ticks it: callers sample
//! [`AnimatedValue::value`] with the current time whenever they need the
//! number, and the transition resolves itself from the clock.
//!
//! ```rust
//! use spatia_animation::AnimatedFloat;
//!
//! let mut depth = AnimatedFloat::new(0.0, 0.0);
//! depth.animate_to(1.0, 0.2, 0.0);
//!
//! assert!(depth.is_animating());
//! assert_eq!(depth.value(0.1), 0.5);
//! assert_eq!(depth.value(0.3), 1.0);
//! assert!(!depth.is_animating());
//! ```

use std::fmt;

use tracing::trace;

use crate::interpolate::{Interpolator, Lerp};

/// A value that transitions linearly in time between a start and a target.
///
/// Times are seconds from a monotonic clock; callers never pass a `now`
/// earlier than one they passed before.
#[derive(Clone)]
pub struct AnimatedValue<T> {
    start_value: T,
    target_value: T,
    start_time: f64,
    target_time: f64,
    animating: bool,
    interpolate: Interpolator<T>,
}

/// The scalar case used for depth planes and opacity.
pub type AnimatedFloat = AnimatedValue<f32>;

impl<T> AnimatedValue<T>
where
    T: Lerp + Clone + PartialEq,
{
    /// Create a resting value using the type's linear interpolation.
    pub fn new(value: T, now: f64) -> Self {
        Self::with_interpolator(value, now, T::lerp)
    }
}

impl<T> AnimatedValue<T>
where
    T: Clone + PartialEq,
{
    /// Create a resting value with a custom interpolation function.
    pub fn with_interpolator(value: T, now: f64, interpolate: Interpolator<T>) -> Self {
        Self {
            start_value: value.clone(),
            target_value: value,
            start_time: now,
            target_time: now,
            animating: false,
            interpolate,
        }
    }

    /// Sample the value at `now`.
    ///
    /// Once `now` reaches the target time the animation ends here: the flag is
    /// cleared and the exact target is returned.
    pub fn value(&mut self, now: f64) -> T {
        if !self.animating {
            return self.target_value.clone();
        }

        if now >= self.target_time {
            self.animating = false;
            return self.target_value.clone();
        }

        // target_time > now >= start_time here, so the span is non-zero.
        let elapsed = (now - self.start_time) / (self.target_time - self.start_time);
        (self.interpolate)(&self.start_value, &self.target_value, elapsed as f32)
    }

    /// Snap to `value` at `now`.
    ///
    /// The animating flag is left alone; an in-flight animation ends on the
    /// next [`value`](Self::value) call because its target time is now past.
    pub fn set_value(&mut self, value: T, now: f64) {
        self.target_value = value;
        self.target_time = now;
    }

    /// Start a transition from the currently shown value to `value`.
    ///
    /// Animating to the value already shown is an instant set and leaves the
    /// value at rest. Negative durations are treated as zero.
    pub fn animate_to(&mut self, value: T, duration: f64, now: f64) {
        self.start_value = self.value(now);

        if value == self.start_value {
            self.set_value(value, now);
            self.animating = false;
            return;
        }

        self.target_value = value;
        self.start_time = now;
        self.target_time = now + duration.max(0.0);
        self.animating = true;
        trace!(
            start = self.start_time,
            target = self.target_time,
            "animation started"
        );
    }

    /// Whether a transition is in flight.
    ///
    /// This reads the flag only. After the target time has passed it keeps
    /// reporting `true` until the next [`value`](Self::value) call.
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// The value the current transition ends at
    pub fn target(&self) -> &T {
        &self.target_value
    }

    /// When the current transition ends
    pub fn target_time(&self) -> f64 {
        self.target_time
    }

    /// Seconds left until the target is reached (zero when at rest)
    pub fn remaining(&self, now: f64) -> f64 {
        if self.animating {
            (self.target_time - now).max(0.0)
        } else {
            0.0
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for AnimatedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("start_value", &self.start_value)
            .field("target_value", &self.target_value)
            .field("start_time", &self.start_time)
            .field("target_time", &self.target_time)
            .field("animating", &self.animating)
            .finish()
    }
}
