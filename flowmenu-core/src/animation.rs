// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Menu animation
//!
//! Easing curves and the progress driver moving the menu between its collapsed
//! (0.0) and expanded (1.0) layout.
//!
//! The driver is advanced explicitly with the frame delta, so it works with any
//! host frame clock and stays deterministic in tests.

use serde::Deserialize;
use std::time::Duration;

/// Easing curve applied to the linear progress.
///
/// All curves map 0.0 to 0.0 and 1.0 to 1.0 and stay inside that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// No easing.
    Linear,
    /// Cubic acceleration.
    EaseIn,
    /// Cubic deceleration.
    #[default]
    EaseOut,
    /// Cubic acceleration, then deceleration.
    EaseInOut,
    /// Quadratic deceleration.
    Decelerate,
}

impl Easing {
    /// Apply the curve to `t`, clamped to `[0.0, 1.0]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            },
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Linear interpolation between two values.
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Motion status of a [ProgressController].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationStatus {
    /// At rest at 0.0.
    #[default]
    Dismissed,
    /// Moving towards 1.0.
    Forward,
    /// Moving towards 0.0.
    Reverse,
    /// At rest at 1.0.
    Completed,
}

/// Drives the menu progress between 0.0 and 1.0.
///
/// Reversing mid-flight keeps the current value and only flips the direction,
/// so an interrupted transition never jumps.
#[derive(Debug, Clone)]
pub struct ProgressController {
    value: f64,
    status: AnimationStatus,
    forward_duration: Duration,
    reverse_duration: Duration,
    easing: Easing,
}

impl ProgressController {
    /// Create a new controller at rest at 0.0.
    pub fn new(forward_duration: Duration, reverse_duration: Duration, easing: Easing) -> Self {
        Self {
            value: 0.0,
            status: AnimationStatus::Dismissed,
            forward_duration,
            reverse_duration,
            easing,
        }
    }

    /// Linear progress.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Eased progress.
    pub fn progress(&self) -> f64 {
        self.easing.apply(self.value)
    }

    /// Current motion status.
    pub fn status(&self) -> AnimationStatus {
        self.status
    }

    /// Whether the controller is moving.
    pub fn is_animating(&self) -> bool {
        matches!(self.status, AnimationStatus::Forward | AnimationStatus::Reverse)
    }

    /// Start (or resume) moving towards 1.0.
    ///
    /// Returns the new status if it changed.
    pub fn forward(&mut self) -> Option<AnimationStatus> {
        if self.value >= 1.0 || self.forward_duration.is_zero() {
            self.value = 1.0;
            return self.set_status(AnimationStatus::Completed);
        }
        self.set_status(AnimationStatus::Forward)
    }

    /// Start (or resume) moving towards 0.0.
    ///
    /// Returns the new status if it changed.
    pub fn reverse(&mut self) -> Option<AnimationStatus> {
        if self.value <= 0.0 || self.reverse_duration.is_zero() {
            self.value = 0.0;
            return self.set_status(AnimationStatus::Dismissed);
        }
        self.set_status(AnimationStatus::Reverse)
    }

    /// Advance by `dt`. Returns the new status if the motion finished.
    pub fn tick(&mut self, dt: Duration) -> Option<AnimationStatus> {
        match self.status {
            AnimationStatus::Forward => {
                self.value = (self.value + step(dt, self.forward_duration)).min(1.0);
                if self.value >= 1.0 {
                    return self.set_status(AnimationStatus::Completed);
                }
            },
            AnimationStatus::Reverse => {
                self.value = (self.value - step(dt, self.reverse_duration)).max(0.0);
                if self.value <= 0.0 {
                    return self.set_status(AnimationStatus::Dismissed);
                }
            },
            AnimationStatus::Dismissed | AnimationStatus::Completed => {},
        }
        None
    }

    /// Freeze the controller at its current value.
    pub fn stop(&mut self) {
        self.status = if self.value >= 1.0 {
            AnimationStatus::Completed
        } else {
            AnimationStatus::Dismissed
        };
    }

    /// Jump back to 0.0 without animating.
    pub fn reset(&mut self) {
        self.value = 0.0;
        self.status = AnimationStatus::Dismissed;
    }

    fn set_status(&mut self, status: AnimationStatus) -> Option<AnimationStatus> {
        if self.status == status {
            None
        } else {
            self.status = status;
            Some(status)
        }
    }
}

fn step(dt: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        1.0
    } else {
        dt.as_secs_f64() / duration.as_secs_f64()
    }
}
