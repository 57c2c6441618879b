// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tap and long-press recognition for the menu trigger.
//!
//! The host forwards pointer events that hit the trigger; the recognizer
//! reports the point at which the menu should open.

use serde::Deserialize;
use std::time::Duration;
use vello::kurbo::Point;

/// Maximum pointer travel (in pixels) for a press to still count as a tap or
/// long-press.
pub const MOVE_TOLERANCE: f64 = 10.0;

/// Gesture that opens the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OpenTrigger {
    /// Press and release without moving.
    #[default]
    Tap,
    /// Press and hold for `duration_ms` without moving.
    LongPress {
        /// Hold duration in milliseconds.
        duration_ms: u64,
    },
}

impl OpenTrigger {
    /// A long-press trigger with the given hold duration.
    pub fn long_press(duration: Duration) -> Self {
        OpenTrigger::LongPress {
            duration_ms: duration.as_millis() as u64,
        }
    }
}

/// A pointer event over the trigger, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed.
    Down(Point),
    /// Pointer moved while pressed.
    Move(Point),
    /// Pointer released.
    Up(Point),
    /// The platform cancelled the pointer sequence.
    Cancel,
}

/// Recognizes the configured [OpenTrigger] from raw pointer events.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    trigger: OpenTrigger,
    down: Option<Point>,
    current: Option<Point>,
    /// Time left until the long-press timer fires.
    remaining: Option<Duration>,
}

impl GestureRecognizer {
    /// Create a new recognizer for the given trigger.
    pub fn new(trigger: OpenTrigger) -> Self {
        Self {
            trigger,
            down: None,
            current: None,
            remaining: None,
        }
    }

    /// Whether a long-press timer is currently armed.
    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Feed a pointer event. Returns the open point when a tap is recognized.
    pub fn handle(&mut self, event: PointerEvent) -> Option<Point> {
        match event {
            PointerEvent::Down(point) => {
                self.down = Some(point);
                self.current = Some(point);
                if let OpenTrigger::LongPress { duration_ms } = self.trigger {
                    self.remaining = Some(Duration::from_millis(duration_ms));
                }
                None
            },
            PointerEvent::Move(point) => {
                if self.down.is_some() {
                    self.current = Some(point);
                }
                None
            },
            PointerEvent::Up(point) => {
                let down = self.down.take();
                self.current = None;

                match self.trigger {
                    OpenTrigger::Tap => down.filter(|down| within_tolerance(*down, point)).map(|_| point),
                    OpenTrigger::LongPress { .. } => {
                        // Released before the timer fired: no tap fallback.
                        if self.remaining.take().is_some() {
                            log::trace!("Long-press cancelled by pointer up");
                        }
                        None
                    },
                }
            },
            PointerEvent::Cancel => {
                self.cancel();
                None
            },
        }
    }

    /// Advance the long-press timer. Returns the press point when it fires and
    /// the pointer stayed within [MOVE_TOLERANCE].
    pub fn advance(&mut self, dt: Duration) -> Option<Point> {
        let remaining = self.remaining?;

        if remaining > dt {
            self.remaining = Some(remaining - dt);
            return None;
        }

        self.remaining = None;
        let down = self.down?;
        let current = self.current.unwrap_or(down);

        if within_tolerance(down, current) {
            Some(down)
        } else {
            log::trace!("Long-press rejected, pointer moved from {:?} to {:?}", down, current);
            None
        }
    }

    /// Drop any pressed pointer and armed timer.
    pub fn cancel(&mut self) {
        self.down = None;
        self.current = None;
        self.remaining = None;
    }
}

fn within_tolerance(a: Point, b: Point) -> bool {
    a.distance(b) < MOVE_TOLERANCE
}
