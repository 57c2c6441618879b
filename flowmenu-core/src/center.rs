// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolution of the point the menu unfolds around.

use nalgebra::Vector2;
use serde::Deserialize;
use vello::kurbo::{Point, Rect};

/// Where the menu center comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterStrategy {
    /// The middle of the screen.
    ScreenCenter,
    /// The center of the trigger's bounding box.
    #[default]
    TriggerBounds,
    /// The point the user touched. Falls back to the trigger bounds for
    /// programmatic opens without a touch.
    TouchPoint,
}

/// Center configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CenterConfig {
    /// Source of the center point.
    pub strategy: CenterStrategy,
    /// Offset added to the resolved point.
    pub offset: Vector2<f64>,
}

impl Default for CenterConfig {
    fn default() -> Self {
        Self {
            strategy: CenterStrategy::default(),
            offset: Vector2::zeros(),
        }
    }
}

/// Resolve the center point of an open cycle.
///
/// Precedence: touch point (if the strategy asks for it and a touch happened),
/// then screen center (if configured), then the trigger bounds. Without trigger
/// bounds the screen center is used.
pub fn resolve_center(
    config: &CenterConfig,
    anchor_bounds: Option<Rect>,
    screen_size: Vector2<f64>,
    touch: Option<Point>,
) -> Vector2<f64> {
    let screen_center = screen_size / 2.0;

    let base = match (config.strategy, touch) {
        (CenterStrategy::TouchPoint, Some(point)) => Vector2::new(point.x, point.y),
        (CenterStrategy::ScreenCenter, _) => screen_center,
        _ => match anchor_bounds {
            Some(bounds) => {
                let center = bounds.center();
                Vector2::new(center.x, center.y)
            },
            None => {
                log::warn!("No trigger bounds available, centering menu on screen");
                screen_center
            },
        },
    };

    base + config.offset
}
