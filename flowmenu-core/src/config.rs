// SPDX-License-Identifier: MIT OR Apache-2.0

//! Menu configuration.
//!
//! Every section has sensible defaults, so a TOML file only needs to name what
//! it changes:
//!
//! ```toml
//! max_measure_ticks = 30
//!
//! [shape]
//! kind = "grid"
//! columns = 3
//! spacing_h = 8.0
//! spacing_v = 8.0
//!
//! [trigger]
//! kind = "long_press"
//! duration_ms = 400
//! ```

use crate::animation::{Easing, ProgressController};
use crate::boundary::BoundaryPolicy;
use crate::center::CenterConfig;
use crate::error::ConfigError;
use crate::geometry::Shape;
use crate::gesture::OpenTrigger;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variable scaling the default animation durations.
///
/// `0` disables animations, `2` makes them twice as slow.
pub const ANIMATION_SCALE_ENV: &str = "FLOWMENU_ANIMATION_SCALE";

/// Default number of ticks to wait for item measurements.
pub const DEFAULT_MAX_MEASURE_TICKS: u32 = 60;

/// Configuration of a flow menu.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Arrangement of the items.
    pub shape: Shape,
    /// Where the menu unfolds from.
    pub center: CenterConfig,
    /// Screen edge handling.
    pub boundary: BoundaryPolicy,
    /// Gesture opening the menu.
    pub trigger: OpenTrigger,
    /// Open and close animation.
    pub animation: AnimationConfig,
    /// Ticks to wait for all items to report a size before giving up.
    pub max_measure_ticks: u32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            shape: Shape::default(),
            center: CenterConfig::default(),
            boundary: BoundaryPolicy::default(),
            trigger: OpenTrigger::default(),
            animation: AnimationConfig::default(),
            max_measure_ticks: DEFAULT_MAX_MEASURE_TICKS,
        }
    }
}

impl MenuConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: MenuConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = smol::fs::read_to_string(path)
            .await
            .map_err(|err| ConfigError::Read(path.to_path_buf(), err))?;

        log::debug!("Loaded menu config from {}", path.display());
        Self::from_toml(&source)
    }

    /// Check value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_measure_ticks == 0 {
            return Err(invalid("max_measure_ticks", "must be at least 1"));
        }

        match self.shape {
            Shape::Grid { columns: 0, .. } => {
                return Err(invalid("shape.columns", "must be at least 1"));
            },
            Shape::Circle {
                start_angle,
                end_angle,
                radius_x,
                radius_y,
            } if ![start_angle, end_angle, radius_x, radius_y].iter().all(|v| v.is_finite()) => {
                return Err(invalid("shape", "circle parameters must be finite"));
            },
            Shape::Linear { angle, spacing, .. } if !angle.is_finite() || !spacing.is_finite() => {
                return Err(invalid("shape", "linear parameters must be finite"));
            },
            _ => {},
        }

        let scale = self.animation.collapsed_scale;
        if !scale.is_finite() || scale < 0.0 {
            return Err(invalid("animation.collapsed_scale", "must be a finite, non-negative number"));
        }

        if !self.animation.collapsed_rotation_deg.is_finite() {
            return Err(invalid("animation.collapsed_rotation_deg", "must be finite"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

/// Open and close animation settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Duration of the open transition.
    pub open_duration_ms: u64,
    /// Duration of the close transition.
    pub close_duration_ms: u64,
    /// Easing applied to the progress.
    pub easing: Easing,
    /// Item scale at progress 0.
    pub collapsed_scale: f64,
    /// Item rotation at progress 0, in degrees.
    pub collapsed_rotation_deg: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        // Set FLOWMENU_ANIMATION_SCALE=0 to disable animations, e.g. in screenshots.
        let scale = match std::env::var(ANIMATION_SCALE_ENV) {
            Ok(val) => match val.trim().parse::<f64>() {
                Ok(scale) if scale.is_finite() && scale >= 0.0 => scale,
                _ => {
                    log::warn!("Ignoring invalid {}={:?}", ANIMATION_SCALE_ENV, val);
                    1.0
                },
            },
            Err(_) => 1.0,
        };

        Self {
            open_duration_ms: (250.0 * scale).round() as u64,
            close_duration_ms: (200.0 * scale).round() as u64,
            easing: Easing::default(),
            collapsed_scale: 0.0,
            collapsed_rotation_deg: 0.0,
        }
    }
}

impl AnimationConfig {
    /// Duration of the open transition.
    pub fn open_duration(&self) -> Duration {
        Duration::from_millis(self.open_duration_ms)
    }

    /// Duration of the close transition.
    pub fn close_duration(&self) -> Duration {
        Duration::from_millis(self.close_duration_ms)
    }

    /// A progress driver for these settings.
    pub fn controller(&self) -> ProgressController {
        ProgressController::new(self.open_duration(), self.close_duration(), self.easing)
    }
}
