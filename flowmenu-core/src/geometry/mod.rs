// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item placement for the supported menu shapes.
//!
//! All functions in this module are pure: they take the measured item sizes, the
//! shape parameters and the center point of the menu and return the center of
//! every item in screen coordinates (y grows downward). Nothing here knows about
//! the screen edges; see [boundary](crate::boundary) for that.

mod circle;
mod grid;
mod linear;

pub use circle::circle_positions;
pub use grid::grid_positions;
pub use linear::{consumed_length, linear_positions};

use nalgebra::Vector2;
use serde::Deserialize;
use vello::kurbo::Size;

/// The geometric arrangement applied to the menu items.
///
/// Angles are given in degrees, counter-clockwise, with 0° pointing right.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Items distributed over an elliptic arc.
    Circle {
        /// Angle of the first item.
        start_angle: f64,
        /// Angle of the last item (or of the omitted slot for full circles).
        end_angle: f64,
        /// Horizontal radius of the arc.
        radius_x: f64,
        /// Vertical radius of the arc.
        radius_y: f64,
    },
    /// Items placed back to back along a ray starting at the center.
    Linear {
        /// Direction of the ray.
        angle: f64,
        /// Gap between two consecutive items.
        #[serde(default)]
        spacing: f64,
        /// Cross-axis alignment of the items after the first one.
        #[serde(default)]
        alignment: LinearAlignment,
    },
    /// Items flowing row-major into a fixed number of columns.
    Grid {
        /// Number of columns. Zero is treated as one.
        columns: usize,
        /// Horizontal gap between two items of a row.
        #[serde(default)]
        spacing_h: f64,
        /// Vertical gap between two rows.
        #[serde(default)]
        spacing_v: f64,
    },
}

impl Shape {
    /// A circular arc with equal radii.
    pub fn circle(start_angle: f64, end_angle: f64, radius: f64) -> Self {
        Shape::Circle {
            start_angle,
            end_angle,
            radius_x: radius,
            radius_y: radius,
        }
    }

    /// A center-aligned line.
    pub fn linear(angle: f64, spacing: f64) -> Self {
        Shape::Linear {
            angle,
            spacing,
            alignment: LinearAlignment::None,
        }
    }

    /// A grid with the same spacing in both directions.
    pub fn grid(columns: usize, spacing: f64) -> Self {
        Shape::Grid {
            columns,
            spacing_h: spacing,
            spacing_v: spacing,
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Shape::circle(0.0, 360.0, 100.0)
    }
}

/// Cross-axis alignment for [Shape::Linear].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearAlignment {
    /// Items are centered on the ray.
    #[default]
    None,
    /// Left edges line up with the first item's left edge.
    Left,
    /// Right edges line up with the first item's right edge.
    Right,
    /// Top edges line up with the first item's top edge.
    Top,
    /// Bottom edges line up with the first item's bottom edge.
    Bottom,
}

/// Compute the center of every item for the given shape.
///
/// Returns one position per size, or an empty vector for zero items and for
/// degenerate parameters.
pub fn compute_positions(sizes: &[Size], shape: &Shape, center: Vector2<f64>) -> Vec<Vector2<f64>> {
    if sizes.is_empty() {
        return Vec::new();
    }

    match *shape {
        Shape::Circle {
            start_angle,
            end_angle,
            radius_x,
            radius_y,
        } => circle_positions(sizes.len(), start_angle, end_angle, radius_x, radius_y, center),
        Shape::Linear {
            angle,
            spacing,
            alignment,
        } => linear_positions(sizes, angle, spacing, alignment, center),
        Shape::Grid {
            columns,
            spacing_h,
            spacing_v,
        } => grid_positions(sizes, columns, spacing_h, spacing_v, center),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_items_produce_nothing() {
        let center = Vector2::new(50.0, 50.0);
        for shape in [Shape::default(), Shape::linear(0.0, 4.0), Shape::grid(3, 4.0)] {
            assert!(compute_positions(&[], &shape, center).is_empty());
        }
    }

    #[test]
    fn test_one_position_per_item() {
        let sizes = vec![Size::new(20.0, 10.0); 5];
        let center = Vector2::new(0.0, 0.0);
        for shape in [Shape::circle(0.0, 90.0, 40.0), Shape::linear(45.0, 2.0), Shape::grid(2, 1.0)] {
            assert_eq!(compute_positions(&sizes, &shape, center).len(), 5);
        }
    }
}
