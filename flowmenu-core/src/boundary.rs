// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keeps laid out items inside the visible screen area.
//!
//! Two independent passes are available. The per-item pass moves every item
//! that crosses a screen edge by the minimal amount, and stores the result in
//! the item positions. The group pass computes a single offset for the whole
//! menu; it is applied at paint time and never written back into positions.

use nalgebra::Vector2;
use serde::Deserialize;
use vello::kurbo::{Point, Rect, Size};

/// Which clamping passes run after layout.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoundaryPolicy {
    /// Clamp every item on its own. Items may end up overlapping.
    pub clamp_per_item: bool,
    /// Shift the whole menu so its bounds stay on screen.
    pub clamp_group: bool,
    /// Extra space around the items reserved for a background decoration.
    /// Only taken into account by the group pass.
    pub background_padding: Option<Padding>,
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        Self {
            clamp_per_item: false,
            clamp_group: true,
            background_padding: None,
        }
    }
}

/// Insets around a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Padding {
    /// Left inset
    pub left: f64,
    /// Top inset
    pub top: f64,
    /// Right inset
    pub right: f64,
    /// Bottom inset
    pub bottom: f64,
}

impl Padding {
    /// The same inset on every side.
    pub fn uniform(value: f64) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// Grow `rect` by these insets.
    pub fn expand(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x0 - self.left,
            rect.y0 - self.top,
            rect.x1 + self.right,
            rect.y1 + self.bottom,
        )
    }
}

/// Result of [fit].
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// Item centers after the per-item pass.
    pub positions: Vec<Vector2<f64>>,
    /// Offset added to every item at paint time.
    pub group_offset: Vector2<f64>,
    /// Union of all item rectangles with the group offset applied.
    pub items_bounds: Rect,
}

/// Rectangle of an item centered on `position`.
pub fn item_rect(position: Vector2<f64>, size: Size) -> Rect {
    Rect::from_center_size(Point::new(position.x, position.y), size)
}

/// Minimal translation that brings `rect` back inside the visible area.
///
/// When a rectangle is larger than the screen, the left and top edges win.
pub fn edge_correction(rect: Rect, screen_size: Vector2<f64>, top_inset: f64) -> Vector2<f64> {
    let dx = if rect.x0 < 0.0 {
        -rect.x0
    } else if rect.x1 > screen_size.x {
        screen_size.x - rect.x1
    } else {
        0.0
    };

    let dy = if rect.y0 < top_inset {
        top_inset - rect.y0
    } else if rect.y1 > screen_size.y {
        screen_size.y - rect.y1
    } else {
        0.0
    };

    Vector2::new(dx, dy)
}

/// Union of the rectangles of all items, or `None` if there are none.
pub fn union_rect(sizes: &[Size], positions: &[Vector2<f64>]) -> Option<Rect> {
    positions
        .iter()
        .zip(sizes)
        .map(|(position, size)| item_rect(*position, *size))
        .reduce(|acc, rect| acc.union(rect))
}

/// Fit laid out items on screen according to `policy`.
pub fn fit(
    sizes: &[Size],
    positions: &[Vector2<f64>],
    screen_size: Vector2<f64>,
    top_inset: f64,
    policy: &BoundaryPolicy,
) -> FitResult {
    debug_assert_eq!(sizes.len(), positions.len());

    let mut adjusted = positions.to_vec();

    if policy.clamp_per_item {
        for (position, size) in adjusted.iter_mut().zip(sizes) {
            let correction = edge_correction(item_rect(*position, *size), screen_size, top_inset);
            if correction != Vector2::zeros() {
                log::trace!("Clamping item at {:?} by {:?}", position, correction);
            }
            *position += correction;
        }
    }

    let union = union_rect(sizes, &adjusted);

    let group_offset = match union {
        Some(bounds) if policy.clamp_group => {
            let bounds = match policy.background_padding {
                Some(padding) => padding.expand(bounds),
                None => bounds,
            };
            edge_correction(bounds, screen_size, top_inset)
        },
        _ => Vector2::zeros(),
    };

    let items_bounds = union
        .map(|bounds| bounds + vello::kurbo::Vec2::new(group_offset.x, group_offset.y))
        .unwrap_or(Rect::ZERO);

    FitResult {
        positions: adjusted,
        group_offset,
        items_bounds,
    }
}
