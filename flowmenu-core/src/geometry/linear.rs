// SPDX-License-Identifier: MIT OR Apache-2.0

use nalgebra::Vector2;
use std::f64::consts::FRAC_PI_2;
use vello::kurbo::Size;

use super::LinearAlignment;

/// Length of the ray segment that lies inside an item's bounding box.
///
/// The ray leaves the box through the nearer pair of edges, so the smaller of
/// the two half-chords wins. Exactly horizontal and vertical rays use the box's
/// own width or height.
pub fn consumed_length(size: Size, angle: f64) -> f64 {
    let normalized = angle.rem_euclid(180.0);
    if normalized == 0.0 {
        return size.width;
    }
    if normalized == 90.0 {
        return size.height;
    }

    let radians = angle.to_radians();
    let through_horizontal_edges = (size.height / 2.0) / radians.sin().abs();
    let through_vertical_edges = (size.width / 2.0) / (FRAC_PI_2 - radians).sin().abs();

    2.0 * through_horizontal_edges.min(through_vertical_edges)
}

/// Unit vector of a ray at `angle` degrees in screen space.
fn ray_direction(angle: f64) -> Vector2<f64> {
    match angle.rem_euclid(360.0) {
        a if a == 0.0 => Vector2::new(1.0, 0.0),
        a if a == 90.0 => Vector2::new(0.0, -1.0),
        a if a == 180.0 => Vector2::new(-1.0, 0.0),
        a if a == 270.0 => Vector2::new(0.0, 1.0),
        _ => {
            let radians = angle.to_radians();
            Vector2::new(radians.cos(), -radians.sin())
        },
    }
}

/// Place items back to back along a ray starting at `center`.
pub fn linear_positions(
    sizes: &[Size],
    angle: f64,
    spacing: f64,
    alignment: LinearAlignment,
    center: Vector2<f64>,
) -> Vec<Vector2<f64>> {
    if !angle.is_finite() || !spacing.is_finite() {
        log::warn!("Skipping linear layout with non-finite parameters");
        return Vec::new();
    }

    let direction = ray_direction(angle);
    let mut radius = 0.0;
    let mut positions = Vec::with_capacity(sizes.len());

    for size in sizes {
        let length = consumed_length(*size, angle);
        positions.push(center + direction * (radius + length / 2.0));
        radius += length + spacing;
    }

    if alignment != LinearAlignment::None {
        align_cross_axis(&mut positions, sizes, alignment, direction);
    }

    positions
}

/// Align the edges of all items with the first one.
///
/// Alignment only moves the coordinate across the ray: left and right are
/// ignored on horizontal rays, top and bottom on vertical ones.
fn align_cross_axis(
    positions: &mut [Vector2<f64>],
    sizes: &[Size],
    alignment: LinearAlignment,
    direction: Vector2<f64>,
) {
    let along_ray = match alignment {
        LinearAlignment::Left | LinearAlignment::Right => direction.y == 0.0,
        LinearAlignment::Top | LinearAlignment::Bottom => direction.x == 0.0,
        LinearAlignment::None => true,
    };
    if along_ray {
        log::debug!("Ignoring {:?} alignment along the ray", alignment);
        return;
    }

    let (Some(first), Some(first_size)) = (positions.first().copied(), sizes.first()) else {
        return;
    };

    let left = first.x - first_size.width / 2.0;
    let right = first.x + first_size.width / 2.0;
    let top = first.y - first_size.height / 2.0;
    let bottom = first.y + first_size.height / 2.0;

    for (position, size) in positions.iter_mut().zip(sizes).skip(1) {
        match alignment {
            LinearAlignment::Left => position.x = left + size.width / 2.0,
            LinearAlignment::Right => position.x = right - size.width / 2.0,
            LinearAlignment::Top => position.y = top + size.height / 2.0,
            LinearAlignment::Bottom => position.y = bottom - size.height / 2.0,
            LinearAlignment::None => {},
        }
    }
}
