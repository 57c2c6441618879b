// SPDX-License-Identifier: MIT OR Apache-2.0

use nalgebra::Vector2;

/// Spans within this many degrees of a full turn count as a full turn.
const FULL_TURN_TOLERANCE: f64 = 1e-9;

/// Distribute `count` items over the arc `[start_angle, end_angle]` (degrees).
///
/// For spans shorter than a full turn the last item lands exactly on
/// `end_angle`. For a full turn (or more) the last slot is omitted, since it
/// would coincide with the first one.
pub fn circle_positions(
    count: usize,
    start_angle: f64,
    end_angle: f64,
    radius_x: f64,
    radius_y: f64,
    center: Vector2<f64>,
) -> Vec<Vector2<f64>> {
    if count == 0 {
        return Vec::new();
    }

    if ![start_angle, end_angle, radius_x, radius_y]
        .iter()
        .all(|value| value.is_finite())
    {
        log::warn!("Skipping circle layout with non-finite parameters");
        return Vec::new();
    }

    let start = start_angle.to_radians();
    let span = (end_angle - start_angle).to_radians();
    let divisor = if (end_angle - start_angle).abs() < 360.0 - FULL_TURN_TOLERANCE {
        count - 1
    } else {
        count
    };

    (0..count)
        .map(|index| {
            let theta = if divisor == 0 {
                start
            } else {
                start + span * index as f64 / divisor as f64
            };

            // Screen y grows downward, angles grow counter-clockwise.
            Vector2::new(
                center.x + theta.cos() * radius_x,
                center.y - theta.sin() * radius_y,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn angle_of(position: Vector2<f64>, center: Vector2<f64>) -> f64 {
        (-(position.y - center.y)).atan2(position.x - center.x).to_degrees()
    }

    #[test]
    fn test_partial_arc_hits_both_ends() {
        let center = Vector2::new(200.0, 200.0);
        let positions = circle_positions(4, 0.0, 90.0, 100.0, 100.0, center);

        assert_eq!(positions.len(), 4);
        assert!((positions[0] - Vector2::new(300.0, 200.0)).norm() < EPS);
        assert!((positions[3] - Vector2::new(200.0, 100.0)).norm() < EPS);
        assert!((angle_of(positions[1], center) - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_full_circle_omits_last_slot() {
        let center = Vector2::new(0.0, 0.0);
        let positions = circle_positions(4, 0.0, 360.0, 50.0, 50.0, center);

        assert!((positions[0] - Vector2::new(50.0, 0.0)).norm() < EPS);
        // Last item is at 270°, strictly before the end angle, not on top of item 0.
        assert!((positions[3] - Vector2::new(0.0, 50.0)).norm() < EPS);
        assert!((positions[3] - positions[0]).norm() > 1.0);
    }

    #[test]
    fn test_full_circle_with_rounded_span() {
        let start = 172.16398281139942;
        let end = start + 360.0;
        // The difference rounds to just below a full turn.
        assert!(end - start < 360.0);

        let positions = circle_positions(2, start, end, 10.0, 10.0, Vector2::zeros());
        assert!((positions[1] - positions[0]).norm() > 1.0);
        assert!((positions[0] + positions[1]).norm() < EPS);
    }

    #[test]
    fn test_single_item_sits_at_start_angle() {
        let center = Vector2::new(10.0, 10.0);
        let positions = circle_positions(1, 90.0, 180.0, 20.0, 20.0, center);

        assert_eq!(positions.len(), 1);
        assert!((positions[0] - Vector2::new(10.0, -10.0)).norm() < EPS);

        let full = circle_positions(1, 90.0, 450.0, 20.0, 20.0, center);
        assert!((full[0] - positions[0]).norm() < EPS);
    }

    #[test]
    fn test_elliptic_radii() {
        let center = Vector2::new(0.0, 0.0);
        let positions = circle_positions(2, 0.0, 90.0, 80.0, 30.0, center);

        assert!((positions[0] - Vector2::new(80.0, 0.0)).norm() < EPS);
        assert!((positions[1] - Vector2::new(0.0, -30.0)).norm() < EPS);
    }

    #[test]
    fn test_non_finite_parameters_are_ignored() {
        let center = Vector2::new(0.0, 0.0);
        assert!(circle_positions(3, f64::NAN, 90.0, 10.0, 10.0, center).is_empty());
        assert!(circle_positions(3, 0.0, 90.0, f64::INFINITY, 10.0, center).is_empty());
    }
}
