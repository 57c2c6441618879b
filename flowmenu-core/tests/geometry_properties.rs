//! Property tests for the shape layouts and the boundary fitter

use flowmenu_core::boundary::{fit, item_rect, union_rect, BoundaryPolicy};
use flowmenu_core::geometry::{circle_positions, compute_positions, consumed_length, grid_positions, Shape};
use nalgebra::Vector2;
use proptest::prelude::*;
use vello::kurbo::Size;

const EPS: f64 = 1e-6;

fn sizes() -> impl Strategy<Value = Vec<Size>> {
    prop::collection::vec((1.0..80.0f64, 1.0..80.0f64), 1..12)
        .prop_map(|dims| dims.into_iter().map(|(w, h)| Size::new(w, h)).collect())
}

fn center() -> impl Strategy<Value = Vector2<f64>> {
    (0.0..400.0f64, 0.0..800.0f64).prop_map(|(x, y)| Vector2::new(x, y))
}

proptest! {
    #[test]
    fn prop_one_position_per_item(
        sizes in sizes(),
        center in center(),
        start in -360.0..360.0f64,
        span in -720.0..720.0f64,
        radius in 0.0..300.0f64,
        columns in 1usize..6,
    ) {
        let shapes = [
            Shape::circle(start, start + span, radius),
            Shape::linear(start, 4.0),
            Shape::grid(columns, 6.0),
        ];
        for shape in shapes {
            prop_assert_eq!(compute_positions(&sizes, &shape, center).len(), sizes.len());
        }
    }

    #[test]
    fn prop_partial_arc_hits_both_ends(
        count in 2usize..12,
        start in -180.0..180.0f64,
        span in 1.0..359.0f64,
        radius in 10.0..300.0f64,
    ) {
        let center = Vector2::new(200.0, 400.0);
        let end = start + span;
        let positions = circle_positions(count, start, end, radius, radius, center);

        let at = |angle: f64| {
            let angle = angle.to_radians();
            Vector2::new(center.x + angle.cos() * radius, center.y - angle.sin() * radius)
        };
        prop_assert!((positions[0] - at(start)).norm() < EPS);
        prop_assert!((positions[count - 1] - at(end)).norm() < EPS);
    }

    #[test]
    fn prop_full_circle_omits_last_slot(
        count in 2usize..12,
        start in -180.0..180.0f64,
        radius in 10.0..300.0f64,
    ) {
        let center = Vector2::new(0.0, 0.0);
        let positions = circle_positions(count, start, start + 360.0, radius, radius, center);

        // The last item stays one step short of the first.
        prop_assert!((positions[count - 1] - positions[0]).norm() > EPS);
        for position in &positions {
            prop_assert!(((position - center).norm() - radius).abs() < EPS);
        }
    }

    #[test]
    fn prop_linear_items_are_back_to_back(
        sizes in sizes(),
        angle in 0.0..360.0f64,
        spacing in 0.0..20.0f64,
    ) {
        let center = Vector2::new(200.0, 400.0);
        let positions = compute_positions(&sizes, &Shape::linear(angle, spacing), center);

        for i in 1..sizes.len() {
            let expected = consumed_length(sizes[i - 1], angle) / 2.0
                + spacing
                + consumed_length(sizes[i], angle) / 2.0;
            prop_assert!(((positions[i] - positions[i - 1]).norm() - expected).abs() < EPS);
        }
    }

    #[test]
    fn prop_grid_is_centered(
        sizes in sizes(),
        columns in 1usize..6,
        spacing in 0.0..20.0f64,
        center in center(),
    ) {
        let positions = grid_positions(&sizes, columns, spacing, spacing, center);
        let bounds = union_rect(&sizes, &positions).unwrap();

        prop_assert!((bounds.center().x - center.x).abs() < EPS);
        prop_assert!((bounds.center().y - center.y).abs() < EPS);

        // Items of a row share their y coordinate.
        for row in positions.chunks(columns) {
            prop_assert!(row.iter().all(|p| (p.y - row[0].y).abs() < EPS));
        }
    }

    #[test]
    fn prop_group_clamp_keeps_fitting_menus_on_screen(
        sizes in sizes(),
        center in center(),
        radius in 0.0..150.0f64,
        top_inset in 0.0..40.0f64,
    ) {
        let screen = Vector2::new(400.0, 800.0);
        let positions = compute_positions(&sizes, &Shape::circle(0.0, 360.0, radius), center);
        let result = fit(&sizes, &positions, screen, top_inset, &BoundaryPolicy::default());

        // The group pass never touches the stored positions.
        prop_assert_eq!(&result.positions, &positions);

        let bounds = result.items_bounds;
        if bounds.width() <= screen.x && bounds.height() <= screen.y - top_inset {
            prop_assert!(bounds.x0 >= -EPS && bounds.x1 <= screen.x + EPS);
            prop_assert!(bounds.y0 >= top_inset - EPS && bounds.y1 <= screen.y + EPS);
        }
    }

    #[test]
    fn prop_per_item_clamp_keeps_small_items_on_screen(
        sizes in sizes(),
        center in center(),
        radius in 0.0..600.0f64,
    ) {
        let screen = Vector2::new(400.0, 800.0);
        let positions = compute_positions(&sizes, &Shape::circle(0.0, 360.0, radius), center);
        let policy = BoundaryPolicy {
            clamp_per_item: true,
            clamp_group: false,
            background_padding: None,
        };
        let result = fit(&sizes, &positions, screen, 0.0, &policy);

        for (position, size) in result.positions.iter().zip(&sizes) {
            let rect = item_rect(*position, *size);
            prop_assert!(rect.x0 >= -EPS && rect.x1 <= screen.x + EPS);
            prop_assert!(rect.y0 >= -EPS && rect.y1 <= screen.y + EPS);
        }
    }
}
