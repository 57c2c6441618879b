// SPDX-License-Identifier: MIT OR Apache-2.0

use nalgebra::Vector2;
use vello::kurbo::Size;

/// Flow items row-major into `columns` columns, centered on `center`.
///
/// Each row is as tall as its tallest item. Rows narrower than the widest one
/// are centered under it (the shift is floored to whole pixels).
pub fn grid_positions(
    sizes: &[Size],
    columns: usize,
    spacing_h: f64,
    spacing_v: f64,
    center: Vector2<f64>,
) -> Vec<Vector2<f64>> {
    let columns = columns.max(1);
    let mut positions = Vec::with_capacity(sizes.len());
    let mut row_widths = Vec::with_capacity(sizes.len() / columns + 1);
    let mut y = 0.0;

    for row in sizes.chunks(columns) {
        let row_height = row.iter().map(|size| size.height).fold(0.0, f64::max);
        let mut x = 0.0;

        for (column, size) in row.iter().enumerate() {
            if column > 0 {
                x += spacing_h;
            }
            positions.push(Vector2::new(x + size.width / 2.0, y + row_height / 2.0));
            x += size.width;
        }

        row_widths.push(x);
        y += row_height + spacing_v;
    }

    let grid_width = row_widths.iter().copied().fold(0.0, f64::max);
    let grid_height = (y - spacing_v).max(0.0);
    let origin = Vector2::new(center.x - grid_width / 2.0, center.y - grid_height / 2.0);

    for (row, row_width) in row_widths.iter().enumerate() {
        let shift = ((grid_width - row_width) / 2.0).floor();
        let start = row * columns;
        let end = (start + columns).min(positions.len());

        for position in &mut positions[start..end] {
            position.x += shift;
            *position += origin;
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_seven_items_in_three_columns() {
        let sizes = vec![Size::new(40.0, 40.0); 7];
        let center = Vector2::new(200.0, 300.0);
        let positions = grid_positions(&sizes, 3, 10.0, 10.0, center);

        assert_eq!(positions.len(), 7);

        // Rows [3, 3, 1]: three distinct y values.
        assert!((positions[0].y - positions[2].y).abs() < EPS);
        assert!((positions[3].y - positions[5].y).abs() < EPS);
        assert!(positions[6].y > positions[3].y);

        // The lone item of the last row is centered under the full rows.
        let full_row_center = (positions[0].x + positions[2].x) / 2.0;
        assert!((positions[6].x - full_row_center).abs() < EPS);
        assert!((positions[6].x - center.x).abs() < EPS);

        // Grid is 140 x 140, so the first item sits at the top-left corner.
        assert!((positions[0] - Vector2::new(150.0, 250.0)).norm() < EPS);
        assert!((positions[6].y - 350.0).abs() < EPS);
    }

    #[test]
    fn test_row_height_follows_tallest_item() {
        let sizes = [
            Size::new(10.0, 10.0),
            Size::new(10.0, 30.0),
            Size::new(10.0, 10.0),
        ];
        let positions = grid_positions(&sizes, 2, 0.0, 0.0, Vector2::new(10.0, 20.0));

        // Grid is 20 wide, 40 tall, origin at (0, 0).
        assert!((positions[0].y - 15.0).abs() < EPS);
        assert!((positions[1].y - 15.0).abs() < EPS);
        assert!((positions[2].y - 35.0).abs() < EPS);
        // Second row (10 wide) is shifted by floor(5) = 5.
        assert!((positions[2].x - 10.0).abs() < EPS);
    }

    #[test]
    fn test_centering_shift_is_floored() {
        let sizes = [Size::new(15.0, 10.0), Size::new(10.0, 10.0), Size::new(10.0, 10.0)];
        let positions = grid_positions(&sizes, 2, 0.0, 0.0, Vector2::new(12.5, 10.0));

        // Widest row is 25, last row is 10: shift = floor(7.5) = 7.
        assert!((positions[2].x - 12.0).abs() < EPS);
    }

    #[test]
    fn test_zero_columns_acts_as_single_column() {
        let sizes = vec![Size::new(10.0, 10.0); 3];
        let positions = grid_positions(&sizes, 0, 0.0, 5.0, Vector2::zeros());

        assert!(positions.iter().all(|p| p.x.abs() < EPS));
        assert!((positions[0].y + 15.0).abs() < EPS);
        assert!((positions[2].y - 15.0).abs() < EPS);
    }
}
