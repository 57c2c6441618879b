// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Layout cycle
//!
//! A [LayoutCycle] owns everything belonging to one open cycle of a menu: the
//! resolved items, their measured rectangles, the captured screen metrics and
//! the center point. Item rectangles are either polled from the host on every
//! tick or pushed as items mount. As soon as every item has a non-empty
//! rectangle the positions are computed and fitted once, and stay frozen for
//! the rest of the cycle.

use crate::boundary::{fit, BoundaryPolicy};
use crate::geometry::{compute_positions, Shape};
use crate::item::{is_non_empty, ItemSpec, MenuItem};
use nalgebra::Vector2;
use vello::kurbo::{Point, Rect, Size};

/// Screen metrics and the center captured when a cycle starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleFrame {
    /// Bounds of the anchor, if it could be resolved.
    pub anchor_bounds: Option<Rect>,
    /// Visible screen size.
    pub screen_size: Vector2<f64>,
    /// Reserved area at the top of the screen.
    pub top_inset: f64,
    /// Point the menu unfolds around.
    pub center: Vector2<f64>,
    /// Touch point that opened the menu, if any.
    pub touch_point: Option<Point>,
}

/// The frozen result of a resolved layout.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLayout {
    /// Measured item sizes.
    pub sizes: Vec<Size>,
    /// Fitted item centers, without the group offset.
    pub targets: Vec<Vector2<f64>>,
    /// Offset shared by all items.
    pub group_offset: Vector2<f64>,
    /// Union of all item rectangles including the group offset.
    pub items_bounds: Rect,
}

/// Result of one measurement poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureOutcome {
    /// Some items are still unmeasured.
    Pending,
    /// The layout is resolved (now or earlier).
    Resolved,
    /// The tick budget is exhausted.
    Failed {
        /// Ticks spent waiting.
        ticks: u32,
        /// Items without a rectangle.
        unmeasured: usize,
    },
}

/// All state of a single open cycle.
#[derive(Debug, Clone)]
pub struct LayoutCycle {
    items: Vec<MenuItem>,
    specs: Vec<ItemSpec>,
    frame: CycleFrame,
    shape: Shape,
    policy: BoundaryPolicy,
    max_ticks: u32,
    failed_ticks: u32,
    fitted: Option<FittedLayout>,
}

impl LayoutCycle {
    /// Start a new cycle for `items`.
    pub fn new(items: Vec<MenuItem>, frame: CycleFrame, shape: Shape, policy: BoundaryPolicy, max_ticks: u32) -> Self {
        let specs = (0..items.len()).map(ItemSpec::new).collect();
        Self {
            items,
            specs,
            frame,
            shape,
            policy,
            max_ticks: max_ticks.max(1),
            failed_ticks: 0,
            fitted: None,
        }
    }

    /// Items of this cycle.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Per-item layout records.
    pub fn specs(&self) -> &[ItemSpec] {
        &self.specs
    }

    /// Captured metrics and center.
    pub fn frame(&self) -> &CycleFrame {
        &self.frame
    }

    /// Center point of the cycle.
    pub fn center(&self) -> Vector2<f64> {
        self.frame.center
    }

    /// The frozen layout, once resolved.
    pub fn fitted(&self) -> Option<&FittedLayout> {
        self.fitted.as_ref()
    }

    /// Whether the layout has been computed.
    pub fn is_resolved(&self) -> bool {
        self.fitted.is_some()
    }

    /// Number of items still without a non-empty rectangle.
    pub fn unmeasured(&self) -> usize {
        self.specs.iter().filter(|spec| !spec.is_measured()).count()
    }

    /// Record a pushed measurement. Returns `true` if this resolved the layout.
    ///
    /// Ignored once the layout is frozen or for unknown indices.
    pub fn record_measurement(&mut self, index: usize, rect: Rect) -> bool {
        if self.is_resolved() {
            return false;
        }

        match self.specs.get_mut(index) {
            Some(spec) => spec.rect = Some(rect),
            None => {
                log::warn!("Measurement for unknown item {} ignored", index);
                return false;
            },
        }

        self.try_resolve()
    }

    /// Poll the host for every unmeasured item and resolve if possible.
    ///
    /// Each call that leaves items unmeasured counts against the tick budget.
    pub fn poll_measurements(&mut self, mut measure: impl FnMut(usize) -> Option<Rect>) -> MeasureOutcome {
        if self.is_resolved() {
            return MeasureOutcome::Resolved;
        }

        for spec in self.specs.iter_mut().filter(|spec| !spec.is_measured()) {
            spec.rect = measure(spec.index).filter(|rect| is_non_empty(*rect));
        }

        if self.try_resolve() {
            return MeasureOutcome::Resolved;
        }

        self.failed_ticks += 1;
        let unmeasured = self.unmeasured();
        log::trace!("Measurement pending, {} items unmeasured (tick {})", unmeasured, self.failed_ticks);

        if self.failed_ticks >= self.max_ticks {
            MeasureOutcome::Failed {
                ticks: self.failed_ticks,
                unmeasured,
            }
        } else {
            MeasureOutcome::Pending
        }
    }

    fn try_resolve(&mut self) -> bool {
        if self.is_resolved() || self.unmeasured() > 0 {
            return false;
        }

        let sizes: Vec<Size> = self
            .specs
            .iter()
            .map(|spec| spec.rect.map(|rect| rect.size()).unwrap_or(Size::ZERO))
            .collect();

        let mut positions = compute_positions(&sizes, &self.shape, self.frame.center);
        if positions.len() != sizes.len() {
            log::warn!("Shape {:?} produced no layout, collapsing items to the center", self.shape);
            positions = vec![self.frame.center; sizes.len()];
        }

        let result = fit(
            &sizes,
            &positions,
            self.frame.screen_size,
            self.frame.top_inset,
            &self.policy,
        );

        for (spec, target) in self.specs.iter_mut().zip(&result.positions) {
            spec.target = Some(*target);
        }

        log::debug!(
            "Layout resolved for {} items, group offset {:?}",
            sizes.len(),
            result.group_offset
        );

        self.fitted = Some(FittedLayout {
            sizes,
            targets: result.positions,
            group_offset: result.group_offset,
            items_bounds: result.items_bounds,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> CycleFrame {
        CycleFrame {
            anchor_bounds: None,
            screen_size: Vector2::new(400.0, 800.0),
            top_inset: 0.0,
            center: Vector2::new(200.0, 400.0),
            touch_point: None,
        }
    }

    fn items(count: usize) -> Vec<MenuItem> {
        (0..count).map(|i| MenuItem::new(i.to_string(), format!("Item {}", i))).collect()
    }

    fn cycle(count: usize, max_ticks: u32) -> LayoutCycle {
        LayoutCycle::new(
            items(count),
            frame(),
            Shape::circle(0.0, 180.0, 100.0),
            BoundaryPolicy::default(),
            max_ticks,
        )
    }

    #[test]
    fn test_poll_resolves_when_all_measured() {
        let mut cycle = cycle(3, 10);

        let outcome = cycle.poll_measurements(|i| (i < 2).then(|| Rect::new(0.0, 0.0, 20.0, 20.0)));
        assert_eq!(outcome, MeasureOutcome::Pending);
        assert_eq!(cycle.unmeasured(), 1);

        let outcome = cycle.poll_measurements(|_| Some(Rect::new(0.0, 0.0, 20.0, 20.0)));
        assert_eq!(outcome, MeasureOutcome::Resolved);

        let fitted = cycle.fitted().unwrap();
        assert_eq!(fitted.targets.len(), 3);
        assert!((fitted.targets[0] - Vector2::new(300.0, 400.0)).norm() < 1e-9);
        assert!((fitted.targets[2] - Vector2::new(100.0, 400.0)).norm() < 1e-9);
        assert!(cycle.specs().iter().all(|spec| spec.target.is_some()));
    }

    #[test]
    fn test_empty_rect_counts_as_unmeasured() {
        let mut cycle = cycle(1, 10);

        let outcome = cycle.poll_measurements(|_| Some(Rect::new(0.0, 0.0, 0.0, 0.0)));
        assert_eq!(outcome, MeasureOutcome::Pending);
        assert!(!cycle.is_resolved());
    }

    #[test]
    fn test_poll_fails_after_budget() {
        let mut cycle = cycle(2, 3);

        assert_eq!(cycle.poll_measurements(|_| None), MeasureOutcome::Pending);
        assert_eq!(cycle.poll_measurements(|_| None), MeasureOutcome::Pending);
        assert_eq!(
            cycle.poll_measurements(|_| None),
            MeasureOutcome::Failed { ticks: 3, unmeasured: 2 }
        );
    }

    #[test]
    fn test_pushed_measurements_resolve() {
        let mut cycle = cycle(2, 10);

        assert!(!cycle.record_measurement(0, Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(!cycle.record_measurement(7, Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(cycle.record_measurement(1, Rect::new(0.0, 0.0, 10.0, 10.0)));

        // Frozen afterwards.
        let before = cycle.fitted().cloned();
        assert!(!cycle.record_measurement(1, Rect::new(0.0, 0.0, 50.0, 50.0)));
        assert_eq!(cycle.fitted().cloned(), before);
        assert_eq!(cycle.poll_measurements(|_| None), MeasureOutcome::Resolved);
    }

    #[test]
    fn test_group_offset_applied_to_bounds() {
        let mut frame = frame();
        frame.center = Vector2::new(390.0, 400.0);
        let mut cycle = LayoutCycle::new(
            items(1),
            frame,
            Shape::grid(1, 0.0),
            BoundaryPolicy::default(),
            5,
        );

        cycle.poll_measurements(|_| Some(Rect::new(0.0, 0.0, 40.0, 40.0)));
        let fitted = cycle.fitted().unwrap();

        assert_eq!(fitted.group_offset, Vector2::new(-10.0, 0.0));
        assert_eq!(fitted.targets[0], Vector2::new(390.0, 400.0));
        assert_eq!(fitted.items_bounds, Rect::new(360.0, 380.0, 400.0, 420.0));
    }
}
