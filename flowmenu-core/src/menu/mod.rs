// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Flow menu
//!
//! [FlowMenu] ties the pieces together: it resolves the items, captures the
//! screen metrics, presents an overlay layer on the host, drives the progress
//! and hands out per-item transforms for painting.
//! Menus are created with [MenuBuilder::new].
//!
//! The menu never blocks. Hosts call [FlowMenu::tick] once per frame and paint
//! the items with [FlowMenu::item_transforms]. Every driving method returns a
//! [MenuUpdate] describing what changed.

mod builder;
mod handle;

pub use builder::MenuBuilder;
pub use handle::MenuHandle;

use crate::animation::{lerp, AnimationStatus, ProgressController};
use crate::center::resolve_center;
use crate::config::MenuConfig;
use crate::error::MenuError;
use crate::gesture::{GestureRecognizer, PointerEvent};
use crate::host::{Anchor, MenuHost};
use crate::item::{ItemSource, MenuItem};
use crate::layout::{CycleFrame, LayoutCycle, MeasureOutcome};
use crate::overlay::{OverlayId, OverlayLevel};
use crate::state::{MenuState, MenuStateMachine};
use crate::update::MenuUpdate;
use builder::{ActivateCallback, StateCallback};
use handle::{HandleShared, MenuRequest};
use nalgebra::Vector2;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use vello::kurbo::{Affine, Point, Rect};

/// Paint transform of a single item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTransform {
    /// Item center on screen.
    pub translation: Vector2<f64>,
    /// Uniform scale.
    pub scale: f64,
    /// Rotation in radians.
    pub rotation: f64,
}

impl ItemTransform {
    /// Affine for content laid out around the origin.
    pub fn to_affine(&self) -> Affine {
        Affine::translate((self.translation.x, self.translation.y))
            * Affine::rotate(self.rotation)
            * Affine::scale(self.scale)
    }
}

/// A popup menu unfolding its items into a shape around an anchor.
pub struct FlowMenu<H: MenuHost> {
    host: H,
    config: MenuConfig,
    source: ItemSource,
    anchor: Anchor,
    controller: ProgressController,
    machine: MenuStateMachine,
    gesture: GestureRecognizer,
    cycle: Option<LayoutCycle>,
    layer: Option<OverlayId>,
    shared: Option<Rc<RefCell<HandleShared>>>,
    on_state_changed: Option<StateCallback>,
    on_item_activated: Option<ActivateCallback>,
    disposed: bool,
}

impl<H: MenuHost> FlowMenu<H> {
    pub(crate) fn new(
        host: H,
        config: MenuConfig,
        source: ItemSource,
        anchor: Anchor,
        on_state_changed: Option<StateCallback>,
        on_item_activated: Option<ActivateCallback>,
    ) -> Self {
        Self {
            controller: config.animation.controller(),
            gesture: GestureRecognizer::new(config.trigger),
            machine: MenuStateMachine::new(),
            host,
            config,
            source,
            anchor,
            cycle: None,
            layer: None,
            shared: Some(HandleShared::new_shared()),
            on_state_changed,
            on_item_activated,
            disposed: false,
        }
    }

    /// Open the menu without a touch point.
    pub async fn open(&mut self) -> Result<MenuUpdate, MenuError> {
        self.open_with(None).await
    }

    /// Open the menu as if the user touched `point`.
    pub async fn open_at(&mut self, point: Point) -> Result<MenuUpdate, MenuError> {
        self.open_with(Some(point)).await
    }

    async fn open_with(&mut self, touch: Option<Point>) -> Result<MenuUpdate, MenuError> {
        self.ensure_alive()?;

        match self.machine.state() {
            MenuState::Opening | MenuState::Open => return Ok(MenuUpdate::empty()),
            MenuState::Closing => {
                let status = self.controller.forward();
                return Ok(self.apply_status(status));
            },
            MenuState::Closed => {},
        }

        let items = self.source.resolve().await?;
        if items.is_empty() {
            log::debug!("Open request ignored, menu has no items");
            return Ok(MenuUpdate::empty());
        }

        self.begin_cycle(items, touch);

        let status = self.controller.forward();
        Ok(self.apply_status(status) | MenuUpdate::LAYOUT)
    }

    /// Close the menu. Reverses an opening menu from its current progress.
    pub fn close(&mut self) -> Result<MenuUpdate, MenuError> {
        self.ensure_alive()?;

        match self.machine.state() {
            MenuState::Closed | MenuState::Closing => Ok(MenuUpdate::empty()),
            MenuState::Opening | MenuState::Open => {
                let status = self.controller.reverse();
                Ok(self.apply_status(status))
            },
        }
    }

    /// Advance timers and the progress by `dt` and poll pending measurements.
    ///
    /// Fails with [MenuError::MeasurementTimeout] when items did not report a
    /// size in time. The menu is closed in that case.
    pub fn tick(&mut self, dt: Duration) -> Result<MenuUpdate, MenuError> {
        self.ensure_alive()?;

        let mut update = MenuUpdate::empty();

        if let Some(point) = self.gesture.advance(dt) {
            log::debug!("Long-press recognized at {:?}", point);
            self.push_request(MenuRequest::Open(Some(point)));
            update |= MenuUpdate::REQUEST;
        }

        if self.controller.is_animating() {
            update |= MenuUpdate::DRAW;
        }
        let status = self.controller.tick(dt);
        update |= self.apply_status(status);

        Ok(update | self.poll_layout()?)
    }

    /// Feed a pointer event over the trigger.
    ///
    /// A recognized gesture queues an open request, reported as
    /// [MenuUpdate::REQUEST].
    pub fn handle_pointer(&mut self, event: PointerEvent) -> MenuUpdate {
        if self.disposed {
            return MenuUpdate::empty();
        }

        match self.gesture.handle(event) {
            Some(point) => {
                log::debug!("Tap recognized at {:?}", point);
                self.push_request(MenuRequest::Open(Some(point)));
                MenuUpdate::REQUEST
            },
            None => MenuUpdate::empty(),
        }
    }

    /// A tap outside of the items. Closes the menu.
    pub fn handle_background_tap(&mut self) -> Result<MenuUpdate, MenuError> {
        log::trace!("Background tap");
        self.close()
    }

    /// Activate the item at `index`.
    ///
    /// Disabled items and unknown indices are ignored. Close requests issued by
    /// the activation callback are carried out before returning.
    pub fn activate_item(&mut self, index: usize) -> Result<MenuUpdate, MenuError> {
        self.ensure_alive()?;

        let Some(item) = self.cycle.as_ref().and_then(|cycle| cycle.items().get(index)) else {
            log::warn!("Activation of unknown item {} ignored", index);
            return Ok(MenuUpdate::empty());
        };
        if !item.enabled {
            log::debug!("Activation of disabled item {:?} ignored", item.id);
            return Ok(MenuUpdate::empty());
        }

        let handle = self.handle();
        if let Some(callback) = self.on_item_activated.as_mut() {
            callback(index, &handle);
        }

        self.process_close_requests()
    }

    /// Carry out every queued open and close request in order.
    pub async fn process_requests(&mut self) -> Result<MenuUpdate, MenuError> {
        self.ensure_alive()?;

        let mut update = MenuUpdate::empty();
        while let Some(request) = self.pop_request() {
            update |= match request {
                MenuRequest::Open(touch) => self.open_with(touch).await?,
                MenuRequest::Close => self.close()?,
            };
        }
        Ok(update)
    }

    /// Push the measured rectangle of a freshly mounted item.
    pub fn item_mounted(&mut self, index: usize, rect: Rect) -> MenuUpdate {
        let resolved = match self.cycle.as_mut() {
            Some(cycle) if !self.disposed => cycle.record_measurement(index, rect),
            _ => false,
        };

        if resolved {
            self.layout_resolved()
        } else {
            MenuUpdate::empty()
        }
    }

    /// The screen size changed. Rebuilds the current cycle with the same items
    /// and presents a fresh layer; the progress and its direction are kept.
    pub fn resize(&mut self) -> Result<MenuUpdate, MenuError> {
        self.ensure_alive()?;

        let Some(cycle) = self.cycle.take() else {
            return Ok(MenuUpdate::empty());
        };

        log::debug!("Screen resized while {:?}, rebuilding layout", self.machine.state());
        let touch = cycle.frame().touch_point;
        self.begin_cycle(cycle.items().to_vec(), touch);

        Ok(MenuUpdate::LAYOUT | MenuUpdate::DRAW)
    }

    /// Release everything belonging to the current cycle and return to
    /// [MenuState::Closed]. The menu stays usable.
    pub fn reset(&mut self) -> MenuUpdate {
        if self.disposed {
            return MenuUpdate::empty();
        }

        match self.release() {
            Some(state) => {
                self.notify(state);
                MenuUpdate::STATE | MenuUpdate::DRAW
            },
            None => MenuUpdate::empty(),
        }
    }

    /// Tear the menu down. Cancels timers, stops the progress, removes the
    /// layer and invalidates all handles. A visible menu reports
    /// [MenuState::Closed] before the callbacks are dropped. Runs once; later
    /// calls do nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        if let Some(state) = self.release() {
            self.notify(state);
        }
        self.shared = None;
        self.on_state_changed = None;
        self.on_item_activated = None;

        log::debug!("Flow menu disposed");
    }

    /// Whether [dispose](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// A handle for programmatic control.
    pub fn handle(&self) -> MenuHandle {
        match &self.shared {
            Some(shared) => MenuHandle::new(shared),
            None => MenuHandle::detached(),
        }
    }

    /// The current state.
    pub fn state(&self) -> MenuState {
        self.machine.state()
    }

    /// Eased progress between 0.0 (collapsed) and 1.0 (expanded).
    pub fn progress(&self) -> f64 {
        self.controller.progress()
    }

    /// The configuration.
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Items of the current cycle.
    pub fn items(&self) -> &[MenuItem] {
        self.cycle.as_ref().map(|cycle| cycle.items()).unwrap_or_default()
    }

    /// The layer presented for the current cycle.
    pub fn layer(&self) -> Option<OverlayId> {
        self.layer
    }

    /// Center point of the current cycle.
    pub fn center(&self) -> Option<Vector2<f64>> {
        self.cycle.as_ref().map(|cycle| cycle.center())
    }

    /// Whether the current cycle has a fitted layout.
    pub fn is_layout_resolved(&self) -> bool {
        self.cycle.as_ref().is_some_and(|cycle| cycle.is_resolved())
    }

    /// Fitted item centers without the group offset.
    pub fn target_positions(&self) -> Option<&[Vector2<f64>]> {
        self.cycle
            .as_ref()
            .and_then(|cycle| cycle.fitted())
            .map(|fitted| fitted.targets.as_slice())
    }

    /// Offset shared by all items.
    pub fn group_offset(&self) -> Option<Vector2<f64>> {
        self.cycle
            .as_ref()
            .and_then(|cycle| cycle.fitted())
            .map(|fitted| fitted.group_offset)
    }

    /// Union of all fitted item rectangles, group offset included.
    pub fn items_bounds(&self) -> Option<Rect> {
        self.cycle
            .as_ref()
            .and_then(|cycle| cycle.fitted())
            .map(|fitted| fitted.items_bounds)
    }

    /// Paint transform of the item at `index` for the current progress.
    ///
    /// `None` until the layout is resolved; hosts keep items invisible
    /// meanwhile.
    pub fn item_transform(&self, index: usize) -> Option<ItemTransform> {
        let cycle = self.cycle.as_ref()?;
        let fitted = cycle.fitted()?;
        let target = *fitted.targets.get(index)?;

        let progress = self.controller.progress();
        let center = cycle.center();
        let animation = &self.config.animation;

        Some(ItemTransform {
            translation: center + (target - center) * progress + fitted.group_offset,
            scale: lerp(animation.collapsed_scale, 1.0, progress),
            rotation: lerp(animation.collapsed_rotation_deg.to_radians(), 0.0, progress),
        })
    }

    /// Paint transforms of all items, empty until the layout is resolved.
    pub fn item_transforms(&self) -> Vec<ItemTransform> {
        let count = match self.cycle.as_ref().and_then(|cycle| cycle.fitted()) {
            Some(fitted) => fitted.targets.len(),
            None => return Vec::new(),
        };
        (0..count).filter_map(|index| self.item_transform(index)).collect()
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn ensure_alive(&self) -> Result<(), MenuError> {
        if self.disposed {
            Err(MenuError::Disposed)
        } else {
            Ok(())
        }
    }

    fn begin_cycle(&mut self, items: Vec<MenuItem>, touch: Option<Point>) {
        let anchor_bounds = self.anchor.resolve(&self.host);
        let screen_size = self.host.screen_size();
        let top_inset = self.host.top_inset();
        let center = resolve_center(&self.config.center, anchor_bounds, screen_size, touch);

        log::debug!("Starting open cycle with {} items around {:?}", items.len(), center);

        let frame = CycleFrame {
            anchor_bounds,
            screen_size,
            top_inset,
            center,
            touch_point: touch,
        };
        self.cycle = Some(LayoutCycle::new(
            items,
            frame,
            self.config.shape,
            self.config.boundary,
            self.config.max_measure_ticks,
        ));

        if let Some(layer) = self.layer.take() {
            self.host.remove_layer(layer);
        }
        self.layer = Some(self.host.present_layer(OverlayLevel::Popup));
    }

    fn teardown_cycle(&mut self) {
        if let Some(layer) = self.layer.take() {
            self.host.remove_layer(layer);
        }
        self.cycle = None;
    }

    /// Release cycle resources. Returns [MenuState::Closed] if the state changed.
    fn release(&mut self) -> Option<MenuState> {
        self.gesture.cancel();
        self.controller.reset();
        self.teardown_cycle();

        if self.machine.state() == MenuState::Closed {
            return None;
        }
        self.machine.reset();
        self.sync_shared_state(MenuState::Closed);
        Some(MenuState::Closed)
    }

    fn apply_status(&mut self, status: Option<AnimationStatus>) -> MenuUpdate {
        let Some(state) = status.and_then(|status| self.machine.apply(status)) else {
            return MenuUpdate::empty();
        };

        if state == MenuState::Closed {
            self.teardown_cycle();
        }
        self.sync_shared_state(state);
        self.notify(state);

        MenuUpdate::STATE | MenuUpdate::DRAW
    }

    fn poll_layout(&mut self) -> Result<MenuUpdate, MenuError> {
        if self.controller.value() <= 0.0 {
            return Ok(MenuUpdate::empty());
        }

        let host = &self.host;
        let outcome = match self.cycle.as_mut() {
            Some(cycle) if !cycle.is_resolved() => cycle.poll_measurements(|index| host.measure_item(index)),
            _ => return Ok(MenuUpdate::empty()),
        };

        match outcome {
            MeasureOutcome::Pending => Ok(MenuUpdate::empty()),
            MeasureOutcome::Resolved => Ok(self.layout_resolved()),
            MeasureOutcome::Failed { ticks, unmeasured } => {
                log::error!(
                    "Giving up on layout after {} ticks, {} items never reported a size",
                    ticks,
                    unmeasured
                );
                if let Some(state) = self.release() {
                    self.notify(state);
                }
                Err(MenuError::MeasurementTimeout { ticks, unmeasured })
            },
        }
    }

    fn layout_resolved(&mut self) -> MenuUpdate {
        if let (Some(layer), Some(bounds)) = (self.layer, self.items_bounds()) {
            self.host.set_layer_bounds(layer, bounds);
        }
        MenuUpdate::LAYOUT | MenuUpdate::DRAW
    }

    fn notify(&mut self, state: MenuState) {
        if let Some(callback) = self.on_state_changed.as_mut() {
            callback(state);
        }
    }

    fn sync_shared_state(&self, state: MenuState) {
        if let Some(shared) = &self.shared {
            shared.borrow_mut().state = state;
        }
    }

    fn push_request(&self, request: MenuRequest) {
        if let Some(shared) = &self.shared {
            shared.borrow_mut().requests.push_back(request);
        }
    }

    fn pop_request(&self) -> Option<MenuRequest> {
        self.shared.as_ref()?.borrow_mut().requests.pop_front()
    }

    /// Carry out queued close requests up to the first open request, which
    /// needs [process_requests](Self::process_requests).
    fn process_close_requests(&mut self) -> Result<MenuUpdate, MenuError> {
        let mut update = MenuUpdate::empty();

        loop {
            let next = self
                .shared
                .as_ref()
                .and_then(|shared| shared.borrow().requests.front().copied());

            match next {
                Some(MenuRequest::Close) => {
                    self.pop_request();
                    update |= self.close()?;
                },
                Some(MenuRequest::Open(_)) => return Ok(update | MenuUpdate::REQUEST),
                None => return Ok(update),
            }
        }
    }
}

impl<H: MenuHost> Drop for FlowMenu<H> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_affine() {
        let transform = ItemTransform {
            translation: Vector2::new(10.0, 20.0),
            scale: 2.0,
            rotation: 0.0,
        };

        let point = transform.to_affine() * Point::new(1.0, 1.0);
        assert_eq!(point, Point::new(12.0, 22.0));
    }

    #[test]
    fn test_collapsed_transform() {
        let transform = ItemTransform {
            translation: Vector2::new(5.0, 5.0),
            scale: 0.0,
            rotation: 0.0,
        };

        let point = transform.to_affine() * Point::new(30.0, -30.0);
        assert_eq!(point, Point::new(5.0, 5.0));
    }
}
