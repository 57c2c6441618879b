// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capabilities a host UI framework provides to a [FlowMenu](crate::menu::FlowMenu).

use crate::overlay::{OverlayId, OverlayLevel};
use nalgebra::Vector2;
use vello::kurbo::Rect;

/// Insertion and removal of overlay layers.
pub trait LayerHost {
    /// Present a new layer above the regular widget tree.
    fn present_layer(&mut self, level: OverlayLevel) -> OverlayId;

    /// Remove a previously presented layer. Returns `false` if it was unknown.
    fn remove_layer(&mut self, id: OverlayId) -> bool;

    /// Inform the host about the area covered by a layer. Used for hit-testing
    /// background taps.
    fn set_layer_bounds(&mut self, _id: OverlayId, _bounds: Rect) {}
}

/// Everything a menu needs from its host.
pub trait MenuHost: LayerHost {
    /// On-screen rectangle of the item at `index`, once it has been laid out.
    ///
    /// Returning `None` or an empty rectangle keeps the measurement pending.
    fn measure_item(&self, index: usize) -> Option<Rect>;

    /// On-screen rectangle of the widget with the given id.
    fn widget_bounds(&self, widget_id: &str) -> Option<Rect>;

    /// Size of the visible screen area.
    fn screen_size(&self) -> Vector2<f64>;

    /// Height reserved at the top of the screen (status bar and similar).
    fn top_inset(&self) -> f64 {
        0.0
    }
}

/// What the menu unfolds from.
#[derive(Debug, Clone, PartialEq)]
pub enum Anchor {
    /// A widget resolved through [MenuHost::widget_bounds] at open time.
    Widget(String),
    /// Fixed screen bounds.
    Bounds(Rect),
}

impl Anchor {
    /// Resolve the anchor to screen bounds.
    pub fn resolve<H: MenuHost + ?Sized>(&self, host: &H) -> Option<Rect> {
        match self {
            Anchor::Widget(id) => {
                let bounds = host.widget_bounds(id);
                if bounds.is_none() {
                    log::warn!("Anchor widget {:?} has no bounds", id);
                }
                bounds
            },
            Anchor::Bounds(bounds) => Some(*bounds),
        }
    }
}
