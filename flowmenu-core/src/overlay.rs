// SPDX-License-Identifier: MIT OR Apache-2.0

//! Overlay layer registry
//!
//! A minimal overlay stack. Hosts without their own overlay system can use
//! [OverlayStack] to satisfy [LayerHost].

use crate::host::LayerHost;
use vello::kurbo::{Point, Rect};

/// Unique identifier for overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u32);

impl OverlayId {
    /// Create a new overlay ID with the given value
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Stacking level of an overlay layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayLevel {
    /// Dropdowns, context menus and flow menus
    Popup = 2,
}

/// A registered layer.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayer {
    /// Unique identifier for this overlay
    pub id: OverlayId,
    /// The stacking level of this overlay
    pub level: OverlayLevel,
    /// Area covered by the layer content, if known
    pub bounds: Option<Rect>,
}

/// Registry of overlay layers.
#[derive(Debug, Clone)]
pub struct OverlayStack {
    layers: Vec<OverlayLayer>,
    next_id: u32,
}

impl OverlayStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            next_id: 1,
        }
    }

    fn next_id(&mut self) -> OverlayId {
        let id = OverlayId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a new layer.
    pub fn add_layer(&mut self, level: OverlayLevel) -> OverlayId {
        let id = self.next_id();
        self.layers.push(OverlayLayer {
            id,
            level,
            bounds: None,
        });
        log::debug!("Added overlay layer {:?} at level {:?}", id, level);
        id
    }

    /// Remove a layer. Returns `false` if it was not registered.
    pub fn remove_layer(&mut self, id: OverlayId) -> bool {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.id != id);
        let removed = self.layers.len() != before;
        if removed {
            log::debug!("Removed overlay layer {:?}", id);
        }
        removed
    }

    /// Get a layer by id.
    pub fn layer(&self, id: OverlayId) -> Option<&OverlayLayer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    /// Whether the layer is registered.
    pub fn contains(&self, id: OverlayId) -> bool {
        self.layer(id).is_some()
    }

    /// Number of registered layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Update the area covered by a layer.
    pub fn set_bounds(&mut self, id: OverlayId, bounds: Rect) -> bool {
        match self.layers.iter_mut().find(|layer| layer.id == id) {
            Some(layer) => {
                layer.bounds = Some(bounds);
                true
            },
            None => false,
        }
    }

    /// Whether a point lies inside any layer with known bounds.
    pub fn is_point_inside_overlay(&self, point: Point) -> bool {
        self.layers
            .iter()
            .filter_map(|layer| layer.bounds)
            .any(|bounds| bounds.contains(point))
    }
}

impl Default for OverlayStack {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerHost for OverlayStack {
    fn present_layer(&mut self, level: OverlayLevel) -> OverlayId {
        self.add_layer(level)
    }

    fn remove_layer(&mut self, id: OverlayId) -> bool {
        OverlayStack::remove_layer(self, id)
    }

    fn set_layer_bounds(&mut self, id: OverlayId, bounds: Rect) {
        self.set_bounds(id, bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut stack = OverlayStack::new();

        let a = stack.add_layer(OverlayLevel::Popup);
        let b = stack.add_layer(OverlayLevel::Popup);
        assert_ne!(a, b);
        assert_eq!(stack.layer_count(), 2);

        assert!(stack.remove_layer(a));
        assert!(!stack.remove_layer(a));
        assert!(!stack.contains(a));
        assert!(stack.contains(b));
    }

    #[test]
    fn test_bounds_follow_layer() {
        let mut stack = OverlayStack::new();
        let id = stack.add_layer(OverlayLevel::Popup);

        assert_eq!(stack.layer(id).and_then(|layer| layer.bounds), None);
        assert!(stack.set_bounds(id, Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(stack.layer(id).map(|layer| layer.level), Some(OverlayLevel::Popup));

        stack.remove_layer(id);
        assert!(!stack.set_bounds(id, Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_point_inside_overlay() {
        let mut stack = OverlayStack::new();
        let id = stack.add_layer(OverlayLevel::Popup);

        assert!(!stack.is_point_inside_overlay(Point::new(5.0, 5.0)));

        stack.set_bounds(id, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(stack.is_point_inside_overlay(Point::new(5.0, 5.0)));
        assert!(!stack.is_point_inside_overlay(Point::new(15.0, 5.0)));

        stack.remove_layer(id);
        assert!(!stack.is_point_inside_overlay(Point::new(5.0, 5.0)));
    }
}
