// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::config::MenuConfig;
use crate::error::MenuError;
use crate::geometry::Shape;
use crate::host::{Anchor, MenuHost};
use crate::item::{ItemProvider, ItemSource, MenuItem};
use crate::menu::{FlowMenu, MenuHandle};
use crate::state::MenuState;
use vello::kurbo::Rect;

pub(crate) type StateCallback = Box<dyn FnMut(MenuState)>;
pub(crate) type ActivateCallback = Box<dyn FnMut(usize, &MenuHandle)>;

/// Builder for a [FlowMenu].
///
/// Exactly one item source ([with_items](Self::with_items) or
/// [with_provider](Self::with_provider)) and exactly one anchor
/// ([with_anchor_widget](Self::with_anchor_widget) or
/// [with_anchor_bounds](Self::with_anchor_bounds)) must be given.
#[derive(Default)]
pub struct MenuBuilder {
    config: MenuConfig,
    items: Option<Vec<MenuItem>>,
    provider: Option<Box<dyn ItemProvider>>,
    anchor_widget: Option<String>,
    anchor_bounds: Option<Rect>,
    on_state_changed: Option<StateCallback>,
    on_item_activated: Option<ActivateCallback>,
}

impl MenuBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: MenuConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the item arrangement.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.config.shape = shape;
        self
    }

    /// Use a static item list.
    pub fn with_items(mut self, items: impl IntoIterator<Item = MenuItem>) -> Self {
        self.items = Some(items.into_iter().collect());
        self
    }

    /// Query `provider` for the items on every open request.
    pub fn with_provider(mut self, provider: impl ItemProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Unfold from the widget with the given id.
    pub fn with_anchor_widget(mut self, widget_id: impl ToString) -> Self {
        self.anchor_widget = Some(widget_id.to_string());
        self
    }

    /// Unfold from fixed screen bounds.
    pub fn with_anchor_bounds(mut self, bounds: Rect) -> Self {
        self.anchor_bounds = Some(bounds);
        self
    }

    /// Called on every state transition.
    pub fn with_on_state_changed<F>(mut self, callback: F) -> Self
    where
        F: FnMut(MenuState) + 'static,
    {
        self.on_state_changed = Some(Box::new(callback));
        self
    }

    /// Called when an enabled item is activated. The handle can be used to
    /// close the menu.
    pub fn with_on_item_activated<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize, &MenuHandle) + 'static,
    {
        self.on_item_activated = Some(Box::new(callback));
        self
    }

    /// Validate the builder and create the menu on `host`.
    pub fn build<H: MenuHost>(self, host: H) -> Result<FlowMenu<H>, MenuError> {
        let source = match (self.items, self.provider) {
            (Some(_), Some(_)) => return Err(MenuError::ConflictingItemSource),
            (None, None) => return Err(MenuError::MissingItemSource),
            (Some(items), None) => ItemSource::Static(items),
            (None, Some(provider)) => ItemSource::Provider(provider),
        };

        let anchor = match (self.anchor_widget, self.anchor_bounds) {
            (Some(_), Some(_)) => return Err(MenuError::ConflictingAnchor),
            (None, None) => return Err(MenuError::MissingAnchor),
            (Some(id), None) => Anchor::Widget(id),
            (None, Some(bounds)) => Anchor::Bounds(bounds),
        };

        self.config.validate()?;

        Ok(FlowMenu::new(
            host,
            self.config,
            source,
            anchor,
            self.on_state_changed,
            self.on_item_activated,
        ))
    }
}
