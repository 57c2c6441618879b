#![warn(missing_docs)]

//! Popup menus that unfold their items into circles, lines and grids.

pub use nalgebra as math;
pub use vello::kurbo;

pub use flowmenu_core as core;

/// A "prelude" for users of flowmenu.
///
/// Importing this module brings into scope the most common types
/// needed to embed a flow menu into a host UI.
///
/// ```rust
/// use flowmenu::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::animation::Easing;
    pub use crate::core::boundary::{BoundaryPolicy, Padding};
    pub use crate::core::center::{CenterConfig, CenterStrategy};
    pub use crate::core::config::{AnimationConfig, MenuConfig};
    pub use crate::core::error::{ConfigError, MenuError};
    pub use crate::core::geometry::{LinearAlignment, Shape};
    pub use crate::core::gesture::{OpenTrigger, PointerEvent};
    pub use crate::core::host::{LayerHost, MenuHost};
    pub use crate::core::item::{provider_fn, ItemProvider, MenuItem};
    pub use crate::core::menu::{FlowMenu, ItemTransform, MenuBuilder, MenuHandle};
    pub use crate::core::overlay::{OverlayId, OverlayLevel, OverlayStack};
    pub use crate::core::state::MenuState;
    pub use crate::core::update::MenuUpdate;

    // Math
    pub use nalgebra::Vector2;
    pub use vello::kurbo::{Point, Rect, Size};
}
