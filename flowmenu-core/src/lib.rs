// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core of flowmenu: a popup menu that unfolds its items into a circle, a line
//! or a grid around a trigger.
//!
//! The crate is independent of any widget toolkit. A host implements
//! [MenuHost](host::MenuHost) (overlay layers, item measurement, screen
//! metrics), feeds pointer events and frame ticks into a
//! [FlowMenu](menu::FlowMenu) and paints the items with the transforms it
//! returns.

/// Open and close animation: easing and the progress driver.
pub mod animation;

/// Screen edge handling.
pub mod boundary;

/// Resolution of the menu center.
pub mod center;

/// Menu configuration.
pub mod config;

/// Error types.
pub mod error;

/// Item placement for all shapes.
pub mod geometry;

/// Tap and long-press recognition.
pub mod gesture;

/// Capabilities of the host UI.
pub mod host;

/// Menu items and item providers.
pub mod item;

/// Per open cycle layout state.
pub mod layout;

/// The menu controller, its builder and handles.
pub mod menu;

/// Overlay layer registry.
pub mod overlay;

/// Menu lifecycle states.
pub mod state;

/// Update flags returned by the menu.
pub mod update;

pub use error::{ConfigError, MenuError};
pub use menu::{FlowMenu, MenuBuilder, MenuHandle};
