// SPDX-License-Identifier: MIT OR Apache-2.0

//! Menu construction, open cycle and configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or driving a menu.
#[derive(Debug, Error)]
pub enum MenuError {
    /// Both a static item list and an item provider were supplied.
    #[error("Both static items and an item provider were supplied")]
    ConflictingItemSource,

    /// Neither a static item list nor an item provider was supplied.
    #[error("No item source supplied (expected static items or an item provider)")]
    MissingItemSource,

    /// Both an anchor widget and explicit anchor bounds were supplied.
    #[error("Both an anchor widget and explicit anchor bounds were supplied")]
    ConflictingAnchor,

    /// Neither an anchor widget nor explicit anchor bounds were supplied.
    #[error("No anchor supplied (expected an anchor widget or explicit anchor bounds)")]
    MissingAnchor,

    /// The configuration was rejected.
    #[error("Invalid menu configuration: {0}")]
    Config(#[from] ConfigError),

    /// The asynchronous item provider failed; the open cycle was aborted.
    #[error("Item provider failed: {0}")]
    Provider(anyhow::Error),

    /// Some items never reported a non-empty rectangle.
    #[error("Measurement did not resolve after {ticks} ticks ({unmeasured} items unmeasured)")]
    MeasurementTimeout {
        /// Number of ticks spent waiting.
        ticks: u32,
        /// Number of items still without a rectangle.
        unmeasured: usize,
    },

    /// The menu (or the handle's menu) has been disposed.
    #[error("Menu has been disposed")]
    Disposed,
}

/// Errors that can occur when loading or validating a [MenuConfig](crate::config::MenuConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read menu config {0}: {1}")]
    Read(PathBuf, std::io::Error),

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse menu config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside of its accepted range.
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
