// SPDX-License-Identifier: MIT OR Apache-2.0

//! Menu items and where they come from.

use crate::error::MenuError;
use async_trait::async_trait;
use nalgebra::Vector2;
use std::future::Future;
use vello::kurbo::Rect;

/// A single entry of a flow menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Consumer-defined identifier.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Whether the item can be activated.
    pub enabled: bool,
}

impl MenuItem {
    /// Create an enabled item.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            enabled: true,
        }
    }

    /// Set whether the item can be activated.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Produces the item list asynchronously, once per open request.
#[async_trait(?Send)]
pub trait ItemProvider {
    /// Produce the items for the next open cycle.
    async fn provide(&self) -> anyhow::Result<Vec<MenuItem>>;
}

/// [ItemProvider] backed by a closure returning a future.
pub struct FnProvider<F> {
    f: F,
}

/// Wrap a closure into an [ItemProvider].
pub fn provider_fn<F, Fut>(f: F) -> FnProvider<F>
where
    F: Fn() -> Fut,
    Fut: Future<Output = anyhow::Result<Vec<MenuItem>>>,
{
    FnProvider { f }
}

#[async_trait(?Send)]
impl<F, Fut> ItemProvider for FnProvider<F>
where
    F: Fn() -> Fut,
    Fut: Future<Output = anyhow::Result<Vec<MenuItem>>>,
{
    async fn provide(&self) -> anyhow::Result<Vec<MenuItem>> {
        (self.f)().await
    }
}

/// Static items or a provider.
pub enum ItemSource {
    /// A fixed list, cloned for each cycle.
    Static(Vec<MenuItem>),
    /// Queried for every open request.
    Provider(Box<dyn ItemProvider>),
}

impl ItemSource {
    /// Resolve the items for a new open cycle.
    pub async fn resolve(&self) -> Result<Vec<MenuItem>, MenuError> {
        match self {
            ItemSource::Static(items) => Ok(items.clone()),
            ItemSource::Provider(provider) => provider.provide().await.map_err(|err| {
                log::error!("Item provider failed: {:#}", err);
                MenuError::Provider(err)
            }),
        }
    }
}

impl std::fmt::Debug for ItemSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemSource::Static(items) => f.debug_tuple("Static").field(items).finish(),
            ItemSource::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Per-item layout record of one open cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSpec {
    /// Position of the item in the cycle's item list.
    pub index: usize,
    /// Measured on-screen rectangle, `None` until measured.
    pub rect: Option<Rect>,
    /// Fitted item center, `None` until the layout resolved.
    pub target: Option<Vector2<f64>>,
}

impl ItemSpec {
    /// An unmeasured spec.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            rect: None,
            target: None,
        }
    }

    /// Whether a non-empty rectangle has been recorded.
    pub fn is_measured(&self) -> bool {
        self.rect.is_some_and(is_non_empty)
    }
}

/// A rectangle with positive width and height.
pub fn is_non_empty(rect: Rect) -> bool {
    rect.width() > 0.0 && rect.height() > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source_clones() {
        let source = ItemSource::Static(vec![MenuItem::new("a", "A"), MenuItem::new("b", "B").with_enabled(false)]);

        let items = smol::block_on(source.resolve()).unwrap();
        assert_eq!(items.len(), 2);
        assert!(!items[1].enabled);
    }

    #[test]
    fn test_provider_error_is_wrapped() {
        let source = ItemSource::Provider(Box::new(provider_fn(|| async { Err::<Vec<MenuItem>, _>(anyhow::anyhow!("offline")) })));

        let err = smol::block_on(source.resolve()).unwrap_err();
        assert!(matches!(err, MenuError::Provider(_)));
        assert!(err.to_string().contains("offline"));
    }

    #[test]
    fn test_spec_measurement() {
        let mut spec = ItemSpec::new(0);
        assert!(!spec.is_measured());

        spec.rect = Some(Rect::new(0.0, 0.0, 0.0, 10.0));
        assert!(!spec.is_measured());

        spec.rect = Some(Rect::new(0.0, 0.0, 4.0, 10.0));
        assert!(spec.is_measured());
    }
}
