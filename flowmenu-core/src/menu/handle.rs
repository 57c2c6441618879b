// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::MenuError;
use crate::state::MenuState;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use vello::kurbo::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum MenuRequest {
    Open(Option<Point>),
    Close,
}

/// State shared between a menu and its handles.
#[derive(Debug, Default)]
pub(crate) struct HandleShared {
    pub(crate) requests: VecDeque<MenuRequest>,
    pub(crate) state: MenuState,
}

impl HandleShared {
    pub(crate) fn new_shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }
}

/// Programmatic control over a [FlowMenu](crate::menu::FlowMenu).
///
/// Requests are queued and carried out by the menu on its next
/// [process_requests](crate::menu::FlowMenu::process_requests) (close requests
/// issued from an item activation callback are carried out right away). Once
/// the menu is disposed, every call fails with [MenuError::Disposed].
#[derive(Debug, Clone)]
pub struct MenuHandle {
    shared: Weak<RefCell<HandleShared>>,
}

impl MenuHandle {
    pub(crate) fn new(shared: &Rc<RefCell<HandleShared>>) -> Self {
        Self {
            shared: Rc::downgrade(shared),
        }
    }

    pub(crate) fn detached() -> Self {
        Self { shared: Weak::new() }
    }

    /// Request the menu to open.
    pub fn open(&self) -> Result<(), MenuError> {
        self.push(MenuRequest::Open(None))
    }

    /// Request the menu to close.
    pub fn close(&self) -> Result<(), MenuError> {
        self.push(MenuRequest::Close)
    }

    /// Whether the menu behind this handle is still alive.
    pub fn is_ready(&self) -> bool {
        self.shared.strong_count() > 0
    }

    /// Last state reported by the menu, or `None` once disposed.
    pub fn state(&self) -> Option<MenuState> {
        self.shared.upgrade().map(|shared| shared.borrow().state)
    }

    fn push(&self, request: MenuRequest) -> Result<(), MenuError> {
        let shared = self.shared.upgrade().ok_or(MenuError::Disposed)?;
        shared.borrow_mut().requests.push_back(request);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_are_queued() {
        let shared = HandleShared::new_shared();
        let handle = MenuHandle::new(&shared);

        handle.open().unwrap();
        handle.clone().close().unwrap();

        let requests: Vec<_> = shared.borrow().requests.iter().copied().collect();
        assert_eq!(requests, vec![MenuRequest::Open(None), MenuRequest::Close]);
        assert_eq!(handle.state(), Some(MenuState::Closed));
    }

    #[test]
    fn test_handle_invalidated_with_menu() {
        let shared = HandleShared::new_shared();
        let handle = MenuHandle::new(&shared);
        assert!(handle.is_ready());

        drop(shared);
        assert!(!handle.is_ready());
        assert!(matches!(handle.open(), Err(MenuError::Disposed)));
        assert_eq!(handle.state(), None);
        assert!(!MenuHandle::detached().is_ready());
    }
}
