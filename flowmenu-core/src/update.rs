// SPDX-License-Identifier: MIT OR Apache-2.0

use bitflags::bitflags;

bitflags! {
    /// What the host has to do after driving a menu.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MenuUpdate: u8 {
        /// Item transforms changed, repaint.
        const DRAW = 0b0001;
        /// The layout was (re)computed or the layer changed.
        const LAYOUT = 0b0010;
        /// The menu state changed.
        const STATE = 0b0100;
        /// Open or close requests are queued. Call
        /// [FlowMenu::process_requests](crate::menu::FlowMenu::process_requests).
        const REQUEST = 0b1000;
    }
}
