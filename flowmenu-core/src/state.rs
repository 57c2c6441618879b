// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::animation::AnimationStatus;

/// Visible lifecycle state of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuState {
    /// Nothing is shown.
    #[default]
    Closed,
    /// Items are unfolding.
    Opening,
    /// Items rest at their fitted positions.
    Open,
    /// Items are folding back.
    Closing,
}

impl MenuState {
    /// Whether the menu has a presented layer.
    pub fn is_visible(self) -> bool {
        !matches!(self, MenuState::Closed)
    }
}

impl From<AnimationStatus> for MenuState {
    fn from(status: AnimationStatus) -> Self {
        match status {
            AnimationStatus::Dismissed => MenuState::Closed,
            AnimationStatus::Forward => MenuState::Opening,
            AnimationStatus::Completed => MenuState::Open,
            AnimationStatus::Reverse => MenuState::Closing,
        }
    }
}

/// Maps progress driver statuses onto [MenuState] and filters repeats.
#[derive(Debug, Clone, Default)]
pub struct MenuStateMachine {
    state: MenuState,
}

impl MenuStateMachine {
    /// Create a new state machine in [MenuState::Closed].
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Apply a driver status. Returns the new state if it changed.
    pub fn apply(&mut self, status: AnimationStatus) -> Option<MenuState> {
        let next = MenuState::from(status);
        if next == self.state {
            return None;
        }

        log::debug!("Menu state {:?} -> {:?}", self.state, next);
        self.state = next;
        Some(next)
    }

    /// Force the machine back to [MenuState::Closed] without reporting.
    pub fn reset(&mut self) {
        self.state = MenuState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close_sequence() {
        let mut machine = MenuStateMachine::new();

        assert_eq!(machine.apply(AnimationStatus::Forward), Some(MenuState::Opening));
        assert_eq!(machine.apply(AnimationStatus::Completed), Some(MenuState::Open));
        assert_eq!(machine.apply(AnimationStatus::Reverse), Some(MenuState::Closing));
        assert_eq!(machine.apply(AnimationStatus::Dismissed), Some(MenuState::Closed));
    }

    #[test]
    fn test_reversal_skips_open() {
        let mut machine = MenuStateMachine::new();

        machine.apply(AnimationStatus::Forward);
        assert_eq!(machine.apply(AnimationStatus::Reverse), Some(MenuState::Closing));
        assert_eq!(machine.apply(AnimationStatus::Forward), Some(MenuState::Opening));
        assert_eq!(machine.state(), MenuState::Opening);
    }

    #[test]
    fn test_repeats_are_filtered() {
        let mut machine = MenuStateMachine::new();

        assert_eq!(machine.apply(AnimationStatus::Dismissed), None);
        machine.apply(AnimationStatus::Forward);
        assert_eq!(machine.apply(AnimationStatus::Forward), None);

        machine.reset();
        assert_eq!(machine.state(), MenuState::Closed);
        assert!(!machine.state().is_visible());
    }
}
