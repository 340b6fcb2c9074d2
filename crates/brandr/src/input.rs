//! Pointer state fed in by the host.
//!
//! The engine owns no window, so whatever drives it (an editor viewport, a
//! test, a headless demo) writes the cursor position and held mouse buttons
//! into a [`PointerState`] before each tick. The game loop turns held buttons
//! into click edges for [`Button`](crate::components::Button)s.

use std::collections::HashSet;

use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Cursor position in world space plus the set of held mouse buttons.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    position: Vec2,
    held: HashSet<MouseButton>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn press(&mut self, button: MouseButton) {
        self.held.insert(button);
    }

    pub fn release(&mut self, button: MouseButton) {
        self.held.remove(&button);
    }

    /// Returns `true` while the button is held down.
    pub fn is_held(&self, button: MouseButton) -> bool {
        self.held.contains(&button)
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut pointer = PointerState::new();
        pointer.press(MouseButton::Left);
        pointer.press(MouseButton::Left);
        assert!(pointer.is_held(MouseButton::Left));
        assert!(!pointer.is_held(MouseButton::Right));
        pointer.release(MouseButton::Left);
        assert!(!pointer.is_held(MouseButton::Left));
    }
}
