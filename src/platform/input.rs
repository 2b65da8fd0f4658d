//! Input symbols and held / just-pressed tracking
//!
//! Level-triggered queries (`is_held`) drive movement and firing; edge-triggered
//! queries (`is_just_pressed`) drive menu toggles and purchases. Edges are
//! cleared by `end_frame()` once the scene has consumed them.

use std::collections::HashSet;

/// The fixed set of inputs the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSymbol {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    KeyP,
    KeyF,
    Digit1,
    Digit2,
    Digit3,
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<InputSymbol>,
    just_pressed: HashSet<InputSymbol>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: InputSymbol) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: InputSymbol) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: InputSymbol) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: InputSymbol) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_sets_held_and_just_pressed() {
        let mut input = InputState::new();
        input.press(InputSymbol::Space);
        assert!(input.is_held(InputSymbol::Space));
        assert!(input.is_just_pressed(InputSymbol::Space));
    }

    #[test]
    fn test_repeat_press_keeps_single_edge() {
        let mut input = InputState::new();
        input.press(InputSymbol::KeyF);
        input.end_frame();
        // Key still held: a repeated press event must not produce a new edge
        input.press(InputSymbol::KeyF);
        assert!(input.is_held(InputSymbol::KeyF));
        assert!(!input.is_just_pressed(InputSymbol::KeyF));
    }

    #[test]
    fn test_release_without_press_is_no_op() {
        let mut input = InputState::new();
        input.release(InputSymbol::KeyP);
        assert!(!input.is_held(InputSymbol::KeyP));
        assert!(!input.is_just_pressed(InputSymbol::KeyP));
    }

    #[test]
    fn test_end_frame_keeps_held() {
        let mut input = InputState::new();
        input.press(InputSymbol::ArrowLeft);
        input.press(InputSymbol::Space);
        input.end_frame();
        assert!(!input.is_just_pressed(InputSymbol::ArrowLeft));
        assert!(input.is_held(InputSymbol::ArrowLeft));
        assert!(input.is_held(InputSymbol::Space));

        input.release(InputSymbol::Space);
        assert!(!input.is_held(InputSymbol::Space));
    }

    #[test]
    fn test_release_then_press_is_a_new_edge() {
        let mut input = InputState::new();
        input.press(InputSymbol::Digit2);
        input.end_frame();
        input.release(InputSymbol::Digit2);
        input.press(InputSymbol::Digit2);
        assert!(input.is_just_pressed(InputSymbol::Digit2));
    }
}
