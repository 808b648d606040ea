use std::collections::HashMap;
use winit::{
    event::{ElementState, KeyEvent},
    keyboard::PhysicalKey,
};

pub use winit::keyboard::KeyCode;

/// Edge-triggered keyboard state, rolled over once per frame
#[derive(Default)]
pub struct Input {
    keyboard: HashMap<KeyCode, (ElementState, ElementState)>,
}

impl Input {
    /// True only on the frame the key went down; OS key repeats don't retrigger
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keyboard.get(&key).map_or(false, |(curr, prev)| {
            *curr == ElementState::Pressed && *prev != ElementState::Pressed
        })
    }

    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keyboard
            .get(&key)
            .map_or(false, |(curr, _)| *curr == ElementState::Pressed)
    }

    pub fn key_released(&self, key: KeyCode) -> bool {
        self.keyboard
            .get(&key)
            .map_or(false, |(curr, _)| *curr == ElementState::Released)
    }

    pub(crate) fn keyboard(&mut self, event: KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            let prev = self
                .keyboard
                .get(&key_code)
                .map_or(ElementState::Released, |(curr, _)| *curr);
            self.keyboard.insert(key_code, (event.state, prev));
        }
    }

    pub(crate) fn end_frame(&mut self) {
        for (curr, prev) in self.keyboard.values_mut() {
            *prev = *curr;
        }
        self.keyboard
            .retain(|_, (curr, _)| *curr != ElementState::Released);
    }
}

#[cfg(test)]
impl Input {
    pub fn inject_key(&mut self, key: KeyCode, state: ElementState) {
        let prev = self
            .keyboard
            .get(&key)
            .map_or(ElementState::Released, |(curr, _)| *curr);
        self.keyboard.insert(key, (state, prev));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::ElementState::{Pressed, Released};

    #[test]
    fn key_press_and_release_behavior() {
        // press -> hold -> release flow
        let mut input = Input::default();
        input.inject_key(KeyCode::KeyN, Pressed);
        assert!(input.key_pressed(KeyCode::KeyN));
        assert!(input.key_held(KeyCode::KeyN));
        assert!(!input.key_released(KeyCode::KeyN));

        input.end_frame(); // clears the pressed edge
        assert!(!input.key_pressed(KeyCode::KeyN));
        assert!(input.key_held(KeyCode::KeyN));

        input.inject_key(KeyCode::KeyN, Released);
        assert!(input.key_released(KeyCode::KeyN));
        assert!(!input.key_held(KeyCode::KeyN));

        input.end_frame(); // drops released keys from the map
        assert!(!input.key_held(KeyCode::KeyN));
        assert!(!input.key_released(KeyCode::KeyN));
    }

    #[test]
    fn key_repeat_does_not_retrigger() {
        // a held key re-reported as pressed must not read as a new press
        let mut input = Input::default();
        input.inject_key(KeyCode::KeyQ, Pressed);
        input.end_frame();

        input.inject_key(KeyCode::KeyQ, Pressed);
        assert!(!input.key_pressed(KeyCode::KeyQ));
        assert!(input.key_held(KeyCode::KeyQ));
    }

    #[test]
    fn unknown_key_reads_idle() {
        let input = Input::default();
        assert!(!input.key_pressed(KeyCode::KeyC));
        assert!(!input.key_held(KeyCode::KeyC));
        assert!(!input.key_released(KeyCode::KeyC));
    }
}
