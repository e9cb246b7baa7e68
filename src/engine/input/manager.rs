// Input manager - routes host window events to the action-mapped player state

use super::action::InputSource;
use super::config::InputConfig;
use super::player::PlayerInput;
use glam::Vec2;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Where the flashlight aim is coming from this frame
///
/// The pointer variant carries a screen-space position; the stick variant
/// carries a raw axis value. Only pointer aim is currently acted upon
/// downstream, the stick path is reserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AimInput {
    Pointer(Vec2),
    Stick(f32),
}

/// Coordinates all input: event decoding, binding lookup, frame bookkeeping
pub struct InputManager {
    /// Active binding configuration
    config: InputConfig,

    /// The player's action state
    player: PlayerInput,

    /// Last known pointer position in screen coordinates
    pointer_position: Option<Vec2>,
}

impl InputManager {
    /// Create a new input manager with the standard bindings
    pub fn new() -> Self {
        Self {
            config: InputConfig::standard(),
            player: PlayerInput::new(),
            pointer_position: None,
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            let source = InputSource::key(key_code);

            if let Some(action) = self.config.get_action(source) {
                match event.state {
                    ElementState::Pressed => {
                        if !event.repeat {
                            // Only register if not a key repeat
                            self.player.press(action);
                        }
                    }
                    ElementState::Released => {
                        self.player.release(action);
                    }
                }
            }
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let source = InputSource::mouse(button);
        if let Some(action) = self.config.get_action(source) {
            match state {
                ElementState::Pressed => self.player.press(action),
                ElementState::Released => self.player.release(action),
            }
        }
    }

    /// Record the pointer's screen position from a cursor-moved event
    pub fn process_cursor_moved(&mut self, x: f32, y: f32) {
        self.pointer_position = Some(Vec2::new(x, y));
    }

    /// Update the input state for a new frame
    /// Call this once per frame after processing all events
    pub fn update(&mut self) {
        self.player.update();
    }

    /// Get the player's input state
    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    /// Get mutable player input state (used by tests and scripted input)
    pub fn player_mut(&mut self) -> &mut PlayerInput {
        &mut self.player
    }

    /// The current aim source: pointer position when the cursor has been
    /// seen, nothing otherwise (no gamepad support yet)
    pub fn aim_input(&self) -> Option<AimInput> {
        self.pointer_position.map(AimInput::Pointer)
    }

    /// Get the binding configuration
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Get mutable binding configuration (for remapping)
    pub fn config_mut(&mut self) -> &mut InputConfig {
        &mut self.config
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.player.reset();
        self.pointer_position = None;
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;

    #[test]
    fn test_manager_creation() {
        let manager = InputManager::new();
        assert!(!manager.player().is_pressed(Action::Jump));
        assert_eq!(manager.aim_input(), None);
    }

    #[test]
    fn test_direct_input_manipulation() {
        let mut manager = InputManager::new();
        manager.player_mut().press(Action::MoveLeft);
        assert!(manager.player().is_pressed(Action::MoveLeft));
    }

    #[test]
    fn test_mouse_button_binding() {
        let mut manager = InputManager::new();
        manager.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        assert!(manager.player().just_pressed(Action::Flashlight));

        manager.process_mouse_button(MouseButton::Right, ElementState::Released);
        assert!(!manager.player().is_pressed(Action::Flashlight));
    }

    #[test]
    fn test_update_clears_just_pressed() {
        let mut manager = InputManager::new();
        manager.player_mut().press(Action::Interact);
        assert!(manager.player().just_pressed(Action::Interact));

        manager.update();
        assert!(!manager.player().just_pressed(Action::Interact));
        assert!(manager.player().is_pressed(Action::Interact));
    }

    #[test]
    fn test_cursor_tracking() {
        let mut manager = InputManager::new();
        manager.process_cursor_moved(320.0, 240.0);
        assert_eq!(
            manager.aim_input(),
            Some(AimInput::Pointer(Vec2::new(320.0, 240.0)))
        );
    }

    #[test]
    fn test_reset_clears_pointer() {
        let mut manager = InputManager::new();
        manager.process_cursor_moved(10.0, 10.0);
        manager.player_mut().press(Action::Jump);

        manager.reset();
        assert_eq!(manager.aim_input(), None);
        assert!(!manager.player().is_pressed(Action::Jump));
    }
}
