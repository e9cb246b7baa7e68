// Player input state management

use super::action::Action;
use std::collections::HashSet;

/// Edge- and level-triggered input state for the player
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently pressed this frame
    pressed: HashSet<Action>,

    /// Actions that were just pressed this frame (press events)
    just_pressed: HashSet<Action>,

    /// Actions that were just released this frame (release events)
    just_released: HashSet<Action>,

    /// Actions that were pressed in the previous frame
    previous_pressed: HashSet<Action>,
}

impl PlayerInput {
    /// Create a new player input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Check if an action is held (pressed for multiple frames)
    pub fn is_held(&self, action: Action) -> bool {
        self.pressed.contains(&action) && self.previous_pressed.contains(&action)
    }

    /// Horizontal movement axis synthesized from MoveLeft/MoveRight (-1, 0 or 1)
    pub fn horizontal_axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.is_pressed(Action::MoveLeft) {
            axis -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            axis += 1.0;
        }
        axis
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if !self.pressed.contains(&action) {
            self.just_pressed.insert(action);
            self.pressed.insert(action);
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        if self.pressed.contains(&action) {
            self.just_released.insert(action);
            self.pressed.remove(&action);
        }
    }

    /// Update input state for a new frame
    /// Call this once per frame after processing all events
    pub(crate) fn update(&mut self) {
        // Clear frame-specific state
        self.just_pressed.clear();
        self.just_released.clear();

        // Save current pressed state for next frame
        self.previous_pressed = self.pressed.clone();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.previous_pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_input_creation() {
        let input = PlayerInput::new();
        assert!(!input.is_pressed(Action::Jump));
        assert!(!input.just_pressed(Action::Jump));
    }

    #[test]
    fn test_press_and_release() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump);
        assert!(input.is_pressed(Action::Jump));
        assert!(input.just_pressed(Action::Jump));

        input.release(Action::Jump);
        assert!(!input.is_pressed(Action::Jump));
        assert!(input.just_released(Action::Jump));
    }

    #[test]
    fn test_update_clears_edges() {
        let mut input = PlayerInput::new();
        input.press(Action::Crouch);
        input.update();

        assert!(!input.just_pressed(Action::Crouch));
        assert!(input.is_pressed(Action::Crouch));
        assert!(input.is_held(Action::Crouch));
    }

    #[test]
    fn test_repeat_press_is_not_an_edge() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump);
        input.update();

        // Key repeat while already down must not produce a new press edge
        input.press(Action::Jump);
        assert!(!input.just_pressed(Action::Jump));
    }

    #[test]
    fn test_horizontal_axis() {
        let mut input = PlayerInput::new();
        assert_eq!(input.horizontal_axis(), 0.0);

        input.press(Action::MoveLeft);
        assert_eq!(input.horizontal_axis(), -1.0);

        input.press(Action::MoveRight);
        assert_eq!(input.horizontal_axis(), 0.0); // both held cancel out

        input.release(Action::MoveLeft);
        assert_eq!(input.horizontal_axis(), 1.0);
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new();
        input.press(Action::Flashlight);
        input.reset();
        assert!(!input.is_pressed(Action::Flashlight));
        assert!(!input.just_pressed(Action::Flashlight));
    }
}
