// Game action definitions and mappings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,
    Crouch,

    // Equipment & world
    Flashlight,
    Interact,

    // Meta actions
    Pause,
    Menu,
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
    // Future: Add controller support
    // GamepadButton(gilrs::Button),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard/mouse bindings for the player
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // Movement (WASD-style layout)
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::Space), Action::Jump),
        (InputSource::key(KeyCode::KeyS), Action::Crouch),
        // Equipment & world
        (InputSource::key(KeyCode::KeyF), Action::Flashlight),
        (InputSource::key(KeyCode::KeyE), Action::Interact),
        (InputSource::mouse(MouseButton::Right), Action::Flashlight),
    ]
}

/// Global bindings (menu/system level)
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::Escape), Action::Menu),
        (InputSource::key(KeyCode::KeyP), Action::Pause),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_equality() {
        assert_eq!(Action::Jump, Action::Jump);
        assert_ne!(Action::Jump, Action::Crouch);
    }

    #[test]
    fn test_input_source_keyboard_creation() {
        let source = InputSource::key(KeyCode::KeyA);
        assert_eq!(source, InputSource::Keyboard(KeyCode::KeyA));
    }

    #[test]
    fn test_input_source_mouse_creation() {
        let source = InputSource::mouse(MouseButton::Right);
        assert_eq!(source, InputSource::Mouse(MouseButton::Right));
    }

    #[test]
    fn test_default_bindings_cover_core_actions() {
        let bindings = default_bindings();
        for action in [
            Action::MoveLeft,
            Action::MoveRight,
            Action::Jump,
            Action::Crouch,
            Action::Flashlight,
            Action::Interact,
        ] {
            assert!(
                bindings.iter().any(|(_, a)| *a == action),
                "Missing default binding for {:?}",
                action
            );
        }
    }

    #[test]
    fn test_global_bindings_exist() {
        let bindings = global_bindings();
        assert!(!bindings.is_empty());
    }

    #[test]
    fn test_no_duplicate_sources_in_defaults() {
        let bindings = default_bindings();
        let mut seen_sources = std::collections::HashSet::new();
        for (source, _) in bindings {
            assert!(
                seen_sources.insert(source),
                "Duplicate input source found in default bindings"
            );
        }
    }
}
