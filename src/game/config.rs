// Gameplay tuning values

use crate::game::SetupError;

/// Player movement, input and respawn tuning
///
/// One config drives the whole gameplay layer; per-level overrides are not
/// a thing in this game.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    // Movement
    /// Maximum horizontal movement speed (units/second)
    pub move_speed: f32,
    /// Multiplier applied to move speed while crouching (0..=1)
    pub crouch_speed_multiplier: f32,
    /// Upward velocity applied on jump
    pub jump_force: f32,

    // Input interpretation
    /// How long a jump press stays usable before landing (seconds)
    pub jump_input_cache: f32,
    /// Crouch flips on press edge instead of mirroring the button level
    pub crouch_toggle: bool,
    /// Flashlight flips on press edge instead of mirroring the button level
    pub flashlight_toggle: bool,

    // Dimensions (for the physics colliders)
    /// Character width in world units
    pub width: f32,
    /// Character height in world units
    pub height: f32,

    // Ground check box, anchored to the body position
    /// Vertical offset of the ground check box center
    pub ground_check_offset_y: f32,
    /// Half extents of the ground check box
    pub ground_check_half_extents: (f32, f32),

    // Interaction cast box, pushed out along the facing direction
    /// Forward offset of the interaction box center
    pub interact_reach: f32,
    /// Half extents of the interaction box
    pub interact_half_extents: (f32, f32),

    // Death & respawn
    /// Delay between the cover clearing and control returning (seconds)
    pub respawn_control_delay: f32,
    /// Max health at spawn
    pub max_health: u32,
}

/// Baseline tuning, hand-balanced against the test level
pub const BASE_CONFIG: PlayerConfig = PlayerConfig {
    move_speed: 6.0,
    crouch_speed_multiplier: 0.4,
    jump_force: 9.0,

    jump_input_cache: 0.15,
    crouch_toggle: true,
    flashlight_toggle: true,

    width: 0.8,
    height: 1.8,

    ground_check_offset_y: -0.95,
    ground_check_half_extents: (0.35, 0.08),

    interact_reach: 0.7,
    interact_half_extents: (0.4, 0.6),

    respawn_control_delay: 1.0,
    max_health: 3,
};

impl Default for PlayerConfig {
    fn default() -> Self {
        BASE_CONFIG
    }
}

impl PlayerConfig {
    /// Check the configuration for values that would break the simulation.
    /// A bad config is a setup error, fatal at initialization.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.move_speed <= 0.0 || self.jump_force <= 0.0 {
            return Err(SetupError::InvalidConfig(
                "move_speed and jump_force must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.crouch_speed_multiplier) {
            return Err(SetupError::InvalidConfig(
                "crouch_speed_multiplier must be within 0..=1",
            ));
        }
        if self.jump_input_cache < 0.0 || self.respawn_control_delay < 0.0 {
            return Err(SetupError::InvalidConfig("durations must not be negative"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(SetupError::InvalidConfig("collider dimensions must be positive"));
        }
        if self.max_health == 0 {
            return Err(SetupError::InvalidConfig("max_health must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PlayerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_matches_baseline() {
        let config = PlayerConfig::default();
        assert_eq!(config.move_speed, BASE_CONFIG.move_speed);
        assert_eq!(config.max_health, BASE_CONFIG.max_health);
    }

    #[test]
    fn test_invalid_crouch_multiplier_rejected() {
        let config = PlayerConfig {
            crouch_speed_multiplier: 1.5,
            ..PlayerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_health_rejected() {
        let config = PlayerConfig {
            max_health: 0,
            ..PlayerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_cache_duration_rejected() {
        let config = PlayerConfig {
            jump_input_cache: -0.1,
            ..PlayerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
