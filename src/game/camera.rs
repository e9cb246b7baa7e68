// Player-following camera

use glam::Vec2;

/// 2D camera that follows the player with damped smoothing
///
/// The respawn sequencer drives the focus/damping contract: focus snaps the
/// camera onto the player, zero damping makes a teleport invisible, and
/// `reset_focus` restores the default follow feel.
#[derive(Debug, Clone)]
pub struct PlayerCamera {
    /// Camera position in world space
    position: Vec2,
    /// Camera zoom level (1.0 = normal)
    zoom: f32,
    /// Viewport width in pixels
    viewport_width: f32,
    /// Viewport height in pixels
    viewport_height: f32,

    /// Smoothing time constant in seconds; 0 snaps instantly
    damping: f32,
    /// Damping restored by `reset_focus`
    default_damping: f32,
    /// While focused, the camera stays locked to its target
    focused: bool,
}

impl PlayerCamera {
    /// Create a camera centered on `position`
    pub fn new(position: Vec2, viewport_width: f32, viewport_height: f32, damping: f32) -> Self {
        Self {
            position,
            zoom: 1.0,
            viewport_width,
            viewport_height,
            damping,
            default_damping: damping,
            focused: false,
        }
    }

    /// Current camera position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current smoothing time constant
    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Whether the camera is locked onto its target
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Lock the camera onto its target (death sequence opener)
    pub fn focus_player(&mut self) {
        self.focused = true;
    }

    /// Override the smoothing; zero keeps the camera static relative to
    /// its target so a teleport does not visibly pan
    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping.max(0.0);
    }

    /// Restore default follow behavior
    pub fn reset_focus(&mut self) {
        self.focused = false;
        self.damping = self.default_damping;
    }

    /// Advance the follow towards `target`
    pub fn update(&mut self, target: Vec2, dt: f32) {
        if self.focused || self.damping <= 0.0 {
            self.position = target;
            return;
        }

        let t = (dt / self.damping).min(1.0);
        self.position = self.position.lerp(target, t);
    }

    /// Resize the viewport
    #[allow(dead_code)]
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Convert screen coordinates to world coordinates
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        let normalized_x = (screen_pos.x / self.viewport_width) * 2.0 - 1.0;
        let normalized_y = 1.0 - (screen_pos.y / self.viewport_height) * 2.0;

        let half_width = (self.viewport_width / 2.0) / self.zoom;
        let half_height = (self.viewport_height / 2.0) / self.zoom;

        Vec2::new(
            self.position.x + normalized_x * half_width,
            self.position.y + normalized_y * half_height,
        )
    }

    /// Convert world coordinates to screen coordinates
    #[allow(dead_code)]
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        let half_width = (self.viewport_width / 2.0) / self.zoom;
        let half_height = (self.viewport_height / 2.0) / self.zoom;

        let normalized_x = (world_pos.x - self.position.x) / half_width;
        let normalized_y = (world_pos.y - self.position.y) / half_height;

        Vec2::new(
            (normalized_x + 1.0) * self.viewport_width / 2.0,
            (1.0 - normalized_y) * self.viewport_height / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PlayerCamera {
        PlayerCamera::new(Vec2::ZERO, 1280.0, 720.0, 0.25)
    }

    #[test]
    fn test_follow_moves_towards_target() {
        let mut cam = camera();
        cam.update(Vec2::new(10.0, 0.0), 1.0 / 60.0);
        assert!(cam.position().x > 0.0);
        assert!(cam.position().x < 10.0);
    }

    #[test]
    fn test_focus_snaps_to_target() {
        let mut cam = camera();
        cam.focus_player();
        cam.update(Vec2::new(10.0, -3.0), 1.0 / 60.0);
        assert_eq!(cam.position(), Vec2::new(10.0, -3.0));
    }

    #[test]
    fn test_zero_damping_snaps() {
        let mut cam = camera();
        cam.set_damping(0.0);
        cam.update(Vec2::new(-7.0, 2.0), 1.0 / 60.0);
        assert_eq!(cam.position(), Vec2::new(-7.0, 2.0));
    }

    #[test]
    fn test_reset_focus_restores_damping() {
        let mut cam = camera();
        cam.focus_player();
        cam.set_damping(0.0);

        cam.reset_focus();
        assert!(!cam.is_focused());
        assert_eq!(cam.damping(), 0.25);
    }

    #[test]
    fn test_screen_to_world_center() {
        let cam = camera();
        let world = cam.screen_to_world(Vec2::new(640.0, 360.0));
        assert!((world.x - 0.0).abs() < 0.001);
        assert!((world.y - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_screen_world_round_trip() {
        let mut cam = camera();
        cam.update(Vec2::new(12.0, 4.0), 10.0); // long dt converges on target

        let screen = Vec2::new(100.0, 500.0);
        let back = cam.world_to_screen(cam.screen_to_world(screen));
        assert!((back - screen).length() < 0.01);
    }
}
