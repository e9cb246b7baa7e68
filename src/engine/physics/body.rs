use super::collision::CollisionGroups;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    gravity_scale: Real,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            gravity_scale: 1.0,
            can_sleep: true,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            gravity_scale: 0.0,
            can_sleep: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set the gravity scale (1.0 = normal gravity, 0.0 = no gravity)
    #[allow(dead_code)]
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (used for the player, who never tips over)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Pre-configured bodies and colliders for common game objects
pub mod presets {
    use super::*;

    /// The player's rigid body: dynamic, rotation locked, never sleeps
    /// (a sleeping player body would miss buffered jump impulses)
    pub fn player_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .lock_rotation()
            .can_sleep(false)
            .build()
    }

    /// The player's standing collider
    pub fn standing_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder::cuboid(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Player.to_interaction_groups())
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .friction(0.0)
            .build()
    }

    /// The player's crouching collider: half height, anchored to the feet
    /// so the head clears low ceilings
    pub fn crouch_collider(width: Real, height: Real) -> Collider {
        let half_height = height / 4.0;
        ColliderBuilder::cuboid(width / 2.0, half_height)
            .translation(vector![0.0, -half_height])
            .collision_groups(CollisionGroups::Player.to_interaction_groups())
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .friction(0.0)
            .build()
    }

    /// A static platform body
    pub fn platform_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    /// A static platform collider
    pub fn platform_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder::cuboid(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Ground.to_interaction_groups())
            .build()
    }

    /// A damage volume: sensor that reports overlap events with the player
    pub fn hazard_sensor(width: Real, height: Real) -> Collider {
        ColliderBuilder::cuboid(width / 2.0, height / 2.0)
            .sensor(true)
            .collision_groups(CollisionGroups::Hazard.to_interaction_groups())
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build()
    }

    /// An interactable prop: sensor the interaction cast can find
    pub fn interactable_sensor(width: Real, height: Real) -> Collider {
        ColliderBuilder::cuboid(width / 2.0, height / 2.0)
            .sensor(true)
            .collision_groups(CollisionGroups::Interactable.to_interaction_groups())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_body_is_dynamic_and_locked() {
        let body = presets::player_body(3.0, 4.0);
        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert!((body.translation().x - 3.0).abs() < 0.001);
        assert!(body.locked_axes().contains(LockedAxes::ROTATION_LOCKED));
    }

    #[test]
    fn test_platform_body_is_fixed() {
        let body = presets::platform_body(0.0, -1.0);
        assert_eq!(body.body_type(), RigidBodyType::Fixed);
    }

    #[test]
    fn test_crouch_collider_is_shorter() {
        let standing = presets::standing_collider(1.0, 2.0);
        let crouching = presets::crouch_collider(1.0, 2.0);

        let standing_half = standing.shape().as_cuboid().unwrap().half_extents;
        let crouching_half = crouching.shape().as_cuboid().unwrap().half_extents;
        assert!(crouching_half.y < standing_half.y);
        assert_eq!(standing_half.x, crouching_half.x);
    }

    #[test]
    fn test_hazard_is_sensor() {
        let hazard = presets::hazard_sensor(2.0, 2.0);
        assert!(hazard.is_sensor());
    }

    #[test]
    fn test_interactable_is_sensor() {
        let prop = presets::interactable_sensor(1.0, 1.0);
        assert!(prop.is_sensor());
    }
}
