// Player locomotion: movement, crouching, jump buffering, flashlight,
// interaction

use glam::Vec2;
use rapier2d::prelude::{vector, InteractionGroups, QueryFilter};

use crate::core::math;
use crate::engine::input::AimInput;
use crate::engine::physics::{
    body::presets, ColliderHandle, CollisionGroups, PhysicsWorld, RigidBodyHandle,
};
use crate::game::config::PlayerConfig;
use crate::game::SetupError;

/// Reads abstracted input events and turns them into movement physics
///
/// Each input handler is an independent, idempotent consumer: the session
/// calls them every tick with the current button/axis state. None of them
/// raise errors at runtime; a broken setup fails in `new`.
pub struct LocomotionController {
    config: PlayerConfig,

    body: RigidBodyHandle,
    standing_collider: ColliderHandle,
    crouch_collider: ColliderHandle,

    /// While false, every input handler is a no-op (death sequence)
    enabled: bool,

    move_input: f32,
    is_grounded: bool,
    is_crouching: bool,
    is_jumping: bool,
    facing_right: bool,

    /// Seconds of validity left on the most recent jump press
    jump_cache_remaining: f32,

    is_flashlight_on: bool,
    /// Flashlight pivot angle in radians, never below horizontal
    flashlight_angle: f32,
}

impl LocomotionController {
    /// Create the controller and its physics presence.
    ///
    /// Fails fast on a malformed config; there is no runtime recovery from
    /// a broken setup.
    pub fn new(
        config: PlayerConfig,
        spawn: Vec2,
        physics: &mut PhysicsWorld,
    ) -> Result<Self, SetupError> {
        config.validate()?;

        let body = physics.add_rigid_body(presets::player_body(spawn.x, spawn.y));
        let standing_collider =
            physics.add_collider(presets::standing_collider(config.width, config.height), body);
        let crouch_collider =
            physics.add_collider(presets::crouch_collider(config.width, config.height), body);

        // Exactly one of the two colliders participates at a time
        physics.set_collider_enabled(crouch_collider, false);

        Ok(Self {
            config,
            body,
            standing_collider,
            crouch_collider,
            enabled: true,
            move_input: 0.0,
            is_grounded: false,
            is_crouching: false,
            is_jumping: false,
            facing_right: true,
            jump_cache_remaining: 0.0,
            is_flashlight_on: false,
            flashlight_angle: 0.0,
        })
    }

    // --- Queries -----------------------------------------------------------

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    pub fn is_crouching(&self) -> bool {
        self.is_crouching
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    pub fn is_flashlight_on(&self) -> bool {
        self.is_flashlight_on
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn move_input(&self) -> f32 {
        self.move_input
    }

    pub fn flashlight_angle(&self) -> f32 {
        self.flashlight_angle
    }

    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body
    }

    /// Current world position of the player body
    pub fn position(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        physics.get_rigid_body(self.body).map(|body| {
            let t = body.translation();
            Vec2::new(t.x, t.y)
        })
    }

    /// Current velocity of the player body
    pub fn velocity(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        physics.get_rigid_body(self.body).map(|body| {
            let v = body.linvel();
            Vec2::new(v.x, v.y)
        })
    }

    /// Enable or disable the controller; disabled means every handler is
    /// a no-op (locomotion is "off" during the death sequence)
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    // --- Per-tick updates --------------------------------------------------

    /// Recompute the grounded flag with a downward box overlap, once per
    /// physics tick
    pub fn refresh_grounded(&mut self, physics: &PhysicsWorld) {
        if !self.enabled {
            return;
        }

        let Some(pos) = self.position(physics) else {
            self.is_grounded = false;
            return;
        };

        let (hx, hy) = self.config.ground_check_half_extents;
        let center = vector![pos.x, pos.y + self.config.ground_check_offset_y];

        let filter = QueryFilter::default()
            .exclude_rigid_body(self.body)
            .groups(InteractionGroups::new(
                CollisionGroups::Player.group(),
                CollisionGroups::Ground.group(),
            ));

        self.is_grounded = physics.box_overlap(center, vector![hx, hy], filter).is_some();
    }

    /// Move: horizontal velocity is assigned directly from the axis value,
    /// scaled down while crouching. No acceleration curve.
    pub fn tick_move(&mut self, axis: f32, physics: &mut PhysicsWorld) {
        if !self.enabled {
            return;
        }

        self.move_input = math::clamp(axis, -1.0, 1.0);

        if self.move_input > 0.0 {
            self.facing_right = true;
        } else if self.move_input < 0.0 {
            self.facing_right = false;
        }

        let crouch_multiplier = if self.is_crouching {
            self.config.crouch_speed_multiplier
        } else {
            1.0
        };

        if let Some(body) = physics.get_rigid_body_mut(self.body) {
            let vy = body.linvel().y;
            let vx = self.move_input * self.config.move_speed * crouch_multiplier;
            body.set_linvel(vector![vx, vy], true);
        }
    }

    /// Crouch: press-edge toggle or button-level hold depending on config.
    /// A state change swaps which collider shape is live.
    pub fn tick_crouch(&mut self, pressed_now: bool, held: bool, physics: &mut PhysicsWorld) {
        if !self.enabled {
            return;
        }

        let previous = self.is_crouching;
        if self.config.crouch_toggle {
            if pressed_now {
                self.is_crouching = !self.is_crouching;
            }
        } else {
            self.is_crouching = held;
        }

        if self.is_crouching != previous {
            physics.set_collider_enabled(self.standing_collider, !self.is_crouching);
            physics.set_collider_enabled(self.crouch_collider, self.is_crouching);
        }
    }

    /// Jump with input buffering and variable height.
    ///
    /// A press arms the cache timer; landing while the timer is live
    /// consumes it for exactly one jump. Releasing the button mid-ascent
    /// kills the remaining upward velocity.
    pub fn tick_jump(&mut self, pressed_now: bool, held: bool, dt: f32, physics: &mut PhysicsWorld) {
        if !self.enabled {
            return;
        }

        if pressed_now {
            self.jump_cache_remaining = self.config.jump_input_cache;
        } else if self.jump_cache_remaining > 0.0 {
            self.jump_cache_remaining = (self.jump_cache_remaining - dt).max(0.0);
        }

        let Some(body) = physics.get_rigid_body_mut(self.body) else {
            return;
        };
        let mut velocity = *body.linvel();

        if self.is_grounded && self.jump_cache_remaining > 0.0 {
            velocity.y = self.config.jump_force;
            self.is_jumping = true;
            // Consume the buffered press so one press never jumps twice
            self.jump_cache_remaining = 0.0;
        }

        if self.is_jumping && !held {
            velocity.y = velocity.y.min(0.0);
        }

        body.set_linvel(velocity, true);

        if self.is_jumping && velocity.y <= 0.0 {
            self.is_jumping = false;
        }
    }

    /// Flashlight on/off: press-edge toggle or button-level hold
    pub fn tick_flashlight(&mut self, pressed_now: bool, held: bool) {
        if !self.enabled {
            return;
        }

        if self.config.flashlight_toggle {
            if pressed_now {
                self.is_flashlight_on = !self.is_flashlight_on;
            }
        } else {
            self.is_flashlight_on = held;
        }
    }

    /// Aim the flashlight pivot.
    ///
    /// Pointer input aims at the pointer's world position, clamped so the
    /// beam never points below horizontal.
    pub fn aim_flashlight<F>(&mut self, aim: AimInput, screen_to_world: F, physics: &PhysicsWorld)
    where
        F: FnOnce(Vec2) -> Vec2,
    {
        if !self.enabled {
            return;
        }

        match aim {
            AimInput::Pointer(screen_pos) => {
                let Some(pos) = self.position(physics) else {
                    return;
                };
                let target = screen_to_world(screen_pos);
                self.flashlight_angle = math::aim_angle(pos, target);
            }
            AimInput::Stick(_value) => {
                // Stick aim is not wired up; pointer input is the only
                // supported aim source
            }
        }
    }

    /// Find the first interactable in front of the player.
    ///
    /// Zero-distance box overlap along the facing direction; `is_interactable`
    /// decides which hits expose the interaction capability. At most one
    /// target per press.
    pub fn find_interact_target<F>(
        &self,
        physics: &PhysicsWorld,
        is_interactable: F,
    ) -> Option<ColliderHandle>
    where
        F: Fn(ColliderHandle) -> bool,
    {
        if !self.enabled {
            return None;
        }

        let pos = self.position(physics)?;
        let forward = if self.facing_right { 1.0 } else { -1.0 };
        let (hx, hy) = self.config.interact_half_extents;
        let center = vector![pos.x + forward * self.config.interact_reach, pos.y];

        let filter = QueryFilter::default()
            .exclude_rigid_body(self.body)
            .groups(InteractionGroups::new(
                CollisionGroups::Player.group(),
                CollisionGroups::Interactable.group(),
            ));

        physics
            .box_overlaps(center, vector![hx, hy], filter)
            .into_iter()
            .find(|handle| is_interactable(*handle))
    }

    /// Move the body to a new position and kill all momentum (respawn
    /// teleport). The jumping flag clears itself on the next jump tick
    /// once it sees zero vertical velocity.
    pub fn teleport(&mut self, position: Vec2, physics: &mut PhysicsWorld) {
        if let Some(body) = physics.get_rigid_body_mut(self.body) {
            body.set_translation(vector![position.x, position.y], true);
            body.set_linvel(vector![0.0, 0.0], true);
        }
    }
}
