// Game session: the context object that owns and wires the gameplay layer

use glam::Vec2;
use log::info;

use crate::engine::input::{Action, AimInput, PlayerInput};
use crate::engine::physics::{CollisionEvent, PhysicsWorld};
use crate::game::animation::{AnimState, AnimationContext, AnimationPlayer, PlayerAnimation};
use crate::game::camera::PlayerCamera;
use crate::game::config::PlayerConfig;
use crate::game::health::{CharacterHealth, HealthEvent};
use crate::game::hud::PlayerHud;
use crate::game::level::Level;
use crate::game::locomotion::LocomotionController;
use crate::game::respawn::{RespawnDeps, RespawnSequencer};
use crate::game::SetupError;

/// Owns the player, their collaborators and the level, and runs one fixed
/// update per scheduler tick
///
/// Explicitly constructed and passed around; there is no process-wide
/// instance. Everything here is mutated from the update thread only, and
/// mutual exclusion during the death sequence comes from disabling
/// components rather than locks.
pub struct GameSession {
    physics: PhysicsWorld,
    level: Level,

    health: CharacterHealth,
    locomotion: LocomotionController,
    animation: PlayerAnimation,
    playback: AnimationPlayer,

    camera: PlayerCamera,
    hud: PlayerHud,

    respawn: RespawnSequencer,
    /// Index of the checkpoint the player respawns at, set by level
    /// progression before the core consults it
    checkpoint_index: usize,
}

impl GameSession {
    /// Wire up a session. Fails on a setup that could not run: a level
    /// without checkpoints or a spawn index pointing past the list.
    pub fn new(
        config: PlayerConfig,
        level: Level,
        checkpoint_index: usize,
        mut physics: PhysicsWorld,
        camera: PlayerCamera,
        hud: PlayerHud,
    ) -> Result<Self, SetupError> {
        if level.checkpoint_count() == 0 {
            return Err(SetupError::NoCheckpoints);
        }
        let spawn = level
            .checkpoint(checkpoint_index)
            .ok_or(SetupError::CheckpointOutOfRange {
                index: checkpoint_index,
                count: level.checkpoint_count(),
            })?
            .position;

        let health = CharacterHealth::new(config.max_health);
        let respawn = RespawnSequencer::new(config.respawn_control_delay);
        let locomotion = LocomotionController::new(config, spawn, &mut physics)?;

        // Queries must work on the very first tick, before the first step
        physics.update_queries();

        info!("Game session ready, spawning at checkpoint {checkpoint_index}");

        Ok(Self {
            physics,
            level,
            health,
            locomotion,
            animation: PlayerAnimation::new(),
            playback: AnimationPlayer::with_standard_clips(),
            camera,
            hud,
            respawn,
            checkpoint_index,
        })
    }

    /// Run one fixed scheduler tick
    pub fn fixed_update(&mut self, dt: f32, input: &PlayerInput, aim: Option<AimInput>) {
        self.physics.step();
        self.locomotion.refresh_grounded(&self.physics);

        self.handle_input(dt, input, aim);
        self.handle_damage_triggers();

        let death_pending = self.drain_health_events();
        self.drive_respawn(dt, death_pending);

        if let Some(pos) = self.locomotion.position(&self.physics) {
            self.camera.update(pos, dt);
        }
        self.hud.update(dt);

        self.update_animation(dt);
    }

    fn handle_input(&mut self, dt: f32, input: &PlayerInput, aim: Option<AimInput>) {
        self.locomotion
            .tick_move(input.horizontal_axis(), &mut self.physics);
        self.locomotion.tick_crouch(
            input.just_pressed(Action::Crouch),
            input.is_pressed(Action::Crouch),
            &mut self.physics,
        );
        self.locomotion.tick_jump(
            input.just_pressed(Action::Jump),
            input.is_pressed(Action::Jump),
            dt,
            &mut self.physics,
        );
        self.locomotion.tick_flashlight(
            input.just_pressed(Action::Flashlight),
            input.is_pressed(Action::Flashlight),
        );

        if let Some(aim) = aim {
            let camera = &self.camera;
            self.locomotion
                .aim_flashlight(aim, |screen| camera.screen_to_world(screen), &self.physics);
        }

        if input.just_pressed(Action::Interact) {
            let target = self
                .locomotion
                .find_interact_target(&self.physics, |handle| self.level.is_interactable(handle));
            if let Some(target) = target {
                self.level.interact(target, self.locomotion.body_handle());
            }
        }
    }

    /// Hurt the player for every hazard sensor they started overlapping
    /// this tick
    fn handle_damage_triggers(&mut self) {
        for event in self.physics.collision_events() {
            let CollisionEvent::Started {
                collider1,
                collider2,
            } = event
            else {
                continue;
            };

            let damage = match (
                self.level.damage_at(collider1),
                self.level.damage_at(collider2),
            ) {
                (Some(damage), _) => damage,
                (_, Some(damage)) => damage,
                _ => continue,
            };

            let other = if self.level.damage_at(collider1).is_some() {
                collider2
            } else {
                collider1
            };

            if self.collider_belongs_to_player(other) && !self.health.is_dead() {
                self.health.hurt(damage);
            }
        }
    }

    fn collider_belongs_to_player(&self, collider: crate::engine::physics::ColliderHandle) -> bool {
        self.physics
            .get_collider(collider)
            .and_then(|c| c.parent())
            .map(|body| body == self.locomotion.body_handle())
            .unwrap_or(false)
    }

    /// Route queued health notifications; returns whether a death landed
    /// this tick
    fn drain_health_events(&mut self) -> bool {
        let mut death_pending = false;
        for event in self.health.drain_events() {
            match event {
                HealthEvent::Hurt(_) => self.animation.on_hurt(&mut self.playback),
                HealthEvent::Heal(_) => {
                    // Health bars live outside the core; nothing to do here
                }
                HealthEvent::Death => {
                    self.animation.on_death(&mut self.playback);
                    // The controller switches off on death and stays off
                    // until the sequencer turns it back on
                    self.locomotion.set_enabled(false);
                    death_pending = true;
                }
            }
        }
        death_pending
    }

    fn drive_respawn(&mut self, dt: f32, death_pending: bool) {
        let mut deps = RespawnDeps {
            physics: &mut self.physics,
            health: &mut self.health,
            locomotion: &mut self.locomotion,
            animation: &mut self.animation,
            playback: &mut self.playback,
            camera: &mut self.camera,
            hud: &mut self.hud,
            level: &self.level,
            checkpoint_index: self.checkpoint_index,
        };

        // Deaths reported while a sequence is in flight are ignored
        if death_pending && !self.respawn.is_active() {
            self.respawn.start(&mut deps);
        }

        self.respawn.advance(dt, &mut deps);
    }

    fn update_animation(&mut self, dt: f32) {
        self.playback.update(dt);
        if self.playback.is_finished() {
            self.animation.notify_clip_finished();
        }

        let velocity = self.locomotion.velocity(&self.physics).unwrap_or(Vec2::ZERO);
        let ctx = AnimationContext {
            velocity_y: velocity.y,
            is_grounded: self.locomotion.is_grounded(),
            is_crouching: self.locomotion.is_crouching(),
            move_input: self.locomotion.move_input(),
            facing_right: self.locomotion.facing_right(),
        };
        self.animation.update(&ctx, &mut self.playback);
    }

    // --- Accessors ---------------------------------------------------------

    /// Update the tracked respawn checkpoint (level progression glue)
    pub fn set_checkpoint_index(&mut self, index: usize) -> Result<(), SetupError> {
        if self.level.checkpoint(index).is_none() {
            return Err(SetupError::CheckpointOutOfRange {
                index,
                count: self.level.checkpoint_count(),
            });
        }
        self.checkpoint_index = index;
        Ok(())
    }

    pub fn checkpoint_index(&self) -> usize {
        self.checkpoint_index
    }

    pub fn health(&self) -> &CharacterHealth {
        &self.health
    }

    /// Mutable health access for external damage/heal sources
    pub fn health_mut(&mut self) -> &mut CharacterHealth {
        &mut self.health
    }

    pub fn locomotion(&self) -> &LocomotionController {
        &self.locomotion
    }

    pub fn animation_state(&self) -> AnimState {
        self.animation.state()
    }

    pub fn camera(&self) -> &PlayerCamera {
        &self.camera
    }

    pub fn hud(&self) -> &PlayerHud {
        &self.hud
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn player_position(&self) -> Option<Vec2> {
        self.locomotion.position(&self.physics)
    }

    pub fn is_respawning(&self) -> bool {
        self.respawn.is_active()
    }
}
