// Death and respawn orchestration

use log::{error, info};

use crate::engine::physics::PhysicsWorld;
use crate::game::animation::{AnimationPlayer, PlayerAnimation};
use crate::game::camera::PlayerCamera;
use crate::game::health::CharacterHealth;
use crate::game::hud::PlayerHud;
use crate::game::level::Level;
use crate::game::locomotion::LocomotionController;

/// The external signal the sequence is suspended on
#[derive(Debug, Clone, Copy, PartialEq)]
enum WaitingOn {
    /// HUD cover fully opaque
    CoverOn,
    /// One scheduler tick (camera settles before the teleport)
    NextTick,
    /// HUD cover fully cleared
    CoverOff,
    /// Fixed real-time delay before control returns
    Timer { remaining: f32 },
}

/// Everything the respawn sequence touches, borrowed for one advance
pub struct RespawnDeps<'a> {
    pub physics: &'a mut PhysicsWorld,
    pub health: &'a mut CharacterHealth,
    pub locomotion: &'a mut LocomotionController,
    pub animation: &'a mut PlayerAnimation,
    pub playback: &'a mut AnimationPlayer,
    pub camera: &'a mut PlayerCamera,
    pub hud: &'a mut PlayerHud,
    pub level: &'a Level,
    pub checkpoint_index: usize,
}

/// Scripted death-and-respawn sequence
///
/// A cooperative step machine advanced once per tick by the session. Each
/// step records which external signal it is waiting on; there is no
/// cancellation, a started sequence always runs to completion. At most one
/// sequence is in flight: death notifications during a run are ignored by
/// the caller via `is_active`.
pub struct RespawnSequencer {
    /// Delay between the cover clearing and control returning (seconds)
    control_delay: f32,

    waiting: Option<WaitingOn>,
}

impl RespawnSequencer {
    pub fn new(control_delay: f32) -> Self {
        Self {
            control_delay,
            waiting: None,
        }
    }

    /// Whether a sequence is currently in flight
    pub fn is_active(&self) -> bool {
        self.waiting.is_some()
    }

    /// Begin the sequence. Returns false (and does nothing) when one is
    /// already running.
    pub fn start(&mut self, deps: &mut RespawnDeps<'_>) -> bool {
        if self.is_active() {
            return false;
        }

        info!("Respawn sequence started");

        // No more damage while the sequence runs
        deps.health.set_enabled(false);

        deps.camera.focus_player();
        deps.hud.play_death_animation();

        self.waiting = Some(WaitingOn::CoverOn);
        true
    }

    /// Advance the sequence by one scheduler tick
    pub fn advance(&mut self, dt: f32, deps: &mut RespawnDeps<'_>) {
        let Some(waiting) = self.waiting else {
            return;
        };

        match waiting {
            WaitingOn::CoverOn => {
                if deps.hud.is_cover_on() {
                    // Remove damping so the camera stays put through the
                    // teleport
                    deps.camera.set_damping(0.0);
                    self.waiting = Some(WaitingOn::NextTick);
                }
            }
            WaitingOn::NextTick => {
                self.teleport_to_checkpoint(deps);
                deps.animation.reset(deps.playback);
                self.waiting = Some(WaitingOn::CoverOff);
            }
            WaitingOn::CoverOff => {
                if !deps.hud.is_cover_on() {
                    self.waiting = Some(WaitingOn::Timer {
                        remaining: self.control_delay,
                    });
                }
            }
            WaitingOn::Timer { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.waiting = Some(WaitingOn::Timer { remaining });
                    return;
                }

                deps.health.reset_full();
                deps.health.set_enabled(true);
                deps.locomotion.set_enabled(true);
                deps.camera.reset_focus();
                self.waiting = None;

                info!("Respawn sequence complete, control returned");
            }
        }
    }

    fn teleport_to_checkpoint(&self, deps: &mut RespawnDeps<'_>) {
        match deps.level.checkpoint(deps.checkpoint_index) {
            Some(checkpoint) => {
                deps.locomotion.teleport(checkpoint.position, deps.physics);
            }
            None => {
                // Validated at session setup; only reachable if the level
                // was mutated mid-session
                error!(
                    "Checkpoint {} not found, player stays where they died",
                    deps.checkpoint_index
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::PlayerConfig;
    use crate::game::hud::CoverTiming;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    struct Rig {
        physics: PhysicsWorld,
        health: CharacterHealth,
        locomotion: LocomotionController,
        animation: PlayerAnimation,
        playback: AnimationPlayer,
        camera: PlayerCamera,
        hud: PlayerHud,
        level: Level,
        sequencer: RespawnSequencer,
    }

    fn rig() -> Rig {
        let mut physics = PhysicsWorld::new();
        let mut level = Level::new();
        level.add_checkpoint(Vec2::new(0.0, 1.0));
        level.add_checkpoint(Vec2::new(8.0, 1.0));
        level.add_checkpoint(Vec2::new(16.0, 1.0));

        let locomotion =
            LocomotionController::new(PlayerConfig::default(), Vec2::new(30.0, 1.0), &mut physics)
                .unwrap();

        Rig {
            physics,
            health: CharacterHealth::new(3),
            locomotion,
            animation: PlayerAnimation::new(),
            playback: AnimationPlayer::with_standard_clips(),
            camera: PlayerCamera::new(Vec2::ZERO, 1280.0, 720.0, 0.25),
            hud: PlayerHud::new(CoverTiming::default()),
            level,
            sequencer: RespawnSequencer::new(1.0),
        }
    }

    fn advance(rig: &mut Rig, checkpoint_index: usize) {
        rig.hud.update(DT);
        let mut deps = RespawnDeps {
            physics: &mut rig.physics,
            health: &mut rig.health,
            locomotion: &mut rig.locomotion,
            animation: &mut rig.animation,
            playback: &mut rig.playback,
            camera: &mut rig.camera,
            hud: &mut rig.hud,
            level: &rig.level,
            checkpoint_index,
        };
        rig.sequencer.advance(DT, &mut deps);
    }

    fn start(rig: &mut Rig, checkpoint_index: usize) -> bool {
        let mut deps = RespawnDeps {
            physics: &mut rig.physics,
            health: &mut rig.health,
            locomotion: &mut rig.locomotion,
            animation: &mut rig.animation,
            playback: &mut rig.playback,
            camera: &mut rig.camera,
            hud: &mut rig.hud,
            level: &rig.level,
            checkpoint_index,
        };
        rig.sequencer.start(&mut deps)
    }

    #[test]
    fn test_start_disables_health_and_commands_collaborators() {
        let mut rig = rig();
        rig.health.hurt(3);
        rig.health.drain_events();
        rig.locomotion.set_enabled(false);

        assert!(start(&mut rig, 0));
        assert!(!rig.health.is_enabled());
        assert!(rig.camera.is_focused());
        assert!(rig.hud.is_transitioning());
        assert!(rig.sequencer.is_active());
    }

    #[test]
    fn test_second_start_is_ignored_while_active() {
        let mut rig = rig();
        assert!(start(&mut rig, 0));
        assert!(!start(&mut rig, 0));
    }

    #[test]
    fn test_blocks_until_cover_on_then_waits_one_tick() {
        let mut rig = rig();
        rig.locomotion.set_enabled(false);
        start(&mut rig, 2);

        let death_pos = rig.locomotion.position(&rig.physics).unwrap();

        // Fade-in is 0.6s; for the first handful of ticks nothing moves
        for _ in 0..5 {
            advance(&mut rig, 2);
        }
        assert_eq!(rig.locomotion.position(&rig.physics).unwrap(), death_pos);

        // Run until the cover is on, then two more ticks: the settle tick
        // and the teleport tick
        while !rig.hud.is_cover_on() {
            advance(&mut rig, 2);
        }
        // Damping was removed the moment the cover came on
        assert_eq!(rig.camera.damping(), 0.0);
        assert_eq!(rig.locomotion.position(&rig.physics).unwrap(), death_pos);

        advance(&mut rig, 2); // the one-tick settle
        let expected = rig.level.checkpoint(2).unwrap().position;
        assert_eq!(rig.locomotion.position(&rig.physics).unwrap(), expected);
    }

    #[test]
    fn test_full_sequence_restores_control_once() {
        let mut rig = rig();
        rig.health.hurt(3);
        rig.health.drain_events();
        rig.locomotion.set_enabled(false);

        start(&mut rig, 1);

        // Run the whole thing to completion
        let mut enable_transitions = 0;
        let mut was_enabled = rig.locomotion.is_enabled();
        for _ in 0..1000 {
            advance(&mut rig, 1);
            let enabled = rig.locomotion.is_enabled();
            if enabled && !was_enabled {
                enable_transitions += 1;
            }
            was_enabled = enabled;
            if !rig.sequencer.is_active() {
                break;
            }
        }

        assert!(!rig.sequencer.is_active());
        assert_eq!(enable_transitions, 1);
        assert!(rig.health.is_enabled());
        assert!(!rig.health.is_dead());
        assert!(!rig.camera.is_focused());
        assert_eq!(
            rig.locomotion.position(&rig.physics).unwrap(),
            rig.level.checkpoint(1).unwrap().position
        );
        assert_eq!(rig.animation.state(), crate::game::animation::AnimState::Idle);
    }

    #[test]
    fn test_control_delay_holds_after_cover_clears() {
        let mut rig = rig();
        rig.locomotion.set_enabled(false);
        start(&mut rig, 0);

        // Run until the cover has fully cleared
        let mut saw_cover = false;
        for _ in 0..1000 {
            advance(&mut rig, 0);
            saw_cover = saw_cover || rig.hud.is_cover_on();
            if saw_cover && !rig.hud.is_transitioning() {
                break;
            }
        }
        assert!(saw_cover);

        // Control must not return for most of the 1s delay
        for _ in 0..30 {
            advance(&mut rig, 0);
        }
        assert!(!rig.locomotion.is_enabled());
        assert!(rig.sequencer.is_active());

        // After the full delay it does
        for _ in 0..40 {
            advance(&mut rig, 0);
        }
        assert!(rig.locomotion.is_enabled());
        assert!(!rig.sequencer.is_active());
    }

    #[test]
    fn test_missing_checkpoint_leaves_player_in_place() {
        let mut rig = rig();
        rig.locomotion.set_enabled(false);
        let death_pos = rig.locomotion.position(&rig.physics).unwrap();

        start(&mut rig, 99);
        for _ in 0..1000 {
            advance(&mut rig, 99);
            if !rig.sequencer.is_active() {
                break;
            }
        }

        // Sequence still completed; only the teleport was skipped
        assert!(!rig.sequencer.is_active());
        assert!(rig.locomotion.is_enabled());
        assert_eq!(rig.locomotion.position(&rig.physics).unwrap(), death_pos);
    }
}
