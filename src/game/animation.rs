// Player animation: playback provider and the animation state machine

use log::warn;
use std::collections::HashMap;

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the clip (e.g. "idle", "air_up")
    pub name: String,
    /// Number of frames in the clip
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the clip loops
    pub looping: bool,
}

impl AnimationClip {
    /// Create a looping clip
    pub fn looping(name: &str, frame_count: usize, fps: f32) -> Self {
        Self {
            name: name.to_string(),
            frame_count,
            frame_duration: 1.0 / fps,
            looping: true,
        }
    }

    /// Create a one-shot clip (plays once, then reports finished)
    pub fn one_shot(name: &str, frame_count: usize, fps: f32) -> Self {
        Self {
            name: name.to_string(),
            frame_count,
            frame_duration: 1.0 / fps,
            looping: false,
        }
    }
}

/// Plays named clips and reports completion of one-shot clips
///
/// This is the playback side of the animation system: the state machine
/// decides WHAT plays, this decides WHERE in the clip we are.
#[derive(Debug, Default)]
pub struct AnimationPlayer {
    animations: HashMap<String, AnimationClip>,
    current_animation: String,
    current_frame: usize,
    frame_timer: f32,
    playing: bool,
    flip_horizontal: bool,
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a player loaded with the standard character clips
    pub fn with_standard_clips() -> Self {
        let mut player = Self::new();

        player.add_animation(AnimationClip::looping("idle", 8, 10.0));
        player.add_animation(AnimationClip::looping("move", 8, 12.0));
        player.add_animation(AnimationClip::looping("air_up", 4, 10.0));
        player.add_animation(AnimationClip::looping("air_down", 4, 10.0));
        player.add_animation(AnimationClip::looping("crouch", 6, 8.0));
        player.add_animation(AnimationClip::looping("crouch_move", 6, 10.0));
        player.add_animation(AnimationClip::one_shot("hurt", 5, 15.0));
        player.add_animation(AnimationClip::one_shot("dead", 10, 12.0));

        player.play_from_start("idle");
        player
    }

    /// Add a clip to the library
    pub fn add_animation(&mut self, clip: AnimationClip) {
        self.animations.insert(clip.name.clone(), clip);
    }

    /// Whether a clip with this name exists
    pub fn has_clip(&self, name: &str) -> bool {
        self.animations.contains_key(name)
    }

    /// Start a clip from its first frame, even if it is already playing.
    /// Returns false when no clip with this name exists.
    pub fn play_from_start(&mut self, name: &str) -> bool {
        if !self.has_clip(name) {
            return false;
        }
        self.current_animation = name.to_string();
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.playing = true;
        true
    }

    /// Advance playback (called every frame)
    pub fn update(&mut self, dt: f32) {
        if !self.playing {
            return;
        }

        let Some(clip) = self.animations.get(&self.current_animation) else {
            return;
        };

        self.frame_timer += dt;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                if clip.looping {
                    self.current_frame = 0;
                } else {
                    // Hold the last frame
                    self.current_frame = clip.frame_count - 1;
                    self.playing = false;
                }
            }
        }
    }

    /// The clip currently playing
    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }

    /// Current frame index within the clip
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Whether a one-shot clip has run to its end
    pub fn is_finished(&self) -> bool {
        match self.animations.get(&self.current_animation) {
            Some(clip) => {
                !clip.looping && self.current_frame >= clip.frame_count - 1 && !self.playing
            }
            None => true,
        }
    }

    /// Set horizontal flip state
    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.flip_horizontal = flip;
    }

    /// Get horizontal flip state
    pub fn is_flipped_horizontal(&self) -> bool {
        self.flip_horizontal
    }
}

/// The closed set of animation states; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimState {
    Idle,
    Move,
    AirUp,
    AirDown,
    Crouch,
    CrouchMove,
    Hurt,
    Dead,
}

impl AnimState {
    /// The playback clip for this state
    pub fn clip_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Move => "move",
            Self::AirUp => "air_up",
            Self::AirDown => "air_down",
            Self::Crouch => "crouch",
            Self::CrouchMove => "crouch_move",
            Self::Hurt => "hurt",
            Self::Dead => "dead",
        }
    }
}

/// Vertical speeds below this read as "not moving vertically"; contact
/// resolution leaves residual velocities on resting bodies
const AIR_VELOCITY_THRESHOLD: f32 = 0.05;

/// Per-frame snapshot of the signals the state machine transitions on
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationContext {
    pub velocity_y: f32,
    pub is_grounded: bool,
    pub is_crouching: bool,
    pub move_input: f32,
    pub facing_right: bool,
}

/// The player's animation state machine
///
/// Air checks run before ground locomotion checks in every grounded state
/// except Crouch, so walking off a ledge preempts Idle/Move regardless of
/// input. Hurt and Dead are entered by force from health notifications.
#[derive(Debug)]
pub struct PlayerAnimation {
    state: AnimState,

    /// Set by the playback collaborator when a one-shot clip ends;
    /// cleared on every state entry
    clip_done: bool,

    /// Current sprite orientation; only re-evaluated while move input is
    /// non-zero
    facing_right: bool,
}

impl Default for PlayerAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerAnimation {
    pub fn new() -> Self {
        Self {
            state: AnimState::Idle,
            clip_done: false,
            facing_right: true,
        }
    }

    /// The active animation state
    pub fn state(&self) -> AnimState {
        self.state
    }

    /// The sprite orientation the state machine last committed to
    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    /// The playback collaborator reports that the current one-shot clip
    /// has finished
    pub fn notify_clip_finished(&mut self) {
        self.clip_done = true;
    }

    /// Run the transition function once for this frame
    pub fn update(&mut self, ctx: &AnimationContext, playback: &mut AnimationPlayer) {
        self.update_look_direction(ctx, playback);

        match self.state {
            AnimState::Idle => {
                if self.air_check(ctx, playback) {
                    return;
                }
                if ctx.is_crouching {
                    self.set_state(AnimState::Crouch, false, playback);
                    return;
                }
                if ctx.move_input != 0.0 {
                    self.set_state(AnimState::Move, false, playback);
                }
            }
            AnimState::Move => {
                if self.air_check(ctx, playback) {
                    return;
                }
                if ctx.is_crouching {
                    self.set_state(AnimState::CrouchMove, false, playback);
                    return;
                }
                if ctx.move_input == 0.0 {
                    self.set_state(AnimState::Idle, false, playback);
                }
            }
            AnimState::AirUp => {
                // No grounded exit here; descent goes through AirDown
                self.air_check(ctx, playback);
            }
            AnimState::AirDown => {
                if self.air_check(ctx, playback) {
                    return;
                }
                if ctx.is_grounded {
                    self.set_state(AnimState::Idle, false, playback);
                }
            }
            AnimState::Crouch => {
                // Deliberately no air check: a crouched character sliding
                // off a ledge keeps the crouch pose until released
                if !ctx.is_crouching {
                    self.set_state(AnimState::Idle, false, playback);
                } else if ctx.move_input != 0.0 {
                    self.set_state(AnimState::CrouchMove, false, playback);
                }
            }
            AnimState::CrouchMove => {
                if self.air_check(ctx, playback) {
                    return;
                }
                if !ctx.is_crouching {
                    self.set_state(AnimState::Move, false, playback);
                    return;
                }
                if ctx.move_input == 0.0 {
                    self.set_state(AnimState::Crouch, false, playback);
                }
            }
            AnimState::Hurt => {
                if self.clip_done {
                    let next = if ctx.is_grounded {
                        AnimState::Idle
                    } else {
                        AnimState::AirDown
                    };
                    self.set_state(next, false, playback);
                }
            }
            AnimState::Dead => {
                // Terminal
            }
        }
    }

    /// Hurt notification: forced transition, restarting the clip even if
    /// already in Hurt
    pub fn on_hurt(&mut self, playback: &mut AnimationPlayer) {
        self.set_state(AnimState::Hurt, true, playback);
    }

    /// Death notification: forced transition into the terminal state
    pub fn on_death(&mut self, playback: &mut AnimationPlayer) {
        self.set_state(AnimState::Dead, true, playback);
    }

    /// Return to the initial state (respawn)
    pub fn reset(&mut self, playback: &mut AnimationPlayer) {
        self.set_state(AnimState::Idle, true, playback);
    }

    /// Rising/falling velocity preempts everything else
    fn air_check(&mut self, ctx: &AnimationContext, playback: &mut AnimationPlayer) -> bool {
        if ctx.velocity_y > AIR_VELOCITY_THRESHOLD {
            self.set_state(AnimState::AirUp, false, playback);
            return true;
        }
        if ctx.velocity_y < -AIR_VELOCITY_THRESHOLD {
            self.set_state(AnimState::AirDown, false, playback);
            return true;
        }
        false
    }

    /// Orientation snaps to the controller's facing flag, but only while
    /// there is live move input
    fn update_look_direction(&mut self, ctx: &AnimationContext, playback: &mut AnimationPlayer) {
        if ctx.move_input != 0.0 {
            self.facing_right = ctx.facing_right;
            playback.set_flip_horizontal(!self.facing_right);
        }
    }

    fn set_state(&mut self, state: AnimState, force: bool, playback: &mut AnimationPlayer) {
        if self.state == state && !force {
            return;
        }

        // The logical state advances even when the clip is missing; the
        // playback layer just keeps showing whatever it had
        if !playback.play_from_start(state.clip_name()) {
            warn!("No animation clip named \"{}\"", state.clip_name());
        }

        self.state = state;
        self.clip_done = false;
    }
}
