// HUD state: the death transition cover

/// Timing for the full-screen transition cover
#[derive(Debug, Clone)]
pub struct CoverTiming {
    /// Seconds to fade from clear to fully opaque
    pub fade_in: f32,
    /// Seconds the cover stays fully opaque
    pub hold: f32,
    /// Seconds to fade back to clear
    pub fade_out: f32,
}

impl Default for CoverTiming {
    fn default() -> Self {
        Self {
            fade_in: 0.6,
            hold: 1.2,
            fade_out: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CoverPhase {
    Clear,
    FadingIn { elapsed: f32 },
    Opaque { elapsed: f32 },
    FadingOut { elapsed: f32 },
}

/// The player HUD's contribution to the death sequence: a timed
/// full-screen cover that masks the respawn teleport
///
/// Rendering is someone else's job; this tracks the cover's state and
/// exposes the one signal the respawn sequencer cares about:
/// `is_cover_on`, true exactly while the cover is fully opaque.
#[derive(Debug)]
pub struct PlayerHud {
    timing: CoverTiming,
    phase: CoverPhase,
}

impl PlayerHud {
    pub fn new(timing: CoverTiming) -> Self {
        Self {
            timing,
            phase: CoverPhase::Clear,
        }
    }

    /// Start the death transition: fade the cover in, hold, fade out
    pub fn play_death_animation(&mut self) {
        self.phase = CoverPhase::FadingIn { elapsed: 0.0 };
    }

    /// True exactly while the cover is fully opaque
    pub fn is_cover_on(&self) -> bool {
        matches!(self.phase, CoverPhase::Opaque { .. })
    }

    /// Whether any part of the transition is still running
    pub fn is_transitioning(&self) -> bool {
        self.phase != CoverPhase::Clear
    }

    /// Current cover opacity in [0, 1]
    pub fn cover_opacity(&self) -> f32 {
        match self.phase {
            CoverPhase::Clear => 0.0,
            CoverPhase::FadingIn { elapsed } => (elapsed / self.timing.fade_in).min(1.0),
            CoverPhase::Opaque { .. } => 1.0,
            CoverPhase::FadingOut { elapsed } => 1.0 - (elapsed / self.timing.fade_out).min(1.0),
        }
    }

    /// Advance the transition timeline
    pub fn update(&mut self, dt: f32) {
        self.phase = match self.phase {
            CoverPhase::Clear => CoverPhase::Clear,
            CoverPhase::FadingIn { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.timing.fade_in {
                    CoverPhase::Opaque { elapsed: 0.0 }
                } else {
                    CoverPhase::FadingIn { elapsed }
                }
            }
            CoverPhase::Opaque { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.timing.hold {
                    CoverPhase::FadingOut { elapsed: 0.0 }
                } else {
                    CoverPhase::Opaque { elapsed }
                }
            }
            CoverPhase::FadingOut { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.timing.fade_out {
                    CoverPhase::Clear
                } else {
                    CoverPhase::FadingOut { elapsed }
                }
            }
        };
    }
}

impl Default for PlayerHud {
    fn default() -> Self {
        Self::new(CoverTiming::default())
    }
}
