use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision groups for filtering what objects can collide with each other
///
/// The gameplay layer needs different collision behavior for the player,
/// level geometry, damage volumes and interactable props.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// The player character
    Player = 0b0000_0001,

    /// Static level geometry: ground, platforms, walls
    Ground = 0b0000_0010,

    /// Damage volumes (spikes, pits, hazards) - sensors
    Hazard = 0b0000_0100,

    /// Interactable props (levers, doors, pickups) - sensors
    Interactable = 0b0000_1000,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // The player touches level geometry and is noticed by sensors
            CollisionGroups::Player => Group::from_bits_truncate(
                CollisionGroups::Ground as u32
                    | CollisionGroups::Hazard as u32
                    | CollisionGroups::Interactable as u32,
            ),

            // Ground holds up the player
            CollisionGroups::Ground => Group::from_bits_truncate(CollisionGroups::Player as u32),

            // Hazards and interactables only care about the player
            CollisionGroups::Hazard | CollisionGroups::Interactable => {
                Group::from_bits_truncate(CollisionGroups::Player as u32)
            }
        };

        InteractionGroups::new(memberships, filter)
    }

    /// Group bit as a rapier filter group
    pub fn group(self) -> Group {
        Group::from_bits_truncate(self as u32)
    }
}

/// A gameplay-level collision event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Two colliders started touching (or a sensor began overlapping)
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

/// Queue for storing collision events during a physics step
///
/// Drained once per tick by the session; rapier writes into it from the
/// physics pipeline during `step`.
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(16))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this frame
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Add a collision event
    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// Implement rapier2d's EventHandler trait for our event queue
impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
        // Contact forces are not used by the gameplay layer
    }
}
