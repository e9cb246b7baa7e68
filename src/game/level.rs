// Level state: geometry, checkpoints, damage volumes, interactables

use glam::Vec2;
use std::collections::HashMap;

use crate::engine::physics::{body::presets, ColliderHandle, PhysicsWorld, RigidBodyHandle};

/// A respawn location, tracked by index within the level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint {
    pub position: Vec2,
}

/// Capability exposed by world objects the player can interact with
pub trait Interactable {
    /// Invoked when the player triggers this object. `initiator` is the
    /// body of whoever did the triggering.
    fn interact(&mut self, initiator: RigidBodyHandle);
}

/// A playable level: static geometry, checkpoints, damage volumes and
/// interactable props
///
/// Built once before the session activates; the gameplay core reads
/// checkpoints and trigger mappings but never mutates the level layout.
#[derive(Default)]
pub struct Level {
    checkpoints: Vec<Checkpoint>,

    /// Damage dealt per hazard sensor collider
    damage_volumes: HashMap<ColliderHandle, u32>,

    /// Interactable props keyed by their sensor collider
    interactables: HashMap<ColliderHandle, Box<dyn Interactable>>,
}

impl Level {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a static platform to the world
    pub fn add_platform(
        &mut self,
        physics: &mut PhysicsWorld,
        center: Vec2,
        width: f32,
        height: f32,
    ) {
        let body = physics.add_rigid_body(presets::platform_body(center.x, center.y));
        physics.add_collider(presets::platform_collider(width, height), body);
    }

    /// Add a damage volume: overlapping it hurts the player
    pub fn add_damage_volume(
        &mut self,
        physics: &mut PhysicsWorld,
        center: Vec2,
        width: f32,
        height: f32,
        damage: u32,
    ) -> ColliderHandle {
        let body = physics.add_rigid_body(presets::platform_body(center.x, center.y));
        let collider = physics.add_collider(presets::hazard_sensor(width, height), body);
        self.damage_volumes.insert(collider, damage);
        collider
    }

    /// Add an interactable prop with its own sensor collider
    pub fn add_interactable(
        &mut self,
        physics: &mut PhysicsWorld,
        center: Vec2,
        width: f32,
        height: f32,
        interactable: Box<dyn Interactable>,
    ) -> ColliderHandle {
        let body = physics.add_rigid_body(presets::platform_body(center.x, center.y));
        let collider = physics.add_collider(presets::interactable_sensor(width, height), body);
        self.interactables.insert(collider, interactable);
        collider
    }

    /// Register a checkpoint, returning its index
    pub fn add_checkpoint(&mut self, position: Vec2) -> usize {
        self.checkpoints.push(Checkpoint { position });
        self.checkpoints.len() - 1
    }

    /// Look up a checkpoint by index
    pub fn checkpoint(&self, index: usize) -> Option<&Checkpoint> {
        self.checkpoints.get(index)
    }

    /// Number of checkpoints in this level
    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.len()
    }

    /// Damage dealt by a hazard collider, if it is one
    pub fn damage_at(&self, collider: ColliderHandle) -> Option<u32> {
        self.damage_volumes.get(&collider).copied()
    }

    /// Whether a collider exposes the interaction capability
    pub fn is_interactable(&self, collider: ColliderHandle) -> bool {
        self.interactables.contains_key(&collider)
    }

    /// Trigger an interactable's contract. Returns false when the collider
    /// is not interactable.
    pub fn interact(&mut self, collider: ColliderHandle, initiator: RigidBodyHandle) -> bool {
        match self.interactables.get_mut(&collider) {
            Some(interactable) => {
                interactable.interact(initiator);
                true
            }
            None => false,
        }
    }
}
