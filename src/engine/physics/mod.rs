// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{BodyBuilder, ColliderHandle, RigidBodyHandle};
pub use collision::{CollisionEvent, CollisionGroups};
pub use world::PhysicsWorld;

// Re-export commonly used rapier types for convenience
#[allow(unused_imports)]
pub use rapier2d::prelude::{vector, QueryFilter, Real, Vector};
