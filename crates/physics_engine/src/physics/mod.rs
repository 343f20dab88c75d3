//! Physics module for collision detection and response
//!
//! All-pairs narrow phase over layer-filtered colliders, followed by a
//! sequential-impulse solver with positional correction.

pub mod collision;
pub mod collision_layers;
pub mod error;
pub mod manifold;
pub mod narrow_phase;
pub mod solver;

#[cfg(test)]
mod tests;

pub use collision::{CollisionShape, Contact, Ray, ShapeKind};
pub use collision_layers::CollisionLayers;
pub use error::PhysicsError;
pub use manifold::OverlapManifold;
pub use narrow_phase::{NarrowPhaseStats, RayHit};
