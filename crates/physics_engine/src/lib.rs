//! # Physics Engine
//!
//! Rigid-body collision detection and response for the engine's ECS world.
//!
//! ## Features
//!
//! - **Collision shapes**: rays, spheres, planes, axis-aligned and oriented boxes
//! - **Layer filtering**: independent layer/mask bits with one-way visibility
//! - **Contact solver**: sequential impulses with restitution and friction
//! - **Debug drawing**: renderer-agnostic collider and contact visualization
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use physics_engine::prelude::*;
//!
//! fn main() -> Result<(), PhysicsError> {
//!     let mut world = World::new();
//!
//!     let ball = world.create_entity();
//!     world.add_component(ball, TransformComponent::from_position(Vec3::new(0.0, 5.0, 0.0)))?;
//!     world.add_component(ball, ColliderComponent::new(CollisionShape::sphere(1.0)))?;
//!     world.add_component(ball, RigidBodyComponent::dynamic(1.0)?.with_restitution(0.5))?;
//!
//!     let ground = world.create_entity();
//!     world.add_component(ground, TransformComponent::identity())?;
//!     world.add_component(ground, ColliderComponent::new(CollisionShape::plane(Vec3::y())))?;
//!     world.add_component(ground, RigidBodyComponent::fixed())?;
//!
//!     let mut physics = PhysicsSystem::new(PhysicsConfig::default())?;
//!     for _ in 0..120 {
//!         TransformSystem::update(&mut world);
//!         physics.step(&mut world, 1.0 / 60.0)?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::cast_precision_loss
)]

pub mod config;
pub mod debug;
pub mod ecs;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, PhysicsConfig},
        debug::{CollisionDebugVisualizer, DebugShape},
        ecs::{
            components::{BodyKind, ColliderComponent, RigidBodyComponent, TransformComponent},
            systems::{PhysicsSystem, StepReport, TransformSystem},
            Component, EcsError, Entity, World,
        },
        foundation::math::{Mat3, Mat4, Quat, Vec3},
        physics::{
            CollisionLayers, CollisionShape, NarrowPhaseStats, OverlapManifold, PhysicsError, Ray,
            RayHit, ShapeKind,
        },
    };
}
