//! ECS systems

pub mod physics_system;
pub mod transform_system;

pub use physics_system::{PhysicsSystem, StepReport};
pub use transform_system::TransformSystem;
