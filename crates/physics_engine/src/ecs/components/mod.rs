//! ECS Components module

pub mod collision;
pub mod rigid_body;
pub mod transform;

pub use collision::ColliderComponent;
pub use rigid_body::{BodyKind, RigidBodyComponent};
pub use transform::TransformComponent;
