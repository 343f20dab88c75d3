//! Collision primitives, world-space shapes and pair algorithms

pub mod dispatch;
pub mod intersection;
pub mod primitives;
pub mod shape;

pub use dispatch::{is_supported, test_pair, PairTest};
pub use intersection::Contact;
pub use primitives::{Aabb, Oobb, Plane, Ray, Sphere};
pub use shape::{CollisionShape, ShapeKind};
