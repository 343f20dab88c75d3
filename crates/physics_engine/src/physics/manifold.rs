//! Per-pair overlap results handed from detection to the solver

use crate::ecs::Entity;
use crate::foundation::math::Vec3;
use crate::physics::collision::{Contact, ShapeKind};

/// One overlapping pair for one tick
///
/// Created fresh by every detection pass and consumed once by the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapManifold {
    /// First entity of the pair (earlier in enumeration order)
    pub entity_a: Entity,
    /// Second entity of the pair
    pub entity_b: Entity,
    /// A's mask intersects B's layer
    pub a_sees_b: bool,
    /// B's mask intersects A's layer
    pub b_sees_a: bool,
    /// Unit normal pointing from B toward A
    pub normal: Vec3,
    /// Penetration depth; for ray-plane probes, the hit distance
    pub penetration_depth: f32,
    /// World-space contact position
    pub contact_position: Vec3,
    /// Shape kinds of A and B
    pub kinds: (ShapeKind, ShapeKind),
}

impl OverlapManifold {
    pub(crate) fn from_contact(
        (entity_a, entity_b): (Entity, Entity),
        (a_sees_b, b_sees_a): (bool, bool),
        kinds: (ShapeKind, ShapeKind),
        contact: Contact,
    ) -> Self {
        Self {
            entity_a,
            entity_b,
            a_sees_b,
            b_sees_a,
            normal: contact.normal,
            penetration_depth: contact.depth,
            contact_position: contact.point,
            kinds,
        }
    }

    /// Ray probe result; populates overlap sets but never reaches the solver
    pub fn is_probe(&self) -> bool {
        self.kinds.0 == ShapeKind::Ray || self.kinds.1 == ShapeKind::Ray
    }

    /// Whether `entity` is one side of this pair
    pub fn involves(&self, entity: Entity) -> bool {
        self.entity_a == entity || self.entity_b == entity
    }
}
