//! Collision detection components for ECS
//!
//! A collider carries one model-space shape, its layer/mask filter and the
//! overlap state published by the narrow phase at the end of every tick.

use crate::ecs::{Component, Entity};
use crate::physics::collision::{CollisionShape, ShapeKind};
use crate::physics::collision_layers::CollisionLayers;
use std::collections::HashSet;

/// Component that marks an entity as having collision detection enabled
#[derive(Debug, Clone)]
pub struct ColliderComponent {
    shape: CollisionShape,

    /// What this collider is perceived as
    pub layer: CollisionLayers,

    /// What this collider perceives
    pub mask: CollisionLayers,

    /// Entities currently overlapping and visible to this collider
    ///
    /// Rebuilt from scratch every tick.
    pub overlapping: HashSet<Entity>,

    /// Entities that started overlapping this tick
    pub entered: Vec<Entity>,

    /// Entities that stopped overlapping this tick
    pub exited: Vec<Entity>,

    /// Set when the shape changes; mass properties of an attached body are stale
    pub dirty: bool,

    /// Should this collider be visualized in debug mode?
    pub debug_draw: bool,
}

impl Component for ColliderComponent {}

impl ColliderComponent {
    /// Create a new collider on all layers, perceiving all layers
    pub fn new(shape: CollisionShape) -> Self {
        Self {
            shape,
            layer: CollisionLayers::all(),
            mask: CollisionLayers::all(),
            overlapping: HashSet::new(),
            entered: Vec::new(),
            exited: Vec::new(),
            dirty: true,
            debug_draw: false,
        }
    }

    /// Create a collider with specific layer and mask
    pub fn with_layers(mut self, layer: CollisionLayers, mask: CollisionLayers) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Enable debug visualization
    pub fn with_debug_draw(mut self, enabled: bool) -> Self {
        self.debug_draw = enabled;
        self
    }

    /// Replace the shape; the previous primitive is dropped
    pub fn set_shape(&mut self, shape: CollisionShape) {
        self.shape = shape;
        self.dirty = true;
    }

    /// The collision shape, in model space
    pub fn shape(&self) -> &CollisionShape {
        &self.shape
    }

    /// Kind of the active primitive
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Check if we're currently overlapping any entity
    pub fn is_colliding(&self) -> bool {
        !self.overlapping.is_empty()
    }

    /// Check if we're overlapping a specific entity
    pub fn is_colliding_with(&self, entity: Entity) -> bool {
        self.overlapping.contains(&entity)
    }

    /// Check if we just started overlapping a specific entity this tick
    pub fn just_collided_with(&self, entity: Entity) -> bool {
        self.entered.contains(&entity)
    }

    /// Check if we just stopped overlapping a specific entity this tick
    pub fn just_stopped_colliding_with(&self, entity: Entity) -> bool {
        self.exited.contains(&entity)
    }

    /// Replace the overlap set with `current` and record the transitions
    pub(crate) fn publish_overlaps(&mut self, current: HashSet<Entity>) {
        let mut entered: Vec<Entity> = current.difference(&self.overlapping).copied().collect();
        let mut exited: Vec<Entity> = self.overlapping.difference(&current).copied().collect();
        entered.sort_unstable();
        exited.sort_unstable();

        self.entered = entered;
        self.exited = exited;
        self.overlapping = current;
    }
}
