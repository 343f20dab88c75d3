//! Collision-specific debug visualization
//!
//! Colliders are drawn at their current placement, colored by whether their
//! overlap set is non-empty. Each manifold adds a line along its normal
//! scaled by depth.

use crate::debug::draw::{DebugDrawSystem, DebugShape};
use crate::ecs::components::{ColliderComponent, TransformComponent};
use crate::ecs::World;
use crate::foundation::math::{Mat3, Vec3, Vec4};
use crate::physics::collision::CollisionShape;
use crate::physics::manifold::OverlapManifold;

/// Half width of the patch drawn for an infinite plane
const PLANE_PATCH_SIZE: f32 = 10.0;

/// Minimum length of a contact normal line
const MIN_NORMAL_LENGTH: f32 = 0.25;

/// Color scheme for collision visualization
#[derive(Clone, Debug)]
pub struct CollisionDebugColors {
    /// Color for collision shapes (not colliding)
    pub shape_default: Vec4,

    /// Color for collision shapes (currently colliding)
    pub shape_colliding: Vec4,

    /// Color for contact normals
    pub contact_normal: Vec4,

    /// Color for ray probes
    pub probe: Vec4,
}

impl Default for CollisionDebugColors {
    fn default() -> Self {
        Self {
            shape_default: Vec4::new(0.0, 1.0, 0.0, 0.3),   // Green, semi-transparent
            shape_colliding: Vec4::new(1.0, 0.0, 0.0, 0.5), // Red, semi-transparent
            contact_normal: Vec4::new(1.0, 1.0, 0.0, 1.0),  // Yellow
            probe: Vec4::new(0.0, 1.0, 1.0, 0.8),           // Cyan
        }
    }
}

/// Collision-specific debug visualizer
pub struct CollisionDebugVisualizer {
    debug_draw: DebugDrawSystem,
    colors: CollisionDebugColors,

    /// Show collision shapes
    pub show_shapes: bool,

    /// Show contact normals
    pub show_contacts: bool,
}

impl CollisionDebugVisualizer {
    /// Create a new collision debug visualizer
    pub fn new() -> Self {
        Self {
            debug_draw: DebugDrawSystem::new(),
            colors: CollisionDebugColors::default(),
            show_shapes: true,
            show_contacts: true,
        }
    }

    /// Set custom color scheme
    pub fn with_colors(mut self, colors: CollisionDebugColors) -> Self {
        self.colors = colors;
        self
    }

    /// Draw every debug-enabled collider and every manifold for one frame
    pub fn draw_world(&mut self, world: &World, manifolds: &[OverlapManifold]) {
        if self.show_shapes {
            for (entity, collider) in world.query::<ColliderComponent>() {
                if !collider.debug_draw {
                    continue;
                }
                let Some(transform) = world.get_component::<TransformComponent>(entity) else {
                    continue;
                };
                let placed = collider.shape().to_world_space(&transform.to_matrix());
                self.draw_collision_shape(&placed, collider.is_colliding());
            }
        }

        if self.show_contacts {
            for manifold in manifolds {
                self.draw_manifold(manifold);
            }
        }
    }

    /// Visualize a world-space collision shape for one frame
    pub fn draw_collision_shape(&mut self, shape: &CollisionShape, is_colliding: bool) {
        let color = if is_colliding {
            self.colors.shape_colliding
        } else {
            self.colors.shape_default
        };

        let frame = match shape {
            CollisionShape::Sphere(sphere) => DebugShape::Sphere {
                center: sphere.center,
                radius: sphere.radius,
                color,
                duration: 0.0,
            },
            CollisionShape::Aabb(aabb) => DebugShape::Box {
                center: aabb.center,
                half_extents: aabb.half_extents,
                orientation: Mat3::identity(),
                color,
                duration: 0.0,
            },
            CollisionShape::Oobb(oobb) => DebugShape::Box {
                center: oobb.center,
                half_extents: oobb.half_extents,
                orientation: oobb.orientation,
                color,
                duration: 0.0,
            },
            CollisionShape::Plane(plane) => DebugShape::Plane {
                point: plane.point(),
                normal: plane.normal,
                size: PLANE_PATCH_SIZE,
                color,
                duration: 0.0,
            },
            CollisionShape::Ray(ray) => {
                let reach = if ray.length.is_finite() { ray.length } else { PLANE_PATCH_SIZE };
                DebugShape::Line {
                    start: ray.origin,
                    end: ray.point_at(reach),
                    color: self.colors.probe,
                    duration: 0.0,
                }
            }
        };
        self.debug_draw.draw(frame);
    }

    /// Contact point plus a line along the normal, scaled by depth
    pub fn draw_manifold(&mut self, manifold: &OverlapManifold) {
        let start = manifold.contact_position;
        if manifold.is_probe() {
            self.debug_draw.draw_point(start, self.colors.probe, 6.0, 0.0);
            return;
        }
        let length = manifold.penetration_depth.max(MIN_NORMAL_LENGTH);
        let end: Vec3 = start + manifold.normal * length;
        self.debug_draw.draw_line(start, end, self.colors.contact_normal, 0.0);
    }

    /// Clear all visualization
    pub fn clear(&mut self) {
        self.debug_draw.clear();
    }

    /// Update debug system (expire last frame's shapes)
    pub fn update(&mut self, delta_time: f32) {
        self.debug_draw.update(delta_time);
    }

    /// Get all debug shapes for rendering
    pub fn get_shapes(&self) -> &[DebugShape] {
        self.debug_draw.get_shapes()
    }

    /// Enable/disable the entire debug system
    pub fn set_enabled(&mut self, enabled: bool) {
        self.debug_draw.enabled = enabled;
    }

    /// Check if debug system is enabled
    pub fn is_enabled(&self) -> bool {
        self.debug_draw.enabled
    }
}

impl Default for CollisionDebugVisualizer {
    fn default() -> Self {
        Self::new()
    }
}
