//! High-level collision shape abstractions
//!
//! A collider owns exactly one primitive. The enum is the tag: replacing the
//! variant drops the previous payload, so no two payloads ever coexist.

use super::primitives::{Aabb, Oobb, Plane, Ray, Sphere};
use crate::foundation::math::{
    linear_part, rotation_of, scale_of, transform_normal, Mat3, Mat4, Point3, Vec3,
};

/// Discriminant of [`CollisionShape`], used to index the pair dispatch table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    /// Finite ray probe
    Ray,
    /// Sphere
    Sphere,
    /// Infinite half-space
    Plane,
    /// Axis-aligned box
    Aabb,
    /// Oriented box
    Oobb,
}

impl ShapeKind {
    /// Every kind, in dispatch-table order
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Ray,
        ShapeKind::Sphere,
        ShapeKind::Plane,
        ShapeKind::Aabb,
        ShapeKind::Oobb,
    ];

    /// Row/column of this kind in the dispatch table
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Collision shape types (stored in MODEL SPACE)
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionShape {
    /// A ray probe
    Ray(Ray),
    /// A sphere
    Sphere(Sphere),
    /// A plane
    Plane(Plane),
    /// An axis-aligned box
    Aabb(Aabb),
    /// An oriented box
    Oobb(Oobb),
}

impl CollisionShape {
    /// Sphere of `radius` centered on the entity origin
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere(Sphere::new(Vec3::zeros(), radius))
    }

    /// Plane through the entity origin
    pub fn plane(normal: Vec3) -> Self {
        Self::Plane(Plane::new(normal, 0.0))
    }

    /// Axis-aligned box centered on the entity origin
    pub fn aabb(half_extents: Vec3) -> Self {
        Self::Aabb(Aabb::new(Vec3::zeros(), half_extents))
    }

    /// Oriented box centered on the entity origin, oriented by the transform
    pub fn oobb(half_extents: Vec3) -> Self {
        Self::Oobb(Oobb::new(Vec3::zeros(), half_extents))
    }

    /// Ray from the entity origin
    pub fn ray(direction: Vec3, length: f32) -> Self {
        Self::Ray(Ray::with_length(Vec3::zeros(), direction, length))
    }

    /// The active primitive's kind
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Ray(_) => ShapeKind::Ray,
            Self::Sphere(_) => ShapeKind::Sphere,
            Self::Plane(_) => ShapeKind::Plane,
            Self::Aabb(_) => ShapeKind::Aabb,
            Self::Oobb(_) => ShapeKind::Oobb,
        }
    }

    /// Reference point used for contact reporting and debug drawing
    pub fn center(&self) -> Vec3 {
        match self {
            Self::Ray(ray) => ray.origin,
            Self::Sphere(sphere) => sphere.center,
            Self::Plane(plane) => plane.point(),
            Self::Aabb(aabb) => aabb.center,
            Self::Oobb(oobb) => oobb.center,
        }
    }

    /// Transform this shape by an entity's world matrix
    ///
    /// Spheres take the largest axis scale; boxes scale their half extents
    /// per axis; an AABB stays axis-aligned and ignores rotation.
    pub fn to_world_space(&self, world_matrix: &Mat4) -> CollisionShape {
        let transform_point = |p: Vec3| world_matrix.transform_point(&Point3::from(p)).coords;
        let scale = scale_of(world_matrix);

        match self {
            Self::Ray(ray) => {
                let direction = linear_part(world_matrix) * ray.direction;
                let stretch = direction.magnitude();
                Self::Ray(Ray::with_length(
                    transform_point(ray.origin),
                    direction,
                    ray.length * stretch,
                ))
            }
            Self::Sphere(sphere) => {
                let max_scale = scale.x.max(scale.y).max(scale.z);
                Self::Sphere(Sphere::new(transform_point(sphere.center), sphere.radius * max_scale))
            }
            Self::Plane(plane) => Self::Plane(Plane::from_point_normal(
                transform_point(plane.point()),
                transform_normal(world_matrix, plane.normal),
            )),
            Self::Aabb(aabb) => Self::Aabb(Aabb::new(
                transform_point(aabb.center),
                aabb.half_extents.component_mul(&scale),
            )),
            Self::Oobb(oobb) => Self::Oobb(Oobb {
                center: transform_point(oobb.center),
                half_extents: oobb.half_extents.component_mul(&scale),
                orientation: rotation_of(world_matrix) * oobb.orientation,
            }),
        }
    }

    /// Body-space inverse inertia tensor for a body of `mass` built from this shape
    ///
    /// Rays and planes have no volume and report a zero tensor.
    pub fn inverse_inertia(&self, mass: f32) -> Mat3 {
        if mass <= 0.0 {
            return Mat3::zeros();
        }
        let inertia = match self {
            Self::Sphere(sphere) => {
                let i = 0.4 * mass * sphere.radius * sphere.radius;
                Vec3::new(i, i, i)
            }
            Self::Aabb(Aabb { half_extents, .. }) | Self::Oobb(Oobb { half_extents, .. }) => {
                let size = half_extents * 2.0;
                let (x2, y2, z2) = (size.x * size.x, size.y * size.y, size.z * size.z);
                Vec3::new(y2 + z2, x2 + z2, x2 + y2) * (mass / 12.0)
            }
            Self::Ray(_) | Self::Plane(_) => return Mat3::zeros(),
        };
        Mat3::from_diagonal(&inertia.map(|i| if i > 0.0 { 1.0 / i } else { 0.0 }))
    }
}
