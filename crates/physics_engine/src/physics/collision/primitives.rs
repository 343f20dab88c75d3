//! Primitive collision shapes and intersection algorithms
//!
//! Plain value types. Each primitive is stored in model space on the
//! collider and rebuilt in world space for every narrow-phase test.

use crate::foundation::math::{normalize_or_default, Mat3, Quat, Vec3};

const PARALLEL_EPSILON: f32 = 1e-8;

/// A finite ray for probes and picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray
    pub origin: Vec3,
    /// The direction of the ray (unit length)
    pub direction: Vec3,
    /// Maximum distance along `direction` that counts as a hit
    pub length: f32,
}

impl Ray {
    /// Creates an unbounded ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: normalize_or_default(direction),
            length: f32::INFINITY,
        }
    }

    /// Creates a ray that only reports hits within `length`
    pub fn with_length(origin: Vec3, direction: Vec3, length: f32) -> Self {
        Self {
            length: length.max(0.0),
            ..Self::new(origin, direction)
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Whether a hit distance lies on the finite segment
    pub fn accepts(&self, t: f32) -> bool {
        t >= 0.0 && t <= self.length
    }
}

/// A sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center (offset from the entity origin in model space)
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl Sphere {
    /// Creates a new sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius: radius.abs() }
    }

    /// Nearest non-negative distance along `ray` at which it enters the sphere
    ///
    /// A ray starting inside the sphere reports the exit distance.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        // Project the center onto the ray and compare perpendicular distance
        let to_center = self.center - ray.origin;
        let along = to_center.dot(&ray.direction);
        let perpendicular_sq = to_center.magnitude_squared() - along * along;
        let radius_sq = self.radius * self.radius;

        let discriminant = radius_sq - perpendicular_sq;
        if discriminant < 0.0 {
            return None;
        }

        let half_chord = discriminant.sqrt();
        let t_near = along - half_chord;
        let t_far = along + half_chord;
        let t = if t_near >= 0.0 { t_near } else { t_far };

        if t >= 0.0 { Some(t) } else { None }
    }
}

/// An infinite plane `normal · x = distance`, solid on the side opposite the normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal pointing out of the solid half-space
    pub normal: Vec3,
    /// Offset of the plane from the origin along `normal`
    pub distance: f32,
}

impl Plane {
    /// Creates a plane from a normal and an offset along it
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self {
            normal: normalize_or_default(normal),
            distance,
        }
    }

    /// Creates a plane through `point` with the given normal
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normalize_or_default(normal);
        Self {
            normal,
            distance: normal.dot(&point),
        }
    }

    /// The point on the plane closest to the origin
    pub fn point(&self) -> Vec3 {
        self.normal * self.distance
    }

    /// Signed distance of `point` above the plane
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) - self.distance
    }

    /// Parametric hit `t = dot(P - O, n) / dot(D, n)`; `None` when parallel
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let denominator = ray.direction.dot(&self.normal);
        if denominator.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (self.point() - ray.origin).dot(&self.normal) / denominator;
        if ray.accepts(t) { Some(t) } else { None }
    }
}

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Box center
    pub center: Vec3,
    /// Half size along each world axis
    pub half_extents: Vec3,
}

impl Aabb {
    /// Creates a box from its center and half extents
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// Creates a box spanning two corners
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self::new((min + max) * 0.5, (max - min) * 0.5)
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    /// Maximum corner
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Clamp `point` into the box
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let (min, max) = (self.min(), self.max());
        Vec3::new(
            point.x.clamp(min.x, max.x),
            point.y.clamp(min.y, max.y),
            point.z.clamp(min.z, max.z),
        )
    }

    /// Same box expressed as an oriented box with identity rotation
    pub fn to_oobb(&self) -> Oobb {
        Oobb::new(self.center, self.half_extents)
    }

    /// Slab test; returns the entry distance (0 if the origin is inside)
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        slab_intersection(
            ray.origin - self.center,
            ray.direction,
            self.half_extents,
        )
        .filter(|t| ray.accepts(*t))
    }
}

/// An oriented box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oobb {
    /// Box center
    pub center: Vec3,
    /// Half size along each local axis
    pub half_extents: Vec3,
    /// Columns are the box's local axes
    pub orientation: Mat3,
}

impl Oobb {
    /// Creates an unrotated box
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
            orientation: Mat3::identity(),
        }
    }

    /// Builder pattern: Set the box orientation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.orientation = *rotation.to_rotation_matrix().matrix();
        self
    }

    /// Local axis `index` (0..3) as a world direction
    pub fn axis(&self, index: usize) -> Vec3 {
        self.orientation.column(index).into_owned()
    }

    /// Express a world point in box-local coordinates
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        self.orientation.transpose() * (point - self.center)
    }

    /// Express a box-local point in world coordinates
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.center + self.orientation * local
    }

    /// Half the length of the box's projection onto `axis`
    pub fn projected_radius(&self, axis: &Vec3) -> f32 {
        (0..3)
            .map(|i| self.half_extents[i] * self.axis(i).dot(axis).abs())
            .sum()
    }

    /// Clamp a world `point` into the box, returning the local clamp
    pub fn clamp_local(&self, point: Vec3) -> Vec3 {
        let local = self.to_local(point);
        let h = self.half_extents;
        Vec3::new(
            local.x.clamp(-h.x, h.x),
            local.y.clamp(-h.y, h.y),
            local.z.clamp(-h.z, h.z),
        )
    }

    /// Slab test in box space; returns the entry distance
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let transpose = self.orientation.transpose();
        slab_intersection(
            transpose * (ray.origin - self.center),
            transpose * ray.direction,
            self.half_extents,
        )
        .filter(|t| ray.accepts(*t))
    }
}

/// Ray against a centered box; `origin` and `direction` are box-relative
fn slab_intersection(origin: Vec3, direction: Vec3, half_extents: Vec3) -> Option<f32> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        let (o, d, h) = (origin[axis], direction[axis], half_extents[axis]);
        if d.abs() < PARALLEL_EPSILON {
            // Parallel to this slab: must already be inside it
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let (t0, t1) = ((-h - o) / d, (h - o) / d);
        t_enter = t_enter.max(t0.min(t1));
        t_exit = t_exit.min(t0.max(t1));
        if t_enter > t_exit {
            return None;
        }
    }

    if t_exit < 0.0 {
        return None;
    }
    Some(t_enter.max(0.0))
}
