//! Shape-pair intersection algorithms
//!
//! Every test takes world-space shapes `(a, b)` and reports a [`Contact`]
//! whose normal points from `b` toward `a`. Volumetric tests only report
//! strictly positive depth; ray tests report probe contacts (depth 0, or the
//! hit distance for ray-plane).

use super::primitives::{Oobb, Plane, Ray, Sphere};
use super::shape::CollisionShape;
use crate::foundation::math::{normalize_or_default, Vec3};

/// Squared length below which a SAT cross-product axis is discarded
const SAT_AXIS_EPSILON: f32 = 1e-6;

/// Distance below which a clamp point coincides with the sphere center
const CLAMP_EPSILON: f32 = 1e-6;

/// Geometric result of one pair test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from B toward A
    pub normal: Vec3,
    /// Penetration depth (never negative)
    pub depth: f32,
    /// World-space contact position
    pub point: Vec3,
}

impl Contact {
    /// The same contact seen with A and B exchanged
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

macro_rules! expect_shapes {
    ($a:expr => $va:ident, $b:expr => $vb:ident) => {
        match ($a, $b) {
            (CollisionShape::$va(a), CollisionShape::$vb(b)) => (a, b),
            _ => return None,
        }
    };
}

/// Sphere-Sphere: center distance against radius sum
pub fn sphere_sphere(a: &CollisionShape, b: &CollisionShape) -> Option<Contact> {
    let (a, b) = expect_shapes!(a => Sphere, b => Sphere);
    let offset = a.center - b.center;
    let distance = offset.magnitude();
    let depth = a.radius + b.radius - distance;
    if depth <= 0.0 {
        return None;
    }
    let normal = normalize_or_default(offset);
    Some(Contact {
        normal,
        depth,
        point: b.center + normal * b.radius,
    })
}

/// Sphere-Plane: signed center distance against the radius
pub fn sphere_plane(a: &CollisionShape, b: &CollisionShape) -> Option<Contact> {
    let (sphere, plane) = expect_shapes!(a => Sphere, b => Plane);
    let signed = plane.signed_distance(sphere.center);
    let depth = sphere.radius - signed;
    if depth <= 0.0 {
        return None;
    }
    Some(Contact {
        normal: plane.normal,
        depth,
        point: sphere.center - plane.normal * signed,
    })
}

/// Ray-Sphere probe
pub fn ray_sphere(a: &CollisionShape, b: &CollisionShape) -> Option<Contact> {
    let (ray, sphere) = expect_shapes!(a => Ray, b => Sphere);
    let t = sphere.intersect_ray(ray).filter(|t| ray.accepts(*t))?;
    Some(Contact {
        normal: normalize_or_default(ray.origin - sphere.center),
        depth: 0.0,
        point: ray.point_at(t),
    })
}

/// Ray-Plane probe; depth carries the hit distance `t`
pub fn ray_plane(a: &CollisionShape, b: &CollisionShape) -> Option<Contact> {
    let (ray, plane) = expect_shapes!(a => Ray, b => Plane);
    let t = plane.intersect_ray(ray)?;
    let facing = if plane.signed_distance(ray.origin) >= 0.0 {
        plane.normal
    } else {
        -plane.normal
    };
    Some(Contact {
        normal: facing,
        depth: t,
        point: ray.point_at(t),
    })
}

/// Ray-AABB probe
pub fn ray_aabb(a: &CollisionShape, b: &CollisionShape) -> Option<Contact> {
    let (ray, aabb) = expect_shapes!(a => Ray, b => Aabb);
    let t = aabb.intersect_ray(ray)?;
    Some(ray_box_contact(ray, aabb.center, t))
}

/// Ray-OOBB probe
pub fn ray_oobb(a: &CollisionShape, b: &CollisionShape) -> Option<Contact> {
    let (ray, oobb) = expect_shapes!(a => Ray, b => Oobb);
    let t = oobb.intersect_ray(ray)?;
    Some(ray_box_contact(ray, oobb.center, t))
}

fn ray_box_contact(ray: &Ray, box_center: Vec3, t: f32) -> Contact {
    Contact {
        normal: normalize_or_default(ray.origin - box_center),
        depth: 0.0,
        point: ray.point_at(t),
    }
}

/// AABB-AABB: slab overlap on all three axes, resolved along the shallowest
pub fn aabb_aabb(a: &CollisionShape, b: &CollisionShape) -> Option<Contact> {
    let (a, b) = expect_shapes!(a => Aabb, b => Aabb);
    let offset = a.center - b.center;

    let mut best_axis = 0;
    let mut best_overlap = f32::INFINITY;
    for axis in 0..3 {
        let overlap = a.half_extents[axis] + b.half_extents[axis] - offset[axis].abs();
        if overlap <= 0.0 {
            return None;
        }
        if overlap < best_overlap {
            best_overlap = overlap;
            best_axis = axis;
        }
    }

    let mut normal = Vec3::zeros();
    normal[best_axis] = if offset[best_axis] >= 0.0 { 1.0 } else { -1.0 };

    // Center of the overlap region
    let low = a.min().sup(&b.min());
    let high = a.max().inf(&b.max());
    Some(Contact {
        normal,
        depth: best_overlap,
        point: (low + high) * 0.5,
    })
}

/// AABB-Sphere: clamp the sphere center into the box
pub fn aabb_sphere(a: &CollisionShape, b: &CollisionShape) -> Option<Contact> {
    let (aabb, sphere) = expect_shapes!(a => Aabb, b => Sphere);
    let clamped = aabb.closest_point(sphere.center);
    if (clamped - sphere.center).magnitude() > CLAMP_EPSILON {
        return clamped_sphere_contact(clamped, sphere);
    }

    // Center inside the box: push out through the nearest face
    let (face_axis, face_distance) = nearest_face(sphere.center - aabb.center, aabb.half_extents);
    Some(Contact {
        normal: -face_axis,
        depth: sphere.radius + face_distance,
        point: sphere.center + face_axis * face_distance,
    })
}

/// OOBB-Sphere: clamp the sphere center in box space
pub fn oobb_sphere(a: &CollisionShape, b: &CollisionShape) -> Option<Contact> {
    let (oobb, sphere) = expect_shapes!(a => Oobb, b => Sphere);
    let clamped = oobb.to_world(oobb.clamp_local(sphere.center));
    if (clamped - sphere.center).magnitude() > CLAMP_EPSILON {
        return clamped_sphere_contact(clamped, sphere);
    }

    let (local_axis, face_distance) = nearest_face(oobb.to_local(sphere.center), oobb.half_extents);
    let face_axis = oobb.orientation * local_axis;
    Some(Contact {
        normal: -face_axis,
        depth: sphere.radius + face_distance,
        point: sphere.center + face_axis * face_distance,
    })
}

/// Sphere center outside the box: normal from the sphere center toward the clamp point
fn clamped_sphere_contact(clamped: Vec3, sphere: &Sphere) -> Option<Contact> {
    let toward_box = clamped - sphere.center;
    let distance = toward_box.magnitude();
    let depth = sphere.radius - distance;
    if depth <= 0.0 {
        return None;
    }
    Some(Contact {
        normal: normalize_or_default(toward_box),
        depth,
        point: clamped,
    })
}

/// Outward face axis and distance to it for a point inside a centered box
fn nearest_face(local: Vec3, half_extents: Vec3) -> (Vec3, f32) {
    let mut axis = Vec3::zeros();
    let mut best = f32::INFINITY;
    let mut best_index = 1;
    let mut best_sign = 1.0;
    for i in 0..3 {
        for sign in [1.0_f32, -1.0] {
            let distance = half_extents[i] - sign * local[i];
            if distance < best {
                best = distance;
                best_index = i;
                best_sign = sign;
            }
        }
    }
    axis[best_index] = best_sign;
    (axis, best.max(0.0))
}

/// OOBB-OOBB: separating axis test over 3 + 3 face axes and 9 edge crosses
pub fn oobb_oobb(a: &CollisionShape, b: &CollisionShape) -> Option<Contact> {
    let (a, b) = expect_shapes!(a => Oobb, b => Oobb);
    sat_boxes(a, b)
}

/// AABB-OOBB: the AABB is an identity-rotation OOBB
pub fn aabb_oobb(a: &CollisionShape, b: &CollisionShape) -> Option<Contact> {
    let (a, b) = expect_shapes!(a => Aabb, b => Oobb);
    sat_boxes(&a.to_oobb(), b)
}

/// SAT between two oriented boxes; minimum overlap axis becomes the normal
pub fn sat_boxes(a: &Oobb, b: &Oobb) -> Option<Contact> {
    let offset = a.center - b.center;

    let mut candidates: Vec<Vec3> = Vec::with_capacity(15);
    for i in 0..3 {
        candidates.push(a.axis(i));
    }
    for j in 0..3 {
        candidates.push(b.axis(j));
    }
    for i in 0..3 {
        for j in 0..3 {
            candidates.push(a.axis(i).cross(&b.axis(j)));
        }
    }

    let mut best_axis = None;
    let mut best_overlap = f32::INFINITY;
    for axis in candidates {
        let length_squared = axis.magnitude_squared();
        if length_squared < SAT_AXIS_EPSILON {
            // Parallel edges produce no usable axis
            continue;
        }
        let axis = axis / length_squared.sqrt();
        let overlap = a.projected_radius(&axis) + b.projected_radius(&axis) - offset.dot(&axis).abs();
        if overlap <= 0.0 {
            return None;
        }
        if overlap < best_overlap {
            best_overlap = overlap;
            best_axis = Some(axis);
        }
    }

    let mut normal = normalize_or_default(best_axis?);
    if normal.dot(&offset) < 0.0 {
        normal = -normal;
    }

    let on_b = b.to_world(b.clamp_local(a.center));
    let on_a = a.to_world(a.clamp_local(b.center));
    Some(Contact {
        normal,
        depth: best_overlap,
        point: (on_a + on_b) * 0.5,
    })
}

/// AABB-Plane: box support radius along the plane normal
pub fn aabb_plane(a: &CollisionShape, b: &CollisionShape) -> Option<Contact> {
    let (aabb, plane) = expect_shapes!(a => Aabb, b => Plane);
    box_plane(&aabb.to_oobb(), plane)
}

/// OOBB-Plane: box support radius along the plane normal
pub fn oobb_plane(a: &CollisionShape, b: &CollisionShape) -> Option<Contact> {
    let (oobb, plane) = expect_shapes!(a => Oobb, b => Plane);
    box_plane(oobb, plane)
}

fn box_plane(oobb: &Oobb, plane: &Plane) -> Option<Contact> {
    let radius = oobb.projected_radius(&plane.normal);
    let signed = plane.signed_distance(oobb.center);
    let depth = radius - signed;
    if depth <= 0.0 {
        return None;
    }
    Some(Contact {
        normal: plane.normal,
        depth,
        point: oobb.center - plane.normal * signed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Quat;
    use crate::physics::collision::primitives::Aabb;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    fn sphere(center: Vec3, radius: f32) -> CollisionShape {
        CollisionShape::Sphere(Sphere::new(center, radius))
    }

    fn cube(center: Vec3, half: f32) -> CollisionShape {
        CollisionShape::Oobb(Oobb::new(center, Vec3::new(half, half, half)))
    }

    #[test]
    fn test_sphere_sphere_depth_and_normal() {
        let a = sphere(Vec3::new(1.5, 0.0, 0.0), 1.0);
        let b = sphere(Vec3::zeros(), 1.0);
        let contact = sphere_sphere(&a, &b).unwrap();

        assert_relative_eq!(contact.depth, 0.5, epsilon = 1e-5);
        assert_relative_eq!(contact.normal, Vec3::x(), epsilon = 1e-5);
        assert_relative_eq!(contact.normal.magnitude(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_sphere_sphere_touching_is_not_a_contact() {
        let a = sphere(Vec3::new(2.0, 0.0, 0.0), 1.0);
        let b = sphere(Vec3::zeros(), 1.0);
        assert!(sphere_sphere(&a, &b).is_none());
    }

    #[test]
    fn test_concentric_spheres_fall_back_to_default_normal() {
        let contact = sphere_sphere(&sphere(Vec3::zeros(), 1.0), &sphere(Vec3::zeros(), 1.0)).unwrap();
        assert_eq!(contact.normal, Vec3::y());
        assert!(contact.normal.iter().all(|c| c.is_finite()));
        assert_relative_eq!(contact.depth, 2.0);
    }

    #[test]
    fn test_sphere_plane() {
        let plane = CollisionShape::Plane(Plane::new(Vec3::y(), 0.0));
        let contact = sphere_plane(&sphere(Vec3::new(3.0, 0.75, 0.0), 1.0), &plane).unwrap();

        assert_relative_eq!(contact.depth, 0.25, epsilon = 1e-6);
        assert_relative_eq!(contact.normal, Vec3::y());
        assert_relative_eq!(contact.point, Vec3::new(3.0, 0.0, 0.0), epsilon = 1e-6);

        assert!(sphere_plane(&sphere(Vec3::new(0.0, 1.0, 0.0), 1.0), &plane).is_none());
    }

    #[test]
    fn test_ray_plane_reports_distance() {
        let ray = CollisionShape::Ray(Ray::with_length(Vec3::new(0.0, 4.0, 0.0), -Vec3::y(), 10.0));
        let plane = CollisionShape::Plane(Plane::new(Vec3::y(), 1.0));
        let contact = ray_plane(&ray, &plane).unwrap();

        assert_relative_eq!(contact.depth, 3.0, epsilon = 1e-5);
        assert_relative_eq!(contact.normal, Vec3::y());

        let short = CollisionShape::Ray(Ray::with_length(Vec3::new(0.0, 4.0, 0.0), -Vec3::y(), 2.0));
        assert!(ray_plane(&short, &plane).is_none());
    }

    #[test]
    fn test_ray_sphere_probe() {
        let ray = CollisionShape::Ray(Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::x()));
        let contact = ray_sphere(&ray, &sphere(Vec3::zeros(), 1.0)).unwrap();

        assert_eq!(contact.depth, 0.0);
        assert_relative_eq!(contact.normal, -Vec3::x(), epsilon = 1e-6);
        assert_relative_eq!(contact.point, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_aabb_aabb_minimum_axis() {
        let a = CollisionShape::Aabb(Aabb::new(Vec3::new(0.0, 1.8, 0.2), Vec3::new(1.0, 1.0, 1.0)));
        let b = CollisionShape::Aabb(Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)));
        let contact = aabb_aabb(&a, &b).unwrap();

        assert_relative_eq!(contact.depth, 0.2, epsilon = 1e-5);
        assert_eq!(contact.normal, Vec3::y());

        let apart = CollisionShape::Aabb(Aabb::new(Vec3::new(0.0, 0.0, 2.5), Vec3::new(1.0, 1.0, 1.0)));
        assert!(aabb_aabb(&apart, &b).is_none());
    }

    #[test]
    fn test_aabb_sphere_outside_and_inside() {
        let aabb = CollisionShape::Aabb(Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)));

        let outside = aabb_sphere(&aabb, &sphere(Vec3::new(1.5, 0.0, 0.0), 1.0)).unwrap();
        assert_relative_eq!(outside.depth, 0.5, epsilon = 1e-5);
        // From the sphere toward the box
        assert_relative_eq!(outside.normal, -Vec3::x(), epsilon = 1e-5);

        let inside = aabb_sphere(&aabb, &sphere(Vec3::new(0.0, 0.0, -0.75), 0.5)).unwrap();
        assert_relative_eq!(inside.depth, 0.75, epsilon = 1e-5);
        assert_relative_eq!(inside.normal, Vec3::z(), epsilon = 1e-5);

        assert!(aabb_sphere(&aabb, &sphere(Vec3::new(3.0, 0.0, 0.0), 1.0)).is_none());
    }

    #[test]
    fn test_oobb_sphere_rotated() {
        let rotation = Quat::from_axis_angle(&Vec3::z_axis(), FRAC_PI_4);
        let oobb = CollisionShape::Oobb(Oobb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)).with_rotation(rotation));
        // The rotated corner reaches sqrt(2) along +x
        let probe = sphere(Vec3::new(2.0, 0.0, 0.0), 0.7);
        let contact = oobb_sphere(&oobb, &probe).unwrap();

        assert_relative_eq!(contact.depth, 0.7 - (2.0 - 2.0_f32.sqrt()), epsilon = 1e-4);
        assert_relative_eq!(contact.normal, -Vec3::x(), epsilon = 1e-4);
    }

    #[test]
    fn test_sat_single_axis_offset() {
        let a = cube(Vec3::new(0.0, 0.0, 1.5), 1.0);
        let b = cube(Vec3::zeros(), 1.0);
        let contact = oobb_oobb(&a, &b).unwrap();

        assert_relative_eq!(contact.depth, 0.5, epsilon = 1e-5);
        assert_relative_eq!(contact.normal, Vec3::z(), epsilon = 1e-5);

        let flipped = oobb_oobb(&b, &a).unwrap();
        assert_relative_eq!(flipped.normal, -Vec3::z(), epsilon = 1e-5);
    }

    #[test]
    fn test_sat_separated_beyond_extents() {
        let b = cube(Vec3::zeros(), 1.0);
        for offset in [Vec3::new(2.01, 0.0, 0.0), Vec3::new(0.0, -3.0, 0.0), Vec3::new(0.0, 0.0, 2.5)] {
            assert!(oobb_oobb(&cube(offset, 1.0), &b).is_none());
        }
    }

    #[test]
    fn test_sat_rotated_boxes() {
        let yaw = Quat::from_axis_angle(&Vec3::y_axis(), FRAC_PI_4);
        let roll = Quat::from_axis_angle(&Vec3::x_axis(), FRAC_PI_4);
        let a = CollisionShape::Oobb(Oobb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)).with_rotation(yaw));
        let b = CollisionShape::Oobb(Oobb::new(Vec3::new(0.0, 2.9, 0.0), Vec3::new(1.0, 1.0, 1.0)).with_rotation(roll));
        let overlapping = CollisionShape::Oobb(Oobb::new(Vec3::new(0.0, 1.5, 0.0), Vec3::new(1.0, 1.0, 1.0)).with_rotation(roll));

        assert!(oobb_oobb(&a, &b).is_none());
        assert!(oobb_oobb(&a, &overlapping).is_some());
    }

    #[test]
    fn test_box_plane() {
        let plane = CollisionShape::Plane(Plane::new(Vec3::y(), 0.0));
        let aabb = CollisionShape::Aabb(Aabb::new(Vec3::new(0.0, 0.9, 0.0), Vec3::new(2.0, 1.0, 2.0)));
        let contact = aabb_plane(&aabb, &plane).unwrap();
        assert_relative_eq!(contact.depth, 0.1, epsilon = 1e-5);
        assert_eq!(contact.normal, Vec3::y());

        let tilted = CollisionShape::Oobb(
            Oobb::new(Vec3::new(0.0, 1.2, 0.0), Vec3::new(1.0, 1.0, 1.0))
                .with_rotation(Quat::from_axis_angle(&Vec3::z_axis(), FRAC_PI_4)),
        );
        let contact = oobb_plane(&tilted, &plane).unwrap();
        assert_relative_eq!(contact.depth, 2.0_f32.sqrt() - 1.2, epsilon = 1e-4);
    }
}
