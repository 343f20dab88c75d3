//! Math utilities and types
//!
//! Provides the fundamental math types used by the collision and solver code.

pub use nalgebra::{
    Vector3,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (debug colors)
pub type Vec4 = nalgebra::Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Squared length below which a direction is treated as having no data
pub const DEGENERATE_LENGTH_SQUARED: f32 = 1e-12;

/// Fallback direction used wherever a normal cannot be derived
pub fn default_normal() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// Normalize `v`, or return `fallback` when `v` is (near) zero length or not finite
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let length_squared = v.magnitude_squared();
    if length_squared > DEGENERATE_LENGTH_SQUARED && length_squared.is_finite() {
        v / length_squared.sqrt()
    } else {
        fallback
    }
}

/// Normalize `v`, falling back to `(0, 1, 0)`
pub fn normalize_or_default(v: Vec3) -> Vec3 {
    normalize_or(v, default_normal())
}

/// Translation column of an affine matrix
pub fn translation_of(matrix: &Mat4) -> Vec3 {
    Vec3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)])
}

/// Upper-left 3x3 block (rotation * scale) of an affine matrix
pub fn linear_part(matrix: &Mat4) -> Mat3 {
    matrix.fixed_view::<3, 3>(0, 0).into_owned()
}

/// Per-axis scale of an affine matrix (column lengths)
pub fn scale_of(matrix: &Mat4) -> Vec3 {
    let linear = linear_part(matrix);
    Vec3::new(
        linear.column(0).magnitude(),
        linear.column(1).magnitude(),
        linear.column(2).magnitude(),
    )
}

/// Pure rotation of an affine matrix with the scale divided out
///
/// Zero-scale columns fall back to the matching identity column.
pub fn rotation_of(matrix: &Mat4) -> Mat3 {
    let linear = linear_part(matrix);
    let mut rotation = Mat3::identity();
    for axis in 0..3 {
        let column: Vec3 = linear.column(axis).into_owned();
        let fallback: Vec3 = Mat3::identity().column(axis).into_owned();
        rotation.set_column(axis, &normalize_or(column, fallback));
    }
    rotation
}

/// Transform a normal by an affine matrix (inverse-transpose of the linear part)
pub fn transform_normal(matrix: &Mat4, normal: Vec3) -> Vec3 {
    let linear = linear_part(matrix);
    let transformed = linear
        .try_inverse()
        .map_or_else(|| linear * normal, |inverse| inverse.transpose() * normal);
    normalize_or(transformed, normalize_or_default(normal))
}
