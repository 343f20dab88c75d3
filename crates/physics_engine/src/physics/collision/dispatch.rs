//! Shape-pair dispatch
//!
//! A fixed table indexed by `[kind_a][kind_b]` holds each algorithm once, in
//! its canonical order. A pair stored only in the mirrored slot runs with
//! swapped arguments and a negated normal, so every result keeps the
//! B-toward-A convention.

use super::intersection::{self, Contact};
use super::shape::{CollisionShape, ShapeKind};

/// Signature shared by every pair algorithm
pub type PairTest = fn(&CollisionShape, &CollisionShape) -> Option<Contact>;

const KINDS: usize = ShapeKind::ALL.len();

const RAY: usize = ShapeKind::Ray.index();
const SPHERE: usize = ShapeKind::Sphere.index();
const PLANE: usize = ShapeKind::Plane.index();
const AABB: usize = ShapeKind::Aabb.index();
const OOBB: usize = ShapeKind::Oobb.index();

static PAIR_TESTS: [[Option<PairTest>; KINDS]; KINDS] = build_table();

const fn build_table() -> [[Option<PairTest>; KINDS]; KINDS] {
    let mut table: [[Option<PairTest>; KINDS]; KINDS] = [[None; KINDS]; KINDS];

    table[RAY][SPHERE] = Some(intersection::ray_sphere as PairTest);
    table[RAY][PLANE] = Some(intersection::ray_plane as PairTest);
    table[RAY][AABB] = Some(intersection::ray_aabb as PairTest);
    table[RAY][OOBB] = Some(intersection::ray_oobb as PairTest);

    table[SPHERE][SPHERE] = Some(intersection::sphere_sphere as PairTest);
    table[SPHERE][PLANE] = Some(intersection::sphere_plane as PairTest);

    table[AABB][SPHERE] = Some(intersection::aabb_sphere as PairTest);
    table[AABB][PLANE] = Some(intersection::aabb_plane as PairTest);
    table[AABB][AABB] = Some(intersection::aabb_aabb as PairTest);
    table[AABB][OOBB] = Some(intersection::aabb_oobb as PairTest);

    table[OOBB][SPHERE] = Some(intersection::oobb_sphere as PairTest);
    table[OOBB][PLANE] = Some(intersection::oobb_plane as PairTest);
    table[OOBB][OOBB] = Some(intersection::oobb_oobb as PairTest);

    table
}

/// How a pair of kinds resolves against the table
#[derive(Clone, Copy)]
pub enum Dispatch {
    /// Algorithm stored for `(a, b)`
    Direct(PairTest),
    /// Algorithm stored only for `(b, a)`
    Swapped(PairTest),
}

/// Resolve the algorithm for a pair of shape kinds
///
/// Returns `None` for unsupported pairs (Ray-Ray, Plane-Plane).
pub fn lookup(a: ShapeKind, b: ShapeKind) -> Option<Dispatch> {
    if let Some(test) = PAIR_TESTS[a.index()][b.index()] {
        return Some(Dispatch::Direct(test));
    }
    PAIR_TESTS[b.index()][a.index()].map(Dispatch::Swapped)
}

/// Whether any algorithm exists for the pair, in either order
pub fn is_supported(a: ShapeKind, b: ShapeKind) -> bool {
    lookup(a, b).is_some()
}

/// Run the registered test for two world-space shapes
///
/// The returned normal always points from `b` toward `a`.
pub fn test_pair(a: &CollisionShape, b: &CollisionShape) -> Option<Contact> {
    match lookup(a.kind(), b.kind())? {
        Dispatch::Direct(test) => test(a, b),
        Dispatch::Swapped(test) => test(b, a).map(Contact::flipped),
    }
}
