//! All-pairs narrow phase
//!
//! Every collider pair is visited once in `i < j` order over the world's
//! stable enumeration. Pairs where neither side perceives the other are
//! dropped before any geometry is touched.

use crate::ecs::components::{ColliderComponent, TransformComponent};
use crate::ecs::{EcsError, Entity, World};
use crate::foundation::math::Vec3;
use crate::physics::collision::{dispatch, CollisionShape, Ray, ShapeKind};
use crate::physics::collision_layers::CollisionLayers;
use crate::physics::manifold::OverlapManifold;
use log::{trace, warn};
use std::collections::{HashMap, HashSet};

/// Counters from one detection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NarrowPhaseStats {
    /// Unordered pairs visited
    pub pairs_considered: usize,
    /// Pairs skipped because neither side perceives the other
    pub pairs_filtered: usize,
    /// Pair algorithms actually run
    pub geometry_tests: usize,
    /// Manifolds produced (probes included)
    pub manifolds: usize,
}

/// Everything one detection pass produces
#[derive(Debug, Default)]
pub struct Detection {
    /// Overlapping pairs in visit order
    pub manifolds: Vec<OverlapManifold>,
    /// Rebuilt overlap set for every collider, empty sets included
    pub overlaps: HashMap<Entity, HashSet<Entity>>,
    /// Pass counters
    pub stats: NarrowPhaseStats,
}

/// Result of a ray cast against the world's colliders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The entity that was hit
    pub entity: Entity,
    /// The distance from the ray origin to the hit point
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec3,
    /// Normal pointing from the hit collider back toward the ray origin
    pub normal: Vec3,
}

/// Collider snapshot in world space
struct WorldCollider {
    entity: Entity,
    shape: CollisionShape,
    layer: CollisionLayers,
    mask: CollisionLayers,
}

fn gather(world: &World) -> Result<Vec<WorldCollider>, EcsError> {
    world
        .entities_with::<TransformComponent, ColliderComponent>()
        .into_iter()
        .map(|entity| -> Result<WorldCollider, EcsError> {
            let transform = world.component::<TransformComponent>(entity)?;
            let collider = world.component::<ColliderComponent>(entity)?;
            if transform.dirty {
                warn!("Transform of {} changed since the last transform pass; using stale world matrix", entity);
            }
            Ok(WorldCollider {
                entity,
                shape: collider.shape().to_world_space(&transform.world_matrix),
                layer: collider.layer,
                mask: collider.mask,
            })
        })
        .collect()
}

/// Run the narrow phase over every collider in `world`
///
/// The world is only read; overlap sets are published separately by
/// [`publish_overlaps`] once the tick has finished.
pub fn detect(world: &World) -> Result<Detection, EcsError> {
    let colliders = gather(world)?;
    let mut detection = Detection {
        overlaps: colliders.iter().map(|c| (c.entity, HashSet::new())).collect(),
        ..Default::default()
    };

    for (i, a) in colliders.iter().enumerate() {
        for b in &colliders[i + 1..] {
            detection.stats.pairs_considered += 1;

            let (a_sees_b, b_sees_a) = CollisionLayers::visibility(a.layer, a.mask, b.layer, b.mask);
            if !a_sees_b && !b_sees_a {
                detection.stats.pairs_filtered += 1;
                continue;
            }

            let kinds = (a.shape.kind(), b.shape.kind());
            if !dispatch::is_supported(kinds.0, kinds.1) {
                continue;
            }

            detection.stats.geometry_tests += 1;
            let Some(contact) = dispatch::test_pair(&a.shape, &b.shape) else {
                continue;
            };
            let probe = kinds.0 == ShapeKind::Ray || kinds.1 == ShapeKind::Ray;
            if !probe && contact.depth <= 0.0 {
                continue;
            }

            trace!(
                "{:?} {} vs {:?} {}: depth {:.4}, normal {:?}",
                kinds.0, a.entity, kinds.1, b.entity, contact.depth, contact.normal
            );

            if a_sees_b {
                detection.overlaps.entry(a.entity).or_default().insert(b.entity);
            }
            if b_sees_a {
                detection.overlaps.entry(b.entity).or_default().insert(a.entity);
            }
            detection.stats.manifolds += 1;
            detection.manifolds.push(OverlapManifold::from_contact(
                (a.entity, b.entity),
                (a_sees_b, b_sees_a),
                kinds,
                contact,
            ));
        }
    }

    Ok(detection)
}

/// Replace every collider's overlap set with the freshly built one
///
/// Colliders missing from `overlaps` (added after detection) are left alone.
pub fn publish_overlaps(world: &mut World, overlaps: HashMap<Entity, HashSet<Entity>>) {
    for (entity, current) in overlaps {
        if let Some(collider) = world.get_component_mut::<ColliderComponent>(entity) {
            collider.publish_overlaps(current);
        }
    }
}

/// Cast a world-space ray against every collider on a layer in `mask`
///
/// Hits are sorted nearest first. Ray colliders are never hit.
pub fn ray_cast(world: &World, ray: &Ray, mask: CollisionLayers) -> Result<Vec<RayHit>, EcsError> {
    let probe = CollisionShape::Ray(*ray);
    let mut hits: Vec<RayHit> = gather(world)?
        .into_iter()
        .filter(|collider| CollisionLayers::perceives(mask, collider.layer))
        .filter_map(|collider| {
            let contact = dispatch::test_pair(&probe, &collider.shape)?;
            Some(RayHit {
                entity: collider.entity,
                distance: (contact.point - ray.origin).dot(&ray.direction).max(0.0),
                point: contact.point,
                normal: contact.normal,
            })
        })
        .collect();

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::systems::TransformSystem;
    use approx::assert_relative_eq;

    fn spawn(world: &mut World, position: Vec3, shape: CollisionShape) -> Entity {
        let entity = world.create_entity();
        world
            .add_component(entity, TransformComponent::from_position(position))
            .unwrap();
        world.add_component(entity, ColliderComponent::new(shape)).unwrap();
        entity
    }

    fn set_layers(world: &mut World, entity: Entity, layer: CollisionLayers, mask: CollisionLayers) {
        let collider = world.get_component_mut::<ColliderComponent>(entity).unwrap();
        collider.layer = layer;
        collider.mask = mask;
    }

    #[test]
    fn test_each_pair_visited_once() {
        let mut world = World::new();
        for i in 0..5 {
            spawn(&mut world, Vec3::new(i as f32 * 10.0, 0.0, 0.0), CollisionShape::sphere(1.0));
        }
        TransformSystem::update(&mut world);

        let detection = detect(&world).unwrap();
        assert_eq!(detection.stats.pairs_considered, 10);
        assert_eq!(detection.stats.geometry_tests, 10);
        assert!(detection.manifolds.is_empty());
        assert_eq!(detection.overlaps.len(), 5);
    }

    #[test]
    fn test_sphere_pair_manifold() {
        let mut world = World::new();
        let a = spawn(&mut world, Vec3::new(0.0, 1.5, 0.0), CollisionShape::sphere(1.0));
        let b = spawn(&mut world, Vec3::zeros(), CollisionShape::sphere(1.0));
        TransformSystem::update(&mut world);

        let detection = detect(&world).unwrap();
        assert_eq!(detection.manifolds.len(), 1);
        let manifold = &detection.manifolds[0];
        assert_eq!((manifold.entity_a, manifold.entity_b), (a, b));
        assert_relative_eq!(manifold.penetration_depth, 0.5, epsilon = 1e-5);
        assert_relative_eq!(manifold.normal, Vec3::y(), epsilon = 1e-5);
        assert!(detection.overlaps[&a].contains(&b));
        assert!(detection.overlaps[&b].contains(&a));
    }

    #[test]
    fn test_blind_pairs_skip_geometry() {
        let mut world = World::new();
        let a = spawn(&mut world, Vec3::zeros(), CollisionShape::sphere(1.0));
        let b = spawn(&mut world, Vec3::new(0.5, 0.0, 0.0), CollisionShape::sphere(1.0));
        let c = spawn(&mut world, Vec3::new(0.0, 0.5, 0.0), CollisionShape::sphere(1.0));
        // a and b overlap c and each other, but nobody perceives anybody
        set_layers(&mut world, a, CollisionLayers::PLAYER, CollisionLayers::ENEMY);
        set_layers(&mut world, b, CollisionLayers::DEBRIS, CollisionLayers::VEHICLE);
        set_layers(&mut world, c, CollisionLayers::PICKUP, CollisionLayers::empty());
        TransformSystem::update(&mut world);

        let detection = detect(&world).unwrap();
        assert_eq!(detection.stats.pairs_considered, 3);
        assert_eq!(detection.stats.pairs_filtered, 3);
        assert_eq!(detection.stats.geometry_tests, 0);
        assert!(detection.manifolds.is_empty());
    }

    #[test]
    fn test_one_way_visibility_populates_one_set() {
        let mut world = World::new();
        let watcher = spawn(&mut world, Vec3::zeros(), CollisionShape::sphere(1.0));
        let target = spawn(&mut world, Vec3::new(1.0, 0.0, 0.0), CollisionShape::sphere(1.0));
        set_layers(&mut world, watcher, CollisionLayers::TRIGGER, CollisionLayers::PLAYER);
        set_layers(&mut world, target, CollisionLayers::PLAYER, CollisionLayers::ENVIRONMENT);
        TransformSystem::update(&mut world);

        let detection = detect(&world).unwrap();
        let manifold = &detection.manifolds[0];
        assert!(manifold.a_sees_b);
        assert!(!manifold.b_sees_a);
        assert!(detection.overlaps[&watcher].contains(&target));
        assert!(detection.overlaps[&target].is_empty());
    }

    #[test]
    fn test_ray_probe_manifold() {
        let mut world = World::new();
        let probe = spawn(&mut world, Vec3::new(0.0, 5.0, 0.0), CollisionShape::ray(-Vec3::y(), 10.0));
        let ground = spawn(&mut world, Vec3::zeros(), CollisionShape::plane(Vec3::y()));
        TransformSystem::update(&mut world);

        let detection = detect(&world).unwrap();
        assert_eq!(detection.manifolds.len(), 1);
        let manifold = &detection.manifolds[0];
        assert!(manifold.is_probe());
        assert_relative_eq!(manifold.penetration_depth, 5.0, epsilon = 1e-5);
        assert!(detection.overlaps[&probe].contains(&ground));
    }

    #[test]
    fn test_ray_cast_nearest_first() {
        let mut world = World::new();
        let far = spawn(&mut world, Vec3::new(10.0, 0.0, 0.0), CollisionShape::sphere(1.0));
        let near = spawn(&mut world, Vec3::new(4.0, 0.0, 0.0), CollisionShape::oobb(Vec3::new(1.0, 1.0, 1.0)));
        let hidden = spawn(&mut world, Vec3::new(7.0, 0.0, 0.0), CollisionShape::sphere(1.0));
        set_layers(&mut world, hidden, CollisionLayers::PICKUP, CollisionLayers::all());
        TransformSystem::update(&mut world);

        let ray = Ray::new(Vec3::zeros(), Vec3::x());
        let hits = ray_cast(&world, &ray, CollisionLayers::all() - CollisionLayers::PICKUP).unwrap();
        assert_eq!(hits.iter().map(|h| h.entity).collect::<Vec<_>>(), vec![near, far]);
        assert_relative_eq!(hits[0].distance, 3.0, epsilon = 1e-5);
        assert_relative_eq!(hits[1].distance, 9.0, epsilon = 1e-5);
    }
}
