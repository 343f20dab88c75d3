//! Detection scenarios: filtering, overlap publishing and shape pairs

use super::{physics, spawn, tick};
use crate::ecs::components::{ColliderComponent, RigidBodyComponent};
use crate::ecs::World;
use crate::foundation::math::{Quat, Vec3};
use crate::physics::collision::CollisionShape;
use crate::physics::collision_layers::CollisionLayers;
use approx::assert_relative_eq;

#[test]
fn test_overlapping_spheres_report_depth_and_normal() {
    let mut world = World::new();
    let a = spawn(&mut world, Vec3::new(0.3, 0.4, 0.0), CollisionShape::sphere(1.0), None);
    let b = spawn(&mut world, Vec3::new(-0.3, -0.4, 0.0), CollisionShape::sphere(0.5), None);
    let mut physics = physics();

    let report = tick(&mut physics, &mut world);
    assert_eq!(report.manifolds.len(), 1);
    let manifold = &report.manifolds[0];
    assert_eq!((manifold.entity_a, manifold.entity_b), (a, b));
    assert_relative_eq!(manifold.penetration_depth, 0.5, epsilon = 1e-5);
    assert_relative_eq!(manifold.normal, Vec3::new(0.6, 0.8, 0.0), epsilon = 1e-5);
    assert_relative_eq!(manifold.normal.magnitude(), 1.0, epsilon = 1e-5);
}

#[test]
fn test_masked_out_pairs_never_reach_geometry() {
    let mut world = World::new();
    let mut entities = Vec::new();
    for i in 0..4 {
        // Everything overlaps everything
        entities.push(spawn(&mut world, Vec3::new(i as f32 * 0.1, 0.0, 0.0), CollisionShape::sphere(1.0), None));
    }
    for &entity in &entities[..2] {
        let collider = world.get_component_mut::<ColliderComponent>(entity).unwrap();
        collider.layer = CollisionLayers::DEBRIS;
        collider.mask = CollisionLayers::ENVIRONMENT;
    }
    for &entity in &entities[2..] {
        let collider = world.get_component_mut::<ColliderComponent>(entity).unwrap();
        collider.layer = CollisionLayers::PICKUP;
        collider.mask = CollisionLayers::PICKUP;
    }
    let mut physics = physics();

    let report = tick(&mut physics, &mut world);
    // Debris pair and every debris/pickup pair are blind; only the pickup pair is tested
    assert_eq!(report.stats.pairs_considered, 6);
    assert_eq!(report.stats.pairs_filtered, 5);
    assert_eq!(report.stats.geometry_tests, 1);
    assert_eq!(report.manifolds.len(), 1);
    assert_eq!(
        (report.manifolds[0].entity_a, report.manifolds[0].entity_b),
        (entities[2], entities[3])
    );
    let debris = world.get_component::<ColliderComponent>(entities[0]).unwrap();
    assert!(debris.overlapping.is_empty());
}

#[test]
fn test_overlap_sets_rebuilt_every_tick() {
    let mut world = World::new();
    let a = spawn(&mut world, Vec3::zeros(), CollisionShape::sphere(1.0), None);
    let b = spawn(&mut world, Vec3::new(1.5, 0.0, 0.0), CollisionShape::sphere(1.0), None);
    let mut physics = physics();

    tick(&mut physics, &mut world);
    let collider = world.get_component::<ColliderComponent>(a).unwrap();
    assert!(collider.is_colliding_with(b));
    assert!(collider.just_collided_with(b));

    world
        .get_component_mut::<crate::ecs::components::TransformComponent>(b)
        .unwrap()
        .set_position(Vec3::new(5.0, 0.0, 0.0));
    tick(&mut physics, &mut world);
    let collider = world.get_component::<ColliderComponent>(a).unwrap();
    assert!(!collider.is_colliding());
    assert!(collider.just_stopped_colliding_with(b));

    // A destroyed partner leaves no stale entry behind
    world
        .get_component_mut::<crate::ecs::components::TransformComponent>(b)
        .unwrap()
        .set_position(Vec3::new(1.0, 0.0, 0.0));
    tick(&mut physics, &mut world);
    assert!(world.get_component::<ColliderComponent>(a).unwrap().is_colliding_with(b));
    world.destroy_entity(b);
    tick(&mut physics, &mut world);
    assert!(!world.get_component::<ColliderComponent>(a).unwrap().is_colliding());
}

#[test]
fn test_identical_boxes_offset_on_one_axis() {
    let mut world = World::new();
    let half = Vec3::new(1.0, 1.0, 1.0);
    spawn(&mut world, Vec3::new(0.0, 1.75, 0.0), CollisionShape::oobb(half), None);
    spawn(&mut world, Vec3::zeros(), CollisionShape::oobb(half), None);
    let mut physics = physics();

    let report = tick(&mut physics, &mut world);
    assert_eq!(report.manifolds.len(), 1);
    assert_relative_eq!(report.manifolds[0].normal, Vec3::y(), epsilon = 1e-5);
    assert_relative_eq!(report.manifolds[0].penetration_depth, 0.25, epsilon = 1e-5);
}

#[test]
fn test_rotated_box_uses_world_orientation() {
    let mut world = World::new();
    let tilted = world.create_entity();
    world
        .add_component(
            tilted,
            crate::ecs::components::TransformComponent::from_position(Vec3::new(0.0, 1.3, 0.0))
                .with_rotation(Quat::from_axis_angle(&Vec3::z_axis(), std::f32::consts::FRAC_PI_4)),
        )
        .unwrap();
    world
        .add_component(tilted, ColliderComponent::new(CollisionShape::oobb(Vec3::new(1.0, 1.0, 1.0))))
        .unwrap();
    spawn(&mut world, Vec3::zeros(), CollisionShape::plane(Vec3::y()), None);
    let mut physics = physics();

    // Corner reaches sqrt(2) below the center
    let report = tick(&mut physics, &mut world);
    assert_eq!(report.manifolds.len(), 1);
    assert_relative_eq!(
        report.manifolds[0].penetration_depth,
        2.0_f32.sqrt() - 1.3,
        epsilon = 1e-4
    );
}

#[test]
fn test_ray_probe_sees_without_pushing() {
    let mut world = World::new();
    let probe = spawn(
        &mut world,
        Vec3::new(0.0, 3.0, 0.0),
        CollisionShape::ray(-Vec3::y(), 5.0),
        Some(RigidBodyComponent::kinematic()),
    );
    let ball = spawn(
        &mut world,
        Vec3::zeros(),
        CollisionShape::sphere(1.0),
        Some(RigidBodyComponent::dynamic(1.0).unwrap()),
    );
    let config = crate::config::PhysicsConfig::default().with_gravity(0.0);
    let mut physics = crate::ecs::systems::PhysicsSystem::new(config).unwrap();

    let report = tick(&mut physics, &mut world);
    assert!(report.manifolds[0].is_probe());
    assert!(world.get_component::<ColliderComponent>(probe).unwrap().is_colliding_with(ball));
    assert_relative_eq!(super::position(&world, ball), Vec3::zeros());
    assert_relative_eq!(super::velocity(&world, ball), Vec3::zeros());
}

#[test]
fn test_ray_cast_query() {
    let mut world = World::new();
    let near = spawn(&mut world, Vec3::new(0.0, 0.0, -3.0), CollisionShape::aabb(Vec3::new(0.5, 0.5, 0.5)), None);
    let far = spawn(&mut world, Vec3::new(0.0, 0.0, -8.0), CollisionShape::sphere(1.0), None);
    let mut physics = physics();
    tick(&mut physics, &mut world);

    let ray = crate::physics::collision::Ray::with_length(Vec3::zeros(), -Vec3::z(), 20.0);
    let hits = physics.ray_cast(&world, &ray, CollisionLayers::all()).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].entity, near);
    assert_eq!(hits[1].entity, far);
    assert_relative_eq!(hits[0].distance, 2.5, epsilon = 1e-5);
    assert_relative_eq!(hits[1].point, Vec3::new(0.0, 0.0, -7.0), epsilon = 1e-4);

    let short = crate::physics::collision::Ray::with_length(Vec3::zeros(), -Vec3::z(), 4.0);
    assert_eq!(physics.ray_cast(&world, &short, CollisionLayers::all()).unwrap().len(), 1);
}
