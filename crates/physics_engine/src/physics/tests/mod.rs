//! Scenario tests driving whole physics ticks through the world

mod detection;

use crate::config::PhysicsConfig;
use crate::ecs::components::{ColliderComponent, RigidBodyComponent, TransformComponent};
use crate::ecs::systems::{PhysicsSystem, StepReport, TransformSystem};
use crate::ecs::{Entity, World};
use crate::foundation::math::Vec3;
use crate::physics::collision::CollisionShape;

pub(super) const DT: f32 = 1.0 / 60.0;

pub(super) fn spawn(world: &mut World, position: Vec3, shape: CollisionShape, body: Option<RigidBodyComponent>) -> Entity {
    let entity = world.create_entity();
    world
        .add_component(entity, TransformComponent::from_position(position))
        .unwrap();
    world.add_component(entity, ColliderComponent::new(shape)).unwrap();
    if let Some(body) = body {
        world.add_component(entity, body).unwrap();
    }
    entity
}

pub(super) fn ground(world: &mut World, restitution: f32) -> Entity {
    spawn(
        world,
        Vec3::zeros(),
        CollisionShape::plane(Vec3::y()),
        Some(RigidBodyComponent::fixed().with_restitution(restitution)),
    )
}

pub(super) fn tick(physics: &mut PhysicsSystem, world: &mut World) -> StepReport {
    TransformSystem::update(world);
    physics.step(world, DT).unwrap()
}

pub(super) fn physics() -> PhysicsSystem {
    PhysicsSystem::new(PhysicsConfig::default()).unwrap()
}

pub(super) fn position(world: &World, entity: Entity) -> Vec3 {
    world.get_component::<TransformComponent>(entity).unwrap().position
}

pub(super) fn velocity(world: &World, entity: Entity) -> Vec3 {
    world.get_component::<RigidBodyComponent>(entity).unwrap().velocity
}
