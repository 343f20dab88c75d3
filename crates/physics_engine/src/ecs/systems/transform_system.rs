//! Transform pass
//!
//! Rebuilds the cached world matrix of every dirty transform. Entities have
//! no parents here, so the world matrix is the local TRS.

use crate::ecs::components::TransformComponent;
use crate::ecs::World;

/// Refreshes world matrices before physics reads them
pub struct TransformSystem;

impl TransformSystem {
    /// Update every dirty transform; returns how many were refreshed
    pub fn update(world: &mut World) -> usize {
        let mut refreshed = 0;
        for (_, transform) in world.query_mut::<TransformComponent>() {
            if transform.dirty {
                transform.update_world_matrix();
                refreshed += 1;
            }
        }
        refreshed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    #[test]
    fn test_only_dirty_transforms_refresh() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        world.add_component(a, TransformComponent::from_position(Vec3::new(1.0, 0.0, 0.0))).unwrap();
        world.add_component(b, TransformComponent::from_position(Vec3::new(0.0, 2.0, 0.0))).unwrap();

        assert_eq!(TransformSystem::update(&mut world), 2);
        assert_eq!(TransformSystem::update(&mut world), 0);

        world.get_component_mut::<TransformComponent>(b).unwrap().translate(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(TransformSystem::update(&mut world), 1);
        assert_relative_eq!(
            world.get_component::<TransformComponent>(b).unwrap().world_position(),
            Vec3::new(0.0, 3.0, 0.0)
        );
    }
}
