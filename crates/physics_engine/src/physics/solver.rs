//! Sequential-impulse contact solver
//!
//! Bodies are copied out of the world into a flat array, solved there, and
//! written back once. Manifolds are never refreshed while solving.

use crate::config::PhysicsConfig;
use crate::ecs::components::{BodyKind, ColliderComponent, RigidBodyComponent, TransformComponent};
use crate::ecs::{EcsError, Entity, World};
use crate::foundation::math::Vec3;
use crate::physics::manifold::OverlapManifold;
use log::trace;
use std::collections::HashMap;

/// Inverse-mass sums at or below this are treated as immovable pairs
const INV_MASS_EPSILON: f32 = 1e-8;

/// Solver-side copy of one rigid body
#[derive(Debug, Clone)]
pub struct SolverBody {
    /// Owning entity
    pub entity: Entity,
    /// Simulation role
    pub kind: BodyKind,
    /// Inverse mass (refreshed before gathering)
    pub inv_mass: f32,
    /// Linear velocity
    pub velocity: Vec3,
    /// Force for this tick
    pub force: Vec3,
    /// Coefficient of restitution
    pub restitution: f32,
    /// Friction coefficient
    pub friction: f32,
    /// Accumulated translation to apply to the transform
    pub displacement: Vec3,
    /// Resolved against static geometry this tick
    pub grounded: bool,
}

/// Flat body set for one tick
#[derive(Debug, Default)]
pub struct ContactSolver {
    bodies: Vec<SolverBody>,
    index: HashMap<Entity, usize>,
}

impl ContactSolver {
    /// Copy every body carrying a transform, collider and rigid body
    ///
    /// Grounded flags start cleared and forces are overwritten with gravity.
    pub fn gather(world: &World, gravity: f32) -> Result<Self, EcsError> {
        let mut solver = Self::default();
        for entity in world.entities_with::<ColliderComponent, RigidBodyComponent>() {
            let Some(transform) = world.get_component::<TransformComponent>(entity) else {
                continue;
            };
            let body = world.component::<RigidBodyComponent>(entity)?;

            let force = if body.is_static() {
                Vec3::zeros()
            } else {
                body.gravity_at(transform.world_position()) * body.mass() * gravity
            };

            solver.index.insert(entity, solver.bodies.len());
            solver.bodies.push(SolverBody {
                entity,
                kind: body.kind(),
                inv_mass: body.inv_mass(),
                velocity: body.velocity,
                force,
                restitution: body.restitution(),
                friction: body.friction(),
                displacement: Vec3::zeros(),
                grounded: false,
            });
        }
        Ok(solver)
    }

    /// Bodies in gather order
    pub fn bodies(&self) -> &[SolverBody] {
        &self.bodies
    }

    /// Solver copy of `entity`, if it was gathered
    pub fn body(&self, entity: Entity) -> Option<&SolverBody> {
        self.index.get(&entity).map(|&i| &self.bodies[i])
    }

    /// Mutable references to both sides of a manifold
    ///
    /// `None` when either entity was not gathered (destroyed or lacking a body).
    fn pair_mut(&mut self, manifold: &OverlapManifold) -> Option<(&mut SolverBody, &mut SolverBody)> {
        let idx_a = *self.index.get(&manifold.entity_a)?;
        let idx_b = *self.index.get(&manifold.entity_b)?;
        if idx_a == idx_b {
            return None;
        }
        if idx_a < idx_b {
            let (head, tail) = self.bodies.split_at_mut(idx_b);
            Some((&mut head[idx_a], &mut tail[0]))
        } else {
            let (head, tail) = self.bodies.split_at_mut(idx_a);
            Some((&mut tail[0], &mut head[idx_b]))
        }
    }

    /// Run the fixed number of impulse passes over the non-probe manifolds
    pub fn solve_velocities(&mut self, manifolds: &[OverlapManifold], config: &PhysicsConfig) {
        for _ in 0..config.solver_iterations {
            for manifold in manifolds.iter().filter(|m| !m.is_probe()) {
                self.apply_impulse(manifold, config.friction_epsilon);
            }
        }
    }

    fn apply_impulse(&mut self, manifold: &OverlapManifold, friction_epsilon: f32) {
        let Some((a, b)) = self.pair_mut(manifold) else {
            return;
        };
        if a.kind == BodyKind::Kinematic || b.kind == BodyKind::Kinematic {
            return;
        }
        let inv_mass_sum = a.inv_mass + b.inv_mass;
        if inv_mass_sum <= INV_MASS_EPSILON {
            return;
        }

        let normal = manifold.normal;
        let relative = a.velocity - b.velocity;
        let velocity_along_normal = relative.dot(&normal);
        if velocity_along_normal > 0.0 {
            return;
        }

        let restitution = a.restitution.min(b.restitution);
        let j = -(1.0 + restitution) * velocity_along_normal / inv_mass_sum;
        let impulse = normal * j;
        if manifold.a_sees_b {
            a.velocity += impulse * a.inv_mass;
        }
        if manifold.b_sees_a {
            b.velocity -= impulse * b.inv_mass;
        }

        // Coulomb friction along the remaining tangential velocity
        let relative = a.velocity - b.velocity;
        let tangential = relative - normal * relative.dot(&normal);
        let tangential_speed = tangential.magnitude();
        if tangential_speed <= friction_epsilon {
            return;
        }
        let tangent = tangential / tangential_speed;
        let mu = (a.friction * b.friction).sqrt();
        let limit = j * mu;
        let jt = (-relative.dot(&tangent) / inv_mass_sum).max(-limit).min(limit);
        let friction_impulse = tangent * jt;

        if manifold.a_sees_b && a.kind != BodyKind::Static {
            a.velocity += friction_impulse * a.inv_mass;
        }
        if manifold.b_sees_a && b.kind != BodyKind::Static {
            b.velocity -= friction_impulse * b.inv_mass;
        }
    }

    /// Push every penetrating pair apart once
    pub fn correct_positions(&mut self, manifolds: &[OverlapManifold]) {
        for manifold in manifolds.iter().filter(|m| !m.is_probe()) {
            self.correct_pair(manifold);
        }
    }

    fn correct_pair(&mut self, manifold: &OverlapManifold) {
        let (a_sees_b, b_sees_a) = (manifold.a_sees_b, manifold.b_sees_a);
        let push = manifold.normal * manifold.penetration_depth;
        let Some((a, b)) = self.pair_mut(manifold) else {
            return;
        };

        match (a.kind, b.kind) {
            (BodyKind::Static, BodyKind::Static) | (BodyKind::Kinematic, BodyKind::Kinematic) => {}
            (BodyKind::Static, _) => {
                if b_sees_a {
                    b.displacement -= push;
                    b.grounded |= b.kind == BodyKind::Kinematic;
                }
            }
            (_, BodyKind::Static) => {
                if a_sees_b {
                    a.displacement += push;
                    a.grounded |= a.kind == BodyKind::Kinematic;
                }
            }
            (BodyKind::Kinematic, BodyKind::Dynamic) => {
                if b_sees_a {
                    b.displacement -= push;
                }
            }
            (BodyKind::Dynamic, BodyKind::Kinematic) => {
                if a_sees_b {
                    a.displacement += push;
                }
            }
            (BodyKind::Dynamic, BodyKind::Dynamic) => {
                let inv_mass_sum = a.inv_mass + b.inv_mass;
                if inv_mass_sum <= INV_MASS_EPSILON {
                    return;
                }
                if a_sees_b {
                    a.displacement += push * (a.inv_mass / inv_mass_sum);
                }
                if b_sees_a {
                    b.displacement -= push * (b.inv_mass / inv_mass_sum);
                }
            }
        }
    }

    /// Semi-implicit Euler with per-tick damping; static bodies are skipped
    pub fn integrate(&mut self, dt: f32, damping: f32) {
        for body in self.bodies.iter_mut().filter(|b| b.kind != BodyKind::Static) {
            body.velocity += body.force * body.inv_mass * dt;
            body.velocity *= damping;
            body.displacement += body.velocity * dt;
        }
    }

    /// Write velocities, forces, grounded flags and translations back
    pub fn scatter(self, world: &mut World) -> Result<(), EcsError> {
        for solved in self.bodies {
            let body = world.component_mut::<RigidBodyComponent>(solved.entity)?;
            body.velocity = solved.velocity;
            body.force = solved.force;
            body.grounded = solved.grounded;

            if solved.displacement != Vec3::zeros() {
                trace!("{} moved by {:?}", solved.entity, solved.displacement);
                world
                    .component_mut::<TransformComponent>(solved.entity)?
                    .translate(solved.displacement);
            }
        }
        Ok(())
    }
}
