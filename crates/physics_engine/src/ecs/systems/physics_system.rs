//! ECS physics system
//!
//! Runs one fixed-order simulation tick over the world: mass refresh,
//! force accumulation, detection, impulses, positional correction,
//! integration, write-back and overlap publishing.

use crate::config::PhysicsConfig;
use crate::debug::collision_debug::CollisionDebugVisualizer;
use crate::ecs::components::{ColliderComponent, RigidBodyComponent};
use crate::ecs::World;
use crate::physics::collision::Ray;
use crate::physics::collision_layers::CollisionLayers;
use crate::physics::manifold::OverlapManifold;
use crate::physics::narrow_phase::{self, NarrowPhaseStats, RayHit};
use crate::physics::solver::ContactSolver;
use crate::physics::PhysicsError;
use log::debug;

/// What one tick produced, for debug drawing and gameplay queries
#[derive(Debug, Default)]
pub struct StepReport {
    /// Manifolds detected this tick (probes included)
    pub manifolds: Vec<OverlapManifold>,
    /// Narrow-phase counters
    pub stats: NarrowPhaseStats,
}

/// Physics system driving collision detection and response
pub struct PhysicsSystem {
    config: PhysicsConfig,
    debug_visualizer: Option<CollisionDebugVisualizer>,
}

impl PhysicsSystem {
    /// Create a physics system with a validated configuration
    pub fn new(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self {
            config,
            debug_visualizer: None,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Enable debug visualization
    pub fn enable_debug(&mut self, enabled: bool) {
        if enabled && self.debug_visualizer.is_none() {
            self.debug_visualizer = Some(CollisionDebugVisualizer::new());
        }
        if let Some(viz) = &mut self.debug_visualizer {
            viz.set_enabled(enabled);
        }
    }

    /// Debug visualizer, when enabled at least once
    pub fn debug_visualizer(&self) -> Option<&CollisionDebugVisualizer> {
        self.debug_visualizer.as_ref()
    }

    /// Recompute inverse mass and inertia for bodies whose mass or shape changed
    pub fn refresh_mass_properties(world: &mut World) -> Result<usize, PhysicsError> {
        let mut refreshed = 0;
        for entity in world.entities_with::<ColliderComponent, RigidBodyComponent>() {
            let collider = world.component::<ColliderComponent>(entity)?;
            let body_dirty = world.component::<RigidBodyComponent>(entity)?.dirty;
            if !body_dirty && !collider.dirty {
                continue;
            }
            let shape = collider.shape().clone();

            world.component_mut::<RigidBodyComponent>(entity)?.update_mass_properties(&shape);
            world.component_mut::<ColliderComponent>(entity)?.dirty = false;
            refreshed += 1;
        }
        Ok(refreshed)
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// World matrices must be current (run the transform pass first).
    /// Transforms moved by this step are left dirty for the next pass.
    pub fn step(&mut self, world: &mut World, dt: f32) -> Result<StepReport, PhysicsError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(PhysicsError::InvalidTimeStep(dt));
        }

        Self::refresh_mass_properties(world)?;

        let mut solver = ContactSolver::gather(world, self.config.gravity)?;
        let detection = narrow_phase::detect(world)?;

        solver.solve_velocities(&detection.manifolds, &self.config);
        solver.correct_positions(&detection.manifolds);
        solver.integrate(dt, self.config.linear_damping);
        solver.scatter(world)?;

        narrow_phase::publish_overlaps(world, detection.overlaps);

        debug!(
            "Physics step: {} pairs, {} filtered, {} tests, {} manifolds",
            detection.stats.pairs_considered,
            detection.stats.pairs_filtered,
            detection.stats.geometry_tests,
            detection.stats.manifolds
        );

        let report = StepReport {
            manifolds: detection.manifolds,
            stats: detection.stats,
        };

        if let Some(viz) = &mut self.debug_visualizer {
            if viz.is_enabled() {
                viz.update(dt);
                viz.draw_world(world, &report.manifolds);
            }
        }

        Ok(report)
    }

    /// Cast a world-space ray against colliders on layers in `mask`, nearest first
    pub fn ray_cast(&self, world: &World, ray: &Ray, mask: CollisionLayers) -> Result<Vec<RayHit>, PhysicsError> {
        Ok(narrow_phase::ray_cast(world, ray, mask)?)
    }
}
