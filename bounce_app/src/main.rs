//! Bounce demo application
//!
//! Drops a ball onto a static ground plane next to a kinematic crate and a
//! downward ray probe, then logs contacts and the ball's bounce heights.
//!
//! Usage: `bounce_demo [physics.toml|physics.ron]`

use physics_engine::foundation::logging;
use physics_engine::prelude::*;

/// Fixed simulation rate
const DT: f32 = 1.0 / 60.0;

/// Simulated duration in ticks
const TICKS: usize = 240;

#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("physics failure: {0}")]
    Physics(#[from] PhysicsError),

    #[error("world access failed: {0}")]
    Ecs(#[from] EcsError),
}

struct Scene {
    ball: Entity,
    walker: Entity,
    probe: Entity,
}

fn spawn(
    world: &mut World,
    transform: TransformComponent,
    collider: ColliderComponent,
    body: RigidBodyComponent,
) -> Result<Entity, EcsError> {
    let entity = world.create_entity();
    world.add_component(entity, transform)?;
    world.add_component(entity, collider)?;
    world.add_component(entity, body)?;
    Ok(entity)
}

fn build_scene(world: &mut World) -> Result<Scene, AppError> {
    spawn(
        world,
        TransformComponent::identity(),
        ColliderComponent::new(CollisionShape::plane(Vec3::y()))
            .with_layers(CollisionLayers::ENVIRONMENT, CollisionLayers::all()),
        RigidBodyComponent::fixed().with_restitution(1.0).with_friction(0.8),
    )?;

    let ball = spawn(
        world,
        TransformComponent::from_position(Vec3::new(0.0, 5.0, 0.0)),
        ColliderComponent::new(CollisionShape::sphere(1.0)).with_debug_draw(true),
        RigidBodyComponent::dynamic(1.0)?
            .with_restitution(0.5)
            .with_velocity(Vec3::new(0.5, 0.0, 0.0)),
    )?;

    let walker = spawn(
        world,
        TransformComponent::from_position(Vec3::new(4.0, 2.0, 0.0)),
        ColliderComponent::new(CollisionShape::aabb(Vec3::new(0.5, 1.0, 0.5)))
            .with_layers(CollisionLayers::PLAYER, CollisionLayers::ENVIRONMENT),
        RigidBodyComponent::kinematic(),
    )?;

    // Probe only perceives the player and is invisible to everything else
    let probe = spawn(
        world,
        TransformComponent::from_position(Vec3::new(4.0, 6.0, 0.0)),
        ColliderComponent::new(CollisionShape::ray(-Vec3::y(), 8.0))
            .with_layers(CollisionLayers::TRIGGER, CollisionLayers::PLAYER),
        RigidBodyComponent::fixed(),
    )?;

    Ok(Scene { ball, walker, probe })
}

fn run(config_path: Option<&str>) -> Result<(), AppError> {
    let config = match config_path {
        Some(path) => {
            log::info!("Loading physics configuration from {path}");
            PhysicsConfig::load_from_file(path)?
        }
        None => PhysicsConfig::default(),
    };

    let mut world = World::new();
    let scene = build_scene(&mut world)?;
    let mut physics = PhysicsSystem::new(config)?;
    physics.enable_debug(true);

    let mut previous_vy = 0.0_f32;
    for frame in 0..TICKS {
        TransformSystem::update(&mut world);
        let report = physics.step(&mut world, DT)?;

        let ball_body = world.component::<RigidBodyComponent>(scene.ball)?;
        let ball_y = world.component::<TransformComponent>(scene.ball)?.position.y;
        if previous_vy > 0.0 && ball_body.velocity.y <= 0.0 {
            log::info!("Frame {frame}: ball apex at y = {ball_y:.3}");
        }
        previous_vy = ball_body.velocity.y;

        let ball_collider = world.component::<ColliderComponent>(scene.ball)?;
        for other in &ball_collider.entered {
            log::info!("Frame {frame}: ball touched {other} ({} manifolds this tick)", report.manifolds.len());
        }

        let probe_collider = world.component::<ColliderComponent>(scene.probe)?;
        if probe_collider.just_collided_with(scene.walker) {
            log::info!("Frame {frame}: probe sees the walker");
        }

        if world.component::<RigidBodyComponent>(scene.walker)?.grounded && frame % 60 == 0 {
            log::debug!("Frame {frame}: walker grounded");
        }

        if let Some(viz) = physics.debug_visualizer() {
            log::trace!("Frame {frame}: {} debug shapes", viz.get_shapes().len());
        }
    }

    let ball = world.component::<TransformComponent>(scene.ball)?;
    let walker = world.component::<TransformComponent>(scene.walker)?;
    log::info!("Final ball position: {:?}", ball.position);
    log::info!("Final walker position: {:?}", walker.position);

    let down = Ray::new(Vec3::new(0.0, 20.0, 0.0), -Vec3::y());
    for hit in physics.ray_cast(&world, &down, CollisionLayers::all())? {
        log::info!("Ray hit {} at distance {:.3}", hit.entity, hit.distance);
    }

    Ok(())
}

fn main() {
    logging::init();
    log::info!("Starting bounce demo");

    let config_path = std::env::args().nth(1);
    match run(config_path.as_deref()) {
        Ok(()) => log::info!("Bounce demo finished successfully"),
        Err(e) => {
            log::error!("Bounce demo failed: {e}");
            std::process::exit(1);
        }
    }
}
