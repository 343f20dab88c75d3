//! Physics error types

use crate::config::ConfigError;
use crate::ecs::EcsError;

/// Errors surfaced by the physics step and body construction
#[derive(thiserror::Error, Debug)]
pub enum PhysicsError {
    /// Mass must be finite and strictly positive
    #[error("invalid mass {0}: must be finite and greater than zero")]
    InvalidMass(f32),

    /// Time step must be finite and non-negative
    #[error("invalid time step {0}: must be finite and non-negative")]
    InvalidTimeStep(f32),

    /// The physics configuration failed validation
    #[error("invalid physics configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// A component lookup violated the registry contract
    #[error(transparent)]
    Ecs(#[from] EcsError),
}
