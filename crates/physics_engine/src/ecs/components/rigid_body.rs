//! Rigid body component
//!
//! Linear dynamics state plus the material and gravity settings the solver
//! reads. Angular velocity and torque are carried but not integrated.

use crate::ecs::Component;
use crate::foundation::math::{normalize_or, normalize_or_default, Mat3, Vec3};
use crate::physics::collision::CollisionShape;
use crate::physics::PhysicsError;

/// How a body participates in simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Driven by forces and impulses
    Dynamic,
    /// Immovable; zero inverse mass
    Static,
    /// Moved by game logic; only position-corrected against static geometry
    Kinematic,
}

/// Rigid body component
#[derive(Debug, Clone)]
pub struct RigidBodyComponent {
    kind: BodyKind,
    mass: f32,
    inv_mass: f32,
    inv_inertia: Mat3,

    /// Linear velocity in units per second
    pub velocity: Vec3,

    /// Angular velocity in radians per second (not integrated)
    pub angular_velocity: Vec3,

    /// Force for the current tick; overwritten by force accumulation
    pub force: Vec3,

    /// Torque for the current tick (not integrated)
    pub torque: Vec3,

    restitution: f32,
    friction: f32,

    /// Unit direction gravity pulls along when no anchor is set
    pub gravity_direction: Vec3,

    /// Point gravity pulls toward, overriding `gravity_direction`
    pub gravity_anchor: Option<Vec3>,

    /// Kinematic body resolved against static geometry this tick
    pub grounded: bool,

    /// Mass or shape changed; inverse mass and inertia are stale
    pub dirty: bool,
}

impl Component for RigidBodyComponent {}

impl RigidBodyComponent {
    /// Create a body of the given kind and mass
    pub fn new(kind: BodyKind, mass: f32) -> Result<Self, PhysicsError> {
        validate_mass(mass)?;
        Ok(Self {
            kind,
            mass,
            inv_mass: inverse_mass(kind, mass),
            inv_inertia: Mat3::zeros(),
            velocity: Vec3::zeros(),
            angular_velocity: Vec3::zeros(),
            force: Vec3::zeros(),
            torque: Vec3::zeros(),
            restitution: 0.0,
            friction: 0.5,
            gravity_direction: Vec3::new(0.0, -1.0, 0.0),
            gravity_anchor: None,
            grounded: false,
            dirty: true,
        })
    }

    /// Dynamic body of `mass`
    pub fn dynamic(mass: f32) -> Result<Self, PhysicsError> {
        Self::new(BodyKind::Dynamic, mass)
    }

    /// Static body; unit mass, zero inverse mass
    pub fn fixed() -> Self {
        let mut body = Self::kinematic();
        body.kind = BodyKind::Static;
        body.inv_mass = 0.0;
        body
    }

    /// Kinematic body with unit mass
    pub fn kinematic() -> Self {
        Self {
            kind: BodyKind::Kinematic,
            mass: 1.0,
            inv_mass: 1.0,
            inv_inertia: Mat3::zeros(),
            velocity: Vec3::zeros(),
            angular_velocity: Vec3::zeros(),
            force: Vec3::zeros(),
            torque: Vec3::zeros(),
            restitution: 0.0,
            friction: 0.5,
            gravity_direction: Vec3::new(0.0, -1.0, 0.0),
            gravity_anchor: None,
            grounded: false,
            dirty: true,
        }
    }

    /// Builder pattern: Set restitution, clamped to [0, 1]
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.set_restitution(restitution);
        self
    }

    /// Builder pattern: Set friction, clamped to be non-negative
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.set_friction(friction);
        self
    }

    /// Builder pattern: Set initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder pattern: Set gravity direction (normalized)
    pub fn with_gravity_direction(mut self, direction: Vec3) -> Self {
        self.gravity_direction = normalize_or_default(direction);
        self
    }

    /// Builder pattern: Pull toward a point instead of along a direction
    pub fn with_gravity_anchor(mut self, anchor: Vec3) -> Self {
        self.gravity_anchor = Some(anchor);
        self
    }

    /// Simulation role
    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Mass in kilograms
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Inverse mass; zero for static bodies
    ///
    /// Stale while `dirty` is set; the physics step refreshes it first.
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Body-space inverse inertia tensor
    pub fn inv_inertia(&self) -> &Mat3 {
        &self.inv_inertia
    }

    /// Coefficient of restitution
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Friction coefficient
    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Change mass and mark mass properties stale
    pub fn set_mass(&mut self, mass: f32) -> Result<(), PhysicsError> {
        validate_mass(mass)?;
        self.mass = mass;
        self.dirty = true;
        Ok(())
    }

    /// Change kind and mark mass properties stale
    pub fn set_kind(&mut self, kind: BodyKind) {
        self.kind = kind;
        self.dirty = true;
    }

    /// Set restitution, clamped to [0, 1]
    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = if restitution.is_nan() { 0.0 } else { restitution.clamp(0.0, 1.0) };
    }

    /// Set friction, clamped to be non-negative
    pub fn set_friction(&mut self, friction: f32) {
        self.friction = if friction.is_nan() { 0.0 } else { friction.max(0.0) };
    }

    /// Whether the body never moves
    pub fn is_static(&self) -> bool {
        self.kind == BodyKind::Static
    }

    /// Recompute inverse mass and inertia from the current mass and `shape`
    pub fn update_mass_properties(&mut self, shape: &CollisionShape) {
        self.inv_mass = inverse_mass(self.kind, self.mass);
        self.inv_inertia = if self.kind == BodyKind::Static {
            Mat3::zeros()
        } else {
            shape.inverse_inertia(self.mass)
        };
        self.dirty = false;
    }

    /// Gravity direction at `position`, honoring the anchor when present
    ///
    /// A body sitting on its anchor feels no pull.
    pub fn gravity_at(&self, position: Vec3) -> Vec3 {
        match self.gravity_anchor {
            Some(anchor) => normalize_or(anchor - position, Vec3::zeros()),
            None => self.gravity_direction,
        }
    }
}

fn validate_mass(mass: f32) -> Result<(), PhysicsError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidMass(mass))
    }
}

fn inverse_mass(kind: BodyKind, mass: f32) -> f32 {
    match kind {
        BodyKind::Static => 0.0,
        BodyKind::Dynamic | BodyKind::Kinematic => 1.0 / mass,
    }
}
