//! Configuration system

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        if !path.ends_with(".toml") && !path.ends_with(".ron") {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        }

        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;
        
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        }
    }
    
    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };
        
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    
    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
    
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
    
    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value outside its valid range
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid {
        /// Offending field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// Tunables for one physics tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravitational acceleration magnitude (m/s^2)
    pub gravity: f32,

    /// Fixed number of sequential-impulse passes per tick
    pub solver_iterations: u32,

    /// Velocity multiplier applied once per tick after force integration
    pub linear_damping: f32,

    /// Tangential speed below which friction is not applied
    pub friction_epsilon: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            solver_iterations: 20,
            linear_damping: 0.98,
            friction_epsilon: 1e-6,
        }
    }
}

impl Config for PhysicsConfig {}

impl PhysicsConfig {
    /// Builder pattern: Set gravity magnitude
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Builder pattern: Set solver iteration count
    pub fn with_solver_iterations(mut self, iterations: u32) -> Self {
        self.solver_iterations = iterations;
        self
    }

    /// Builder pattern: Set linear damping
    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Check every field is inside its usable range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(ConfigError::Invalid {
                field: "gravity",
                reason: format!("must be finite and non-negative, got {}", self.gravity),
            });
        }
        if self.solver_iterations == 0 {
            return Err(ConfigError::Invalid {
                field: "solver_iterations",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.linear_damping > 0.0 && self.linear_damping <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "linear_damping",
                reason: format!("must be in (0, 1], got {}", self.linear_damping),
            });
        }
        if !self.friction_epsilon.is_finite() || self.friction_epsilon < 0.0 {
            return Err(ConfigError::Invalid {
                field: "friction_epsilon",
                reason: format!("must be finite and non-negative, got {}", self.friction_epsilon),
            });
        }
        Ok(())
    }
}
