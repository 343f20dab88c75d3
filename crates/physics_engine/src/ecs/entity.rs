//! Entity implementation

use std::fmt;

/// Entity identifier
///
/// Opaque to physics: only compared, hashed and ordered by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    id: u32,
    generation: u32,
}

impl Entity {
    /// Create a new entity with the given ID and generation
    pub fn new(id: u32, generation: u32) -> Self {
        Self { id, generation }
    }
    
    /// Get the entity ID
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Get the generation the ID was issued in
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.id, self.generation)
    }
}
