//! ECS World implementation

use super::{Entity, Component};
use std::any::{Any, TypeId, type_name};
use std::collections::{BTreeMap, HashMap};

/// Contract violations when reaching into the world
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The entity was never created or has been destroyed
    #[error("entity {0} is not alive")]
    UnknownEntity(Entity),

    /// The entity is alive but lacks the requested component
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        /// Entity that was queried
        entity: Entity,
        /// Type name of the requested component
        component: &'static str,
    },
}

/// Type-erased view of one component storage
trait ComponentStorage: Send + Sync {
    fn remove_entity(&mut self, entity: Entity);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Components of one type, ordered by entity so enumeration is stable
struct TypedStorage<T: Component> {
    components: BTreeMap<Entity, T>,
}

impl<T: Component> ComponentStorage for TypedStorage<T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.components.remove(&entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// ECS World containing all entities and components
pub struct World {
    entities: Vec<Entity>,
    generations: Vec<u32>,
    alive: Vec<bool>,
    free_ids: Vec<u32>,
    component_storages: HashMap<TypeId, Box<dyn ComponentStorage>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            generations: Vec::new(),
            alive: Vec::new(),
            free_ids: Vec::new(),
            component_storages: HashMap::new(),
        }
    }
    
    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        let entity = if let Some(id) = self.free_ids.pop() {
            let slot = id as usize;
            self.generations[slot] += 1;
            self.alive[slot] = true;
            Entity::new(id, self.generations[slot])
        } else {
            let id = u32::try_from(self.generations.len()).unwrap_or(u32::MAX);
            self.generations.push(0);
            self.alive.push(true);
            Entity::new(id, 0)
        };
        self.entities.push(entity);
        entity
    }

    /// Destroy an entity and drop all of its components
    ///
    /// Returns `false` if the entity was not alive.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        for storage in self.component_storages.values_mut() {
            storage.remove_entity(entity);
        }
        self.alive[entity.id() as usize] = false;
        self.free_ids.push(entity.id());
        self.entities.retain(|e| *e != entity);
        true
    }

    /// Check whether an entity handle still refers to a live entity
    pub fn is_alive(&self, entity: Entity) -> bool {
        let slot = entity.id() as usize;
        slot < self.alive.len()
            && self.alive[slot]
            && self.generations[slot] == entity.generation()
    }
    
    /// Add a component to an entity, replacing any previous one of the same type
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), EcsError> {
        if !self.is_alive(entity) {
            return Err(EcsError::UnknownEntity(entity));
        }
        self.storage_mut::<T>().insert(entity, component);
        Ok(())
    }

    /// Remove a component from an entity
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.component_storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut::<TypedStorage<T>>())
            .and_then(|storage| storage.components.remove(&entity))
    }
    
    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>().and_then(|components| components.get(&entity))
    }
    
    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.component_storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut::<TypedStorage<T>>())
            .and_then(|storage| storage.components.get_mut(&entity))
    }

    /// Get a component that the caller requires to exist
    pub fn component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        if !self.is_alive(entity) {
            return Err(EcsError::UnknownEntity(entity));
        }
        self.get_component::<T>(entity).ok_or(EcsError::MissingComponent {
            entity,
            component: type_name::<T>(),
        })
    }

    /// Mutable variant of [`World::component`]
    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        if !self.is_alive(entity) {
            return Err(EcsError::UnknownEntity(entity));
        }
        self.get_component_mut::<T>(entity).ok_or(EcsError::MissingComponent {
            entity,
            component: type_name::<T>(),
        })
    }

    /// Check whether an entity carries a component type
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    /// All entities carrying `T`, in stable entity order
    pub fn query<T: Component>(&self) -> Vec<(Entity, &T)> {
        self.storage::<T>()
            .map(|components| components.iter().map(|(e, c)| (*e, c)).collect())
            .unwrap_or_default()
    }

    /// Mutable variant of [`World::query`]
    pub fn query_mut<T: Component>(&mut self) -> Vec<(Entity, &mut T)> {
        self.component_storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut::<TypedStorage<T>>())
            .map(|storage| storage.components.iter_mut().map(|(e, c)| (*e, c)).collect())
            .unwrap_or_default()
    }

    /// Entities whose signature includes both `A` and `B`, in stable order
    pub fn entities_with<A: Component, B: Component>(&self) -> Vec<Entity> {
        self.query::<A>()
            .into_iter()
            .map(|(entity, _)| entity)
            .filter(|entity| self.has_component::<B>(*entity))
            .collect()
    }
    
    /// Get an iterator over all entities in creation order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    fn storage<T: Component>(&self) -> Option<&BTreeMap<Entity, T>> {
        self.component_storages
            .get(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any().downcast_ref::<TypedStorage<T>>())
            .map(|storage| &storage.components)
    }

    fn storage_mut<T: Component>(&mut self) -> &mut BTreeMap<Entity, T> {
        let storage = self
            .component_storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| -> Box<dyn ComponentStorage> {
                Box::new(TypedStorage::<T> { components: BTreeMap::new() })
            });
        &mut storage
            .as_any_mut()
            .downcast_mut::<TypedStorage<T>>()
            .expect("component storage registered under a foreign TypeId")
            .components
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
