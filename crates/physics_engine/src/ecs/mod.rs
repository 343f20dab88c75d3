//! Entity-Component-System implementation
//!
//! A small registry standing in for the engine's component store: typed
//! storages keyed by entity, stable enumeration in creation order, and
//! signature queries for the systems that iterate them.

pub mod world;
pub mod entity;
pub mod component;
pub mod components;
pub mod systems;

pub use world::{World, EcsError};
pub use entity::Entity;
pub use component::Component;
