//! Entity-Component-System implementation
//!
//! Entities are generational handles, components are plain data stored per
//! entity, families select entities by component type and systems process
//! one family each.

pub mod component;
pub mod components;
pub mod entity;
pub mod family;
pub mod system;
pub mod systems;
pub mod world;

pub use component::{Component, ComponentSet};
pub use entity::Entity;
pub use family::{Family, FamilyBuilder};
pub use system::System;
pub use world::{EntityListener, World};
