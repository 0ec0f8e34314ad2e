//! System trait for per-entity processing
//!
//! A system declares a [`Family`] and is handed each matching entity once per
//! engine update. `X` is the application context threaded through every
//! system (input state, timers, pools, render target).

use super::entity::Entity;
use super::family::Family;
use super::world::World;

/// System trait for processing entities and components
pub trait System<X> {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// The entities this system processes
    fn family(&self) -> &Family;

    /// Reorder the entities collected for this pass
    ///
    /// Called once per update before any entity is processed. The default
    /// keeps slot order.
    fn order(&mut self, _world: &World, _entities: &mut [Entity]) {}

    /// Process one entity
    fn process_entity(&mut self, entity: Entity, world: &mut World, ctx: &mut X, delta_time: f32);
}
