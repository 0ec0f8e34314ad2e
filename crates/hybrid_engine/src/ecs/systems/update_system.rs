//! Per-entity behavior dispatch
//!
//! An entity opts into per-frame logic by carrying an [`Updater`] that boxes
//! its behavior. The behavior is lifted out of the component while it runs so
//! it can freely mutate the world, including its own entity.

use crate::ecs::components::{HitStun, Inactive};
use crate::ecs::{Component, Entity, Family, System, World};
use std::marker::PhantomData;

/// Per-frame behavior of an entity
pub trait Updatable<X> {
    /// Advance the behavior by one frame
    fn update(&mut self, entity: Entity, world: &mut World, ctx: &mut X, delta_time: f32);
}

/// Component carrying an entity's behavior
pub struct Updater<X: 'static> {
    behavior: Option<Box<dyn Updatable<X>>>,
}

impl<X: 'static> Updater<X> {
    /// Wrap a behavior
    pub fn new(behavior: impl Updatable<X> + 'static) -> Self {
        Self {
            behavior: Some(Box::new(behavior)),
        }
    }
}

impl<X: 'static> Component for Updater<X> {}

/// Runs every active, unstunned entity's behavior
pub struct UpdateSystem<X> {
    family: Family,
    _context: PhantomData<fn(&mut X)>,
}

impl<X: 'static> UpdateSystem<X> {
    /// Create the system
    pub fn new() -> Self {
        Self {
            family: Family::builder()
                .all::<Updater<X>>()
                .exclude::<Inactive>()
                .exclude::<HitStun>()
                .build(),
            _context: PhantomData,
        }
    }
}

impl<X: 'static> Default for UpdateSystem<X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X: 'static> System<X> for UpdateSystem<X> {
    fn name(&self) -> &'static str {
        "UpdateSystem"
    }

    fn family(&self) -> &Family {
        &self.family
    }

    fn process_entity(&mut self, entity: Entity, world: &mut World, ctx: &mut X, delta_time: f32) {
        let Some(mut behavior) = world
            .get_mut::<Updater<X>>(entity)
            .and_then(|updater| updater.behavior.take())
        else {
            return;
        };

        behavior.update(entity, world, ctx, delta_time);

        // A replacement installed outside a deferred pass wins
        if let Some(updater) = world.get_mut::<Updater<X>>(entity) {
            updater.behavior.get_or_insert(behavior);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::ComponentSet;
    use crate::Engine;

    struct Counter(u32);
    impl Component for Counter {}

    struct Tick;

    impl Updatable<Vec<Entity>> for Tick {
        fn update(&mut self, entity: Entity, world: &mut World, log: &mut Vec<Entity>, _dt: f32) {
            if let Some(counter) = world.get_mut::<Counter>(entity) {
                counter.0 += 1;
            }
            log.push(entity);
        }
    }

    fn ticking(world: &mut World) -> Entity {
        world.spawn(
            ComponentSet::new()
                .with(Counter(0))
                .with(Updater::<Vec<Entity>>::new(Tick)),
        )
    }

    #[test]
    fn test_behavior_runs_once_per_update_and_is_restored() {
        let mut engine: Engine<Vec<Entity>> = Engine::new();
        engine.add_system(UpdateSystem::new());
        let entity = ticking(engine.world_mut());

        let mut log: Vec<Entity> = Vec::new();
        engine.update(&mut log, 0.016);
        engine.update(&mut log, 0.016);

        assert_eq!(log, vec![entity, entity]);
        assert_eq!(engine.world().get::<Counter>(entity).map(|c| c.0), Some(2));
    }

    #[test]
    fn test_inactive_and_stunned_entities_are_skipped() {
        let mut engine: Engine<Vec<Entity>> = Engine::new();
        engine.add_system(UpdateSystem::new());
        let parked = ticking(engine.world_mut());
        let stunned = ticking(engine.world_mut());
        let active = ticking(engine.world_mut());
        engine.world_mut().insert(parked, Inactive);
        engine.world_mut().insert(stunned, HitStun::new(1.0));

        let mut log: Vec<Entity> = Vec::new();
        engine.update(&mut log, 0.016);

        assert_eq!(log, vec![active]);
    }
}
