//! Engine: the world plus its ordered systems
//!
//! One call to [`Engine::update`] runs every system in registration order.
//! Each system sees a snapshot of its family taken at the start of its pass.
//! Structural changes requested during a pass are applied at the barrier
//! right after it, so the next system sees them and the current one never
//! skips or double-processes an entity. Entities despawned earlier in the
//! pass are skipped.

use crate::ecs::{System, World};

/// ECS engine running systems over a [`World`]
///
/// `X` is the application context handed to every system.
pub struct Engine<X> {
    world: World,
    systems: Vec<Box<dyn System<X>>>,
    frame_count: u64,
}

impl<X> Engine<X> {
    /// Create an engine with an empty world and no systems
    pub fn new() -> Self {
        Self {
            world: World::new(),
            systems: Vec::new(),
            frame_count: 0,
        }
    }

    /// Append a system; systems run in the order they were added
    pub fn add_system(&mut self, system: impl System<X> + 'static) {
        log::debug!("Registered system {} for {:?}", system.name(), system.family());
        self.systems.push(Box::new(system));
    }

    /// Names of the registered systems in run order
    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    /// Get the world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get the world mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Number of completed updates
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Run every system once
    pub fn update(&mut self, ctx: &mut X, delta_time: f32) {
        self.world.set_deferred(true);

        for system in &mut self.systems {
            let mut entities = self.world.matching(system.family());
            system.order(&self.world, &mut entities);

            let mut processed = 0usize;
            for entity in entities {
                if !self.world.is_alive(entity) {
                    continue;
                }
                system.process_entity(entity, &mut self.world, ctx, delta_time);
                processed += 1;
            }
            log::trace!("{} processed {} entities", system.name(), processed);

            self.world.flush();
        }

        self.world.set_deferred(false);
        self.frame_count += 1;
    }
}

impl<X> Default for Engine<X> {
    fn default() -> Self {
        Self::new()
    }
}
