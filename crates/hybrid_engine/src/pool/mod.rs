//! Object pools for short-lived entities
//!
//! A pool owns a fixed set of entities of one kind. Idle entities carry
//! [`Inactive`] so no built-in system touches them. Obtaining an instance
//! strips the marker and re-initializes its data in place; freeing puts the
//! marker back. Components are attached once, when the instance is first
//! created, and reused for the life of the pool.
//!
//! Every activation is identified by a [`PoolHandle`] whose generation is
//! bumped on free, so a second `free` with the same handle is a no-op even if
//! the slot has been handed out again in the meantime.

use crate::ecs::components::Inactive;
use crate::ecs::{Entity, World};

/// Factory and initializer for one kind of pooled entity
pub trait Poolable {
    /// Per-activation parameters, such as a spawn position
    type Params;

    /// Create a fresh instance with its full component set
    fn spawn(&self, world: &mut World) -> Entity;

    /// Re-initialize an instance that is being activated
    fn revive(&self, world: &mut World, entity: Entity, handle: PoolHandle, params: Self::Params);
}

/// Identifies one activation of a pooled instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolHandle {
    index: usize,
    generation: u32,
}

#[derive(Debug)]
struct Slot {
    entity: Entity,
    generation: u32,
    active: bool,
}

/// Reusable set of entities of one kind
pub struct Pool<P: Poolable> {
    name: &'static str,
    factory: P,
    slots: Vec<Slot>,
    idle: Vec<usize>,
}

impl<P: Poolable> Pool<P> {
    /// Create an empty pool; instances are created on demand
    pub fn new(name: &'static str, factory: P) -> Self {
        Self {
            name,
            factory,
            slots: Vec::new(),
            idle: Vec::new(),
        }
    }

    /// Create a pool with `capacity` idle instances already spawned
    pub fn with_capacity(name: &'static str, factory: P, world: &mut World, capacity: usize) -> Self {
        let mut pool = Self::new(name, factory);
        for _ in 0..capacity {
            let index = pool.grow(world);
            pool.idle.push(index);
        }
        log::debug!("Pool '{}' preallocated {} instances", name, capacity);
        pool
    }

    /// Activate an idle instance, creating one if none is left
    pub fn obtain(&mut self, world: &mut World, params: P::Params) -> PoolHandle {
        let index = match self.idle.pop() {
            Some(index) => index,
            None => {
                let index = self.grow(world);
                log::trace!("Pool '{}' grew to {} instances", self.name, self.slots.len());
                index
            }
        };

        let entity = self.live_entity(world, index);
        let slot = &mut self.slots[index];
        slot.active = true;
        let handle = PoolHandle {
            index,
            generation: slot.generation,
        };

        world.remove::<Inactive>(entity);
        self.factory.revive(world, entity, handle, params);
        handle
    }

    /// Return an instance to the pool
    ///
    /// Returns `false` without touching anything when the handle is stale or
    /// the instance is already idle.
    pub fn free(&mut self, world: &mut World, handle: PoolHandle) -> bool {
        let Some(slot) = self.slots.get_mut(handle.index) else {
            return false;
        };
        if !slot.active || slot.generation != handle.generation {
            log::trace!("Pool '{}' ignored free of idle instance {}", self.name, handle.index);
            return false;
        }

        slot.active = false;
        slot.generation = slot.generation.wrapping_add(1);
        let entity = self.live_entity(world, handle.index);
        world.insert(entity, Inactive);
        self.idle.push(handle.index);
        true
    }

    /// Free every active instance
    pub fn free_all(&mut self, world: &mut World) -> usize {
        let active: Vec<PoolHandle> = self.active_handles().collect();
        active.into_iter().filter(|handle| self.free(world, *handle)).count()
    }

    /// Whether the handle names the current activation of its slot
    pub fn is_active(&self, handle: PoolHandle) -> bool {
        self.slots
            .get(handle.index)
            .is_some_and(|slot| slot.active && slot.generation == handle.generation)
    }

    /// Entity behind an active handle
    pub fn entity(&self, handle: PoolHandle) -> Option<Entity> {
        self.is_active(handle).then(|| self.slots[handle.index].entity)
    }

    /// Handles of all active instances
    pub fn active_handles(&self) -> impl Iterator<Item = PoolHandle> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(|(index, slot)| PoolHandle {
                index,
                generation: slot.generation,
            })
    }

    /// Number of active instances
    pub fn active_count(&self) -> usize {
        self.slots.len() - self.idle.len()
    }

    /// Number of idle instances
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Total instances ever created
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Pool name used in logs
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Entity of a slot, replaced with a fresh parked one if it was
    /// despawned behind the pool's back
    fn live_entity(&mut self, world: &mut World, index: usize) -> Entity {
        let entity = self.slots[index].entity;
        if world.is_alive(entity) {
            return entity;
        }
        log::debug!("Pool '{}' replaced despawned instance {}", self.name, index);
        let fresh = self.factory.spawn(world);
        world.insert(fresh, Inactive);
        self.slots[index].entity = fresh;
        fresh
    }

    fn grow(&mut self, world: &mut World) -> usize {
        let entity = self.factory.spawn(world);
        world.insert(entity, Inactive);
        self.slots.push(Slot {
            entity,
            generation: 0,
            active: false,
        });
        self.slots.len() - 1
    }
}
