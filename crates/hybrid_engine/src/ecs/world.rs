//! ECS World implementation
//!
//! The world owns every entity and its components and notifies registered
//! listeners when an entity enters or leaves a listener's family.
//!
//! While the [`Engine`](crate::Engine) is running a system pass the world is
//! in deferred mode: spawns, despawns and component attach/detach are queued
//! and applied at the barrier after the pass. Component *data* is always
//! mutable in place. A despawn request takes effect for liveness checks at
//! once ([`World::is_alive`] turns false) so later entities in the same pass
//! can ignore it, while its components stay readable until the barrier.

use super::component::{BoxedComponent, Component, ComponentSet};
use super::entity::Entity;
use super::family::Family;
use slotmap::SlotMap;
use std::any::TypeId;

/// Receives entity membership events for a family
pub trait EntityListener {
    /// The entity now matches the listener's family
    fn entity_added(&mut self, world: &World, entity: Entity);

    /// The entity no longer matches the listener's family, or is being
    /// despawned. On despawn the components are still readable.
    fn entity_removed(&mut self, world: &World, entity: Entity);
}

struct ListenerEntry {
    family: Family,
    listener: Box<dyn EntityListener>,
}

struct EntityRecord {
    components: ComponentSet,
    /// Listeners have been told about this entity
    registered: bool,
    /// Despawn requested, waiting for the barrier
    removing: bool,
}

enum PendingOp {
    Register(Entity),
    Despawn(Entity),
    Insert(Entity, BoxedComponent),
    Remove(Entity, TypeId),
}

/// ECS World containing all entities and components
pub struct World {
    entities: SlotMap<Entity, EntityRecord>,
    listeners: Vec<ListenerEntry>,
    pending: Vec<PendingOp>,
    deferred: bool,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            listeners: Vec::new(),
            pending: Vec::new(),
            deferred: false,
        }
    }

    /// Register a listener for a family
    ///
    /// Only events raised after registration are delivered; entities already
    /// in the world are not replayed.
    pub fn add_entity_listener(&mut self, family: Family, listener: Box<dyn EntityListener>) {
        log::debug!("Entity listener registered for {:?}", family);
        self.listeners.push(ListenerEntry { family, listener });
    }

    /// Create a new entity from a component set
    pub fn spawn(&mut self, components: ComponentSet) -> Entity {
        let entity = self.entities.insert(EntityRecord {
            components,
            registered: false,
            removing: false,
        });
        log::trace!("Spawned entity {}", entity.id());

        if self.deferred {
            self.pending.push(PendingOp::Register(entity));
        } else {
            self.register_now(entity);
        }
        entity
    }

    /// Remove an entity
    ///
    /// Returns `false` when the entity is unknown or already being removed.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        match self.entities.get_mut(entity) {
            Some(record) if !record.removing => {
                if self.deferred {
                    record.removing = true;
                    self.pending.push(PendingOp::Despawn(entity));
                } else {
                    self.despawn_now(entity);
                }
                true
            }
            _ => false,
        }
    }

    /// Remove every entity, notifying listeners for each
    pub fn despawn_all(&mut self) -> usize {
        let all: Vec<Entity> = self.entities.keys().collect();
        all.into_iter().filter(|entity| self.despawn(*entity)).count()
    }

    /// Attach a component to an entity
    ///
    /// Returns `false` if the entity is gone or being removed.
    pub fn insert<T: Component>(&mut self, entity: Entity, component: T) -> bool {
        match self.entities.get(entity) {
            Some(record) if !record.removing => {
                let boxed = BoxedComponent::new(component);
                if self.deferred && record.registered {
                    self.pending.push(PendingOp::Insert(entity, boxed));
                } else {
                    self.insert_now(entity, boxed);
                }
                true
            }
            _ => false,
        }
    }

    /// Detach a component from an entity
    ///
    /// Returns `false` if the component was neither attached nor waiting to
    /// be attached. In a deferred pass the removal is queued behind any
    /// earlier insert of the same type, and a second removal of the same
    /// type before the barrier reports `false`.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> bool {
        let type_id = TypeId::of::<T>();
        match self.entities.get(entity) {
            Some(record) if !record.removing => {
                if self.deferred && record.registered {
                    // The latest queued change for this type wins over what is attached
                    let attached = self
                        .pending
                        .iter()
                        .rev()
                        .find_map(|op| match op {
                            PendingOp::Insert(target, boxed)
                                if *target == entity && boxed.type_id == type_id =>
                            {
                                Some(true)
                            }
                            PendingOp::Remove(target, id) if *target == entity && *id == type_id => {
                                Some(false)
                            }
                            _ => None,
                        })
                        .unwrap_or_else(|| record.components.contains_id(type_id));
                    if attached {
                        self.pending.push(PendingOp::Remove(entity, type_id));
                    }
                    attached
                } else {
                    self.remove_now(entity, type_id)
                }
            }
            _ => false,
        }
    }

    /// Get a component from an entity
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.entities.get(entity)?.components.get::<T>()
    }

    /// Get a mutable component from an entity
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.entities.get_mut(entity)?.components.get_mut::<T>()
    }

    /// Check whether an entity currently carries component `T`
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.entities
            .get(entity)
            .is_some_and(|record| record.components.contains::<T>())
    }

    /// Full component set of an entity
    pub fn components(&self, entity: Entity) -> Option<&ComponentSet> {
        self.entities.get(entity).map(|record| &record.components)
    }

    /// Whether the entity exists and no despawn has been requested
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.get(entity).is_some_and(|record| !record.removing)
    }

    /// Whether the entity is alive and already visible to systems
    pub fn is_registered(&self, entity: Entity) -> bool {
        self.entities
            .get(entity)
            .is_some_and(|record| record.registered && !record.removing)
    }

    /// Evaluate a family against an entity's current components
    pub fn matches(&self, family: &Family, entity: Entity) -> bool {
        self.entities
            .get(entity)
            .is_some_and(|record| family.matches(&record.components))
    }

    /// Registered entities matching a family, in stable slot order
    pub fn matching(&self, family: &Family) -> Vec<Entity> {
        self.entities
            .iter()
            .filter(|(_, record)| record.registered && !record.removing)
            .filter(|(_, record)| family.matches(&record.components))
            .map(|(entity, _)| entity)
            .collect()
    }

    /// Get an iterator over all registered entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities
            .iter()
            .filter(|(_, record)| record.registered && !record.removing)
            .map(|(entity, _)| entity)
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.entities().count()
    }

    /// Whether the world has no registered entities
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether structural changes are waiting for the next barrier
    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    pub(crate) fn set_deferred(&mut self, deferred: bool) {
        self.deferred = deferred;
    }

    /// Apply every queued structural change in the order it was requested
    pub fn flush(&mut self) {
        while !self.pending.is_empty() {
            for op in std::mem::take(&mut self.pending) {
                match op {
                    PendingOp::Register(entity) => {
                        if self.is_alive(entity) {
                            self.register_now(entity);
                        }
                    }
                    PendingOp::Despawn(entity) => self.despawn_now(entity),
                    PendingOp::Insert(entity, boxed) => {
                        if self.is_alive(entity) {
                            self.insert_now(entity, boxed);
                        }
                    }
                    PendingOp::Remove(entity, type_id) => {
                        if self.is_alive(entity) {
                            self.remove_now(entity, type_id);
                        }
                    }
                }
            }
        }
    }

    fn register_now(&mut self, entity: Entity) {
        let Some(record) = self.entities.get_mut(entity) else {
            return;
        };
        record.registered = true;
        let interested: Vec<bool> = self
            .listeners
            .iter()
            .map(|entry| entry.family.matches(&record.components))
            .collect();

        self.notify(entity, &interested, &[]);
    }

    fn despawn_now(&mut self, entity: Entity) {
        let Some(record) = self.entities.get(entity) else {
            return;
        };
        if record.registered {
            let interested: Vec<bool> = self
                .listeners
                .iter()
                .map(|entry| entry.family.matches(&record.components))
                .collect();
            self.notify(entity, &[], &interested);
        }
        self.entities.remove(entity);
        log::trace!("Despawned entity {}", entity.id());
    }

    fn insert_now(&mut self, entity: Entity, boxed: BoxedComponent) {
        let type_id = boxed.type_id;
        self.change_components(entity, Some(type_id), |components| {
            components.insert_boxed(boxed);
            true
        });
    }

    fn remove_now(&mut self, entity: Entity, type_id: TypeId) -> bool {
        self.change_components(entity, None, |components| components.remove_by_id(type_id))
    }

    /// Apply a component change and raise added/removed events for every
    /// listener whose family membership flipped
    ///
    /// When `replaced` names a component type that is already attached,
    /// listeners whose family requires that type see the entity leave with
    /// the old value and come back with the new one.
    fn change_components(
        &mut self,
        entity: Entity,
        replaced: Option<TypeId>,
        change: impl FnOnce(&mut ComponentSet) -> bool,
    ) -> bool {
        let Some(record) = self.entities.get(entity) else {
            return false;
        };
        if !record.registered {
            return self
                .entities
                .get_mut(entity)
                .is_some_and(|record| change(&mut record.components));
        }

        let mut before: Vec<bool> = self
            .listeners
            .iter()
            .map(|entry| entry.family.matches(&record.components))
            .collect();
        if let Some(type_id) = replaced.filter(|id| record.components.contains_id(*id)) {
            let leaving: Vec<bool> = self
                .listeners
                .iter()
                .zip(&before)
                .map(|(entry, was)| *was && entry.family.requires_id(type_id))
                .collect();
            self.notify(entity, &[], &leaving);
            for (was, left) in before.iter_mut().zip(leaving) {
                *was &= !left;
            }
        }

        let Some(record) = self.entities.get_mut(entity) else {
            return false;
        };
        if !change(&mut record.components) {
            return false;
        }
        let after: Vec<bool> = self
            .listeners
            .iter()
            .map(|entry| entry.family.matches(&record.components))
            .collect();

        let added: Vec<bool> = before.iter().zip(&after).map(|(was, is)| !was && *is).collect();
        let removed: Vec<bool> = before.iter().zip(&after).map(|(was, is)| *was && !is).collect();
        self.notify(entity, &added, &removed);
        true
    }

    fn notify(&mut self, entity: Entity, added: &[bool], removed: &[bool]) {
        if !added.contains(&true) && !removed.contains(&true) {
            return;
        }

        // Listeners only see `&World`, so none can be registered mid-callback
        let mut listeners = std::mem::take(&mut self.listeners);
        for (index, entry) in listeners.iter_mut().enumerate() {
            let add = added.get(index).copied().unwrap_or(false);
            let remove = removed.get(index).copied().unwrap_or(false);
            if add {
                entry.listener.entity_added(self, entity);
            }
            if remove {
                entry.listener.entity_removed(self, entity);
            }
        }
        self.listeners = listeners;
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Position(f32);
    impl Component for Position {}
    struct Frozen;
    impl Component for Frozen {}

    #[derive(Default)]
    struct Log {
        added: Vec<Entity>,
        removed: Vec<Entity>,
    }

    struct Recorder(Rc<RefCell<Log>>);

    impl EntityListener for Recorder {
        fn entity_added(&mut self, world: &World, entity: Entity) {
            assert!(world.has::<Position>(entity));
            self.0.borrow_mut().added.push(entity);
        }

        fn entity_removed(&mut self, _world: &World, entity: Entity) {
            self.0.borrow_mut().removed.push(entity);
        }
    }

    fn moving_family() -> Family {
        Family::builder().all::<Position>().exclude::<Frozen>().build()
    }

    fn world_with_recorder() -> (World, Rc<RefCell<Log>>) {
        let mut world = World::new();
        let log = Rc::new(RefCell::new(Log::default()));
        world.add_entity_listener(moving_family(), Box::new(Recorder(log.clone())));
        (world, log)
    }

    #[test]
    fn test_spawn_and_despawn_notify_matching_listeners() {
        let (mut world, log) = world_with_recorder();
        let mover = world.spawn(ComponentSet::new().with(Position(0.0)));
        let _scenery = world.spawn(ComponentSet::new());

        assert_eq!(log.borrow().added, vec![mover]);
        assert!(world.despawn(mover));
        assert_eq!(log.borrow().removed, vec![mover]);
        assert!(!world.is_alive(mover));
        assert!(!world.despawn(mover));
    }

    #[test]
    fn test_component_changes_move_entity_across_family() {
        let (mut world, log) = world_with_recorder();
        let entity = world.spawn(ComponentSet::new().with(Position(1.0)));

        world.insert(entity, Frozen);
        assert_eq!(log.borrow().removed, vec![entity]);
        assert!(!world.matches(&moving_family(), entity));

        assert!(world.remove::<Frozen>(entity));
        assert_eq!(log.borrow().added, vec![entity, entity]);
        assert!(!world.remove::<Frozen>(entity));
    }

    #[test]
    fn test_deferred_changes_wait_for_flush() {
        let (mut world, log) = world_with_recorder();
        let existing = world.spawn(ComponentSet::new().with(Position(0.0)));

        world.set_deferred(true);
        let fresh = world.spawn(ComponentSet::new().with(Position(2.0)));
        world.insert(existing, Frozen);
        assert!(world.despawn(existing));

        assert!(!world.is_alive(existing));
        assert!(world.get::<Position>(existing).is_some());
        assert!(!world.is_registered(fresh));
        assert!(world.matching(&moving_family()).is_empty());
        assert!(world.has_pending_changes());

        world.flush();
        world.set_deferred(false);

        assert_eq!(world.matching(&moving_family()), vec![fresh]);
        assert!(world.get::<Position>(existing).is_none());
        assert_eq!(log.borrow().added, vec![existing, fresh]);
        assert_eq!(log.borrow().removed, vec![existing]);
    }

    #[test]
    fn test_deferred_insert_then_remove_applies_in_order() {
        let (mut world, log) = world_with_recorder();
        let entity = world.spawn(ComponentSet::new().with(Position(0.0)));

        world.set_deferred(true);
        assert!(world.insert(entity, Frozen));
        assert!(world.remove::<Frozen>(entity));
        world.flush();
        world.set_deferred(false);

        assert!(!world.has::<Frozen>(entity));
        assert_eq!(log.borrow().removed, vec![entity]);
        assert_eq!(log.borrow().added, vec![entity, entity]);
    }

    #[test]
    fn test_second_deferred_remove_reports_absent() {
        let (mut world, log) = world_with_recorder();
        let entity = world.spawn(ComponentSet::new().with(Position(0.0)).with(Frozen));

        world.set_deferred(true);
        assert!(world.remove::<Frozen>(entity));
        assert!(!world.remove::<Frozen>(entity));
        assert!(world.insert(entity, Frozen));
        assert!(world.remove::<Frozen>(entity));
        world.flush();
        world.set_deferred(false);

        assert!(!world.has::<Frozen>(entity));
        assert!(!world.has_pending_changes());
        assert_eq!(log.borrow().added, vec![entity, entity]);
        assert_eq!(log.borrow().removed, vec![entity]);
    }

    #[test]
    fn test_replacing_a_required_component_is_announced_again() {
        let (mut world, log) = world_with_recorder();
        let entity = world.spawn(ComponentSet::new().with(Position(1.0)));

        world.insert(entity, Position(3.0));
        assert_eq!(log.borrow().removed, vec![entity]);
        assert_eq!(log.borrow().added, vec![entity, entity]);
        assert!((world.get::<Position>(entity).unwrap().0 - 3.0).abs() < f32::EPSILON);

        // Replacing a component the family only excludes changes nothing
        let frozen = world.spawn(ComponentSet::new().with(Position(0.0)).with(Frozen));
        world.insert(frozen, Frozen);
        assert_eq!(log.borrow().added, vec![entity, entity]);
        assert_eq!(log.borrow().removed, vec![entity]);
    }

    #[test]
    fn test_spawned_then_despawned_in_same_pass_is_silent() {
        let (mut world, log) = world_with_recorder();
        world.set_deferred(true);
        let ghost = world.spawn(ComponentSet::new().with(Position(0.0)));
        world.despawn(ghost);
        world.flush();

        assert!(log.borrow().added.is_empty());
        assert!(log.borrow().removed.is_empty());
        assert!(world.is_empty());
    }

    #[test]
    fn test_despawn_all_fires_removal_for_each() {
        let (mut world, log) = world_with_recorder();
        for i in 0..3 {
            world.spawn(ComponentSet::new().with(Position(i as f32)));
        }

        assert_eq!(world.despawn_all(), 3);
        assert_eq!(log.borrow().removed.len(), 3);
        assert_eq!(world.len(), 0);
    }

    #[test]
    fn test_data_mutation_is_immediate() {
        let mut world = World::new();
        let entity = world.spawn(ComponentSet::new().with(Position(0.0)));
        world.set_deferred(true);
        world.get_mut::<Position>(entity).unwrap().0 = 5.0;
        assert!((world.get::<Position>(entity).unwrap().0 - 5.0).abs() < f32::EPSILON);
    }
}
