//! Category-indexed body groups
//!
//! The collision world is a secondary index over the [`World`]: it stores
//! entity handles grouped by [`BodyCategory`] and reads positions from the
//! world on every query. It is kept in sync by a listener on the body family.

use super::body::{Body, BodyCategory};
use crate::ecs::components::Inactive;
use crate::ecs::{Entity, EntityListener, World};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Bodies grouped by category
///
/// Every indexed entity also records where it sits, so removal is a swap
/// with the last member of its group. Group order is insertion order until
/// a removal moves the last member into the freed place.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    groups: HashMap<BodyCategory, Vec<Entity>>,
    slots: HashMap<Entity, (BodyCategory, usize)>,
}

impl CollisionWorld {
    /// Create an empty collision world
    pub fn new() -> Self {
        Self::default()
    }

    /// Index an entity under its category; untagged bodies are ignored
    ///
    /// An entity already indexed elsewhere is moved.
    pub fn add(&mut self, entity: Entity, category: Option<BodyCategory>) {
        let Some(category) = category else {
            return;
        };
        self.remove(entity);
        let group = self.groups.entry(category).or_default();
        self.slots.insert(entity, (category, group.len()));
        group.push(entity);
    }

    /// Drop an entity from whichever group holds it
    ///
    /// The slot table knows the group, so bodies whose tag is unknown or has
    /// changed are still found. Returns `false` if the entity was not indexed.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let Some((category, index)) = self.slots.remove(&entity) else {
            return false;
        };
        let Some(group) = self.groups.get_mut(&category) else {
            return false;
        };
        group.swap_remove(index);
        if let Some(moved) = group.get(index) {
            self.slots.insert(*moved, (category, index));
        }
        true
    }

    /// Members of a category
    pub fn group(&self, category: BodyCategory) -> &[Entity] {
        self.groups.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Category an entity is indexed under
    pub fn category_of(&self, entity: Entity) -> Option<BodyCategory> {
        self.slots.get(&entity).map(|(category, _)| *category)
    }

    /// Whether an entity is indexed anywhere
    pub fn contains(&self, entity: Entity) -> bool {
        self.slots.contains_key(&entity)
    }

    /// Total number of indexed bodies
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing is indexed
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Rectangle overlap between two entities' bodies
    ///
    /// An entity never overlaps itself, and entities without a body overlap
    /// nothing.
    pub fn overlaps(world: &World, a: Entity, b: Entity) -> bool {
        if a == b {
            return false;
        }
        match (world.get::<Body>(a), world.get::<Body>(b)) {
            (Some(first), Some(second)) => first.intersects(second),
            _ => false,
        }
    }

    /// First live, active member of `category` overlapping `entity`
    pub fn first_overlap(&self, world: &World, entity: Entity, category: BodyCategory) -> Option<Entity> {
        self.group(category).iter().copied().find(|other| {
            world.is_alive(*other) && !world.has::<Inactive>(*other) && Self::overlaps(world, entity, *other)
        })
    }
}

/// Keeps a shared [`CollisionWorld`] in step with the body family
pub(crate) struct CollisionIndex {
    collision: Rc<RefCell<CollisionWorld>>,
}

impl CollisionIndex {
    pub(crate) fn new(collision: Rc<RefCell<CollisionWorld>>) -> Self {
        Self { collision }
    }
}

impl EntityListener for CollisionIndex {
    fn entity_added(&mut self, world: &World, entity: Entity) {
        if let Some(body) = world.get::<Body>(entity) {
            self.collision.borrow_mut().add(entity, body.category());
        }
    }

    fn entity_removed(&mut self, _world: &World, entity: Entity) {
        self.collision.borrow_mut().remove(entity);
    }
}
