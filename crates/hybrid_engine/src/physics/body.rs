//! Body and collision reaction components

use crate::ecs::{Component, Entity, World};
use crate::foundation::math::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Collision group a body belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BodyCategory {
    /// The player's ship
    Player,
    /// Shots fired by the player
    PlayerBullet,
    /// Aliens and their bombs
    Enemy,
}

/// Axis-aligned rectangle with a velocity
///
/// The category is fixed for the life of the value. To move an entity to
/// another collision group, insert a new body; the collision index sees the
/// old body leave and the new one arrive.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Bottom-left corner
    pub position: Vec2,
    /// Width and height
    pub size: Vec2,
    /// Units per second
    pub velocity: Vec2,
    category: Option<BodyCategory>,
}

impl Body {
    /// Create a stationary body
    pub fn new(category: Option<BodyCategory>, size: Vec2) -> Self {
        Self {
            position: Vec2::zeros(),
            size,
            velocity: Vec2::zeros(),
            category,
        }
    }

    /// Collision group, `None` for bodies nothing can hit
    pub fn category(&self) -> Option<BodyCategory> {
        self.category
    }

    /// Set the bottom-left corner
    #[must_use]
    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Set the velocity
    #[must_use]
    pub fn moving(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Left edge
    pub fn left(&self) -> f32 {
        self.position.x
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.position.y
    }

    /// Top edge
    pub fn top(&self) -> f32 {
        self.position.y + self.size.y
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    /// Explicit Euler step
    pub fn integrate(&mut self, delta_time: f32) {
        self.position += self.velocity * delta_time;
    }

    /// Strict rectangle intersection; touching edges do not overlap
    pub fn intersects(&self, other: &Body) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.bottom() < other.top()
            && self.top() > other.bottom()
    }
}

impl Component for Body {}

/// What happens when an entity touches a body of some category
pub trait CollisionResponse<X> {
    /// React to `entity` overlapping `other`
    fn respond(&self, entity: Entity, other: Entity, world: &mut World, ctx: &mut X);
}

/// Per-category collision reactions of an entity
///
/// Reactions run in category order.
#[derive(Debug, Clone)]
pub struct Reactions<R> {
    table: BTreeMap<BodyCategory, R>,
}

impl<R> Reactions<R> {
    /// No reactions
    pub fn new() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// React to `category` with `reaction` (builder pattern)
    #[must_use]
    pub fn on(mut self, category: BodyCategory, reaction: R) -> Self {
        self.table.insert(category, reaction);
        self
    }

    /// Reaction registered for a category
    pub fn get(&self, category: BodyCategory) -> Option<&R> {
        self.table.get(&category)
    }

    /// Iterate reactions in category order
    pub fn iter(&self) -> impl Iterator<Item = (BodyCategory, &R)> {
        self.table.iter().map(|(category, reaction)| (*category, reaction))
    }

    /// Number of categories reacted to
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether nothing is reacted to
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<R> Default for Reactions<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: 'static> Component for Reactions<R> {}
