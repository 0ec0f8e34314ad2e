//! Layer-ordered draw dispatch
//!
//! Entities are visited in ascending [`DrawLayer`]. Inside a layer the order
//! is whatever the world's slot order gives. A hit-stunned entity is drawn
//! with [`Tint::Flash`].

use crate::ecs::components::{HitStun, Inactive};
use crate::ecs::{Component, Entity, Family, System, World};
use crate::render::{DrawCall, DrawLayer, RenderTarget, Tint};
use std::marker::PhantomData;

/// Produces the draw call for an entity
pub trait Drawable {
    /// Build this frame's draw call, or `None` to draw nothing
    fn draw(&self, entity: Entity, world: &World) -> Option<DrawCall>;
}

/// Component giving an entity a layer and a way to draw itself
pub struct Drawer {
    /// Layer the entity is drawn on
    pub layer: DrawLayer,
    drawable: Box<dyn Drawable>,
}

impl Drawer {
    /// Create a drawer
    pub fn new(layer: DrawLayer, drawable: impl Drawable + 'static) -> Self {
        Self {
            layer,
            drawable: Box::new(drawable),
        }
    }
}

impl Component for Drawer {}

/// Submits draw calls for every active drawable entity
pub struct DrawSystem<X> {
    family: Family,
    _context: PhantomData<fn(&mut X)>,
}

impl<X: RenderTarget> DrawSystem<X> {
    /// Create the system
    pub fn new() -> Self {
        Self {
            family: Family::builder().all::<Drawer>().exclude::<Inactive>().build(),
            _context: PhantomData,
        }
    }
}

impl<X: RenderTarget> Default for DrawSystem<X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X: RenderTarget> System<X> for DrawSystem<X> {
    fn name(&self) -> &'static str {
        "DrawSystem"
    }

    fn family(&self) -> &Family {
        &self.family
    }

    fn order(&mut self, world: &World, entities: &mut [Entity]) {
        entities.sort_by_key(|entity| world.get::<Drawer>(*entity).map(|drawer| drawer.layer));
    }

    fn process_entity(&mut self, entity: Entity, world: &mut World, ctx: &mut X, _delta_time: f32) {
        let Some(drawer) = world.get::<Drawer>(entity) else {
            return;
        };
        let Some(mut call) = drawer.drawable.draw(entity, world) else {
            return;
        };
        if world.has::<HitStun>(entity) {
            call.tint = Tint::Flash;
        }
        ctx.submit(call);
    }
}
