//! Sprite drawing

use crate::components::Sprite;
use hybrid_engine::prelude::*;

/// Draws the entity's current [`Sprite`] frame centered on its [`Body`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CenteredSprite;

impl Drawable for CenteredSprite {
    fn draw(&self, entity: Entity, world: &World) -> Option<DrawCall> {
        let sprite = world.get::<Sprite>(entity)?;
        let body = world.get::<Body>(entity)?;
        Some(DrawCall::new(sprite.animation.sheet(), sprite.frame(), body.center()))
    }
}
