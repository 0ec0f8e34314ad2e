//! Pooled one-shot animations: explosions, hit sparks, fizzles

use crate::arena::Arena;
use crate::components::{Effect, Sprite};
use crate::sprite::CenteredSprite;
use hybrid_engine::prelude::*;

/// Where and what to play
#[derive(Debug, Clone)]
pub struct EffectParams {
    /// Animation to play once
    pub animation: Animation,
    /// Center of the effect
    pub center: Vec2,
}

/// Creates and revives effect entities
pub struct EffectFactory {
    placeholder: Animation,
}

impl EffectFactory {
    /// Effects start out showing `placeholder` until revived
    pub fn new(placeholder: Animation) -> Self {
        Self { placeholder }
    }
}

impl Poolable for EffectFactory {
    type Params = EffectParams;

    fn spawn(&self, world: &mut World) -> Entity {
        // Zero-size untagged body: just a position, never collides
        world.spawn(
            ComponentSet::new()
                .with(Effect::default())
                .with(Body::new(None, Vec2::zeros()))
                .with(Sprite::new(self.placeholder.clone()))
                .with(Updater::<Arena>::new(EffectPlayback))
                .with(Drawer::new(DrawLayer::Effects, CenteredSprite)),
        )
    }

    fn revive(&self, world: &mut World, entity: Entity, handle: PoolHandle, params: EffectParams) {
        if let Some(effect) = world.get_mut::<Effect>(entity) {
            effect.handle = Some(handle);
        }
        if let Some(body) = world.get_mut::<Body>(entity) {
            body.position = params.center;
        }
        if let Some(sprite) = world.get_mut::<Sprite>(entity) {
            *sprite = Sprite::new(params.animation);
        }
    }
}

/// Plays the animation and returns the effect to its pool when done
pub struct EffectPlayback;

impl Updatable<Arena> for EffectPlayback {
    fn update(&mut self, entity: Entity, world: &mut World, arena: &mut Arena, delta_time: f32) {
        let finished = world.get_mut::<Sprite>(entity).is_some_and(|sprite| {
            sprite.advance(delta_time);
            sprite.is_finished()
        });
        if !finished {
            return;
        }
        if let Some(handle) = world.get::<Effect>(entity).and_then(|effect| effect.handle) {
            arena.effects.free(world, handle);
        }
    }
}

/// Start an effect centered on `center`
pub fn play(world: &mut World, arena: &mut Arena, animation: Animation, center: Vec2) -> PoolHandle {
    arena.effects.obtain(world, EffectParams { animation, center })
}
