//! Pooled player bullets

use crate::arena::Arena;
use crate::components::{Bullet, Sprite};
use crate::config::BulletConfig;
use crate::effects;
use crate::reaction::Reaction;
use crate::sprite::CenteredSprite;
use hybrid_engine::prelude::*;

/// Creates and revives bullet entities
pub struct BulletFactory {
    size: Vec2,
    speed: f32,
    lifespan: f32,
    sprite: Animation,
}

impl BulletFactory {
    /// Factory for bullets described by `config`
    pub fn new(config: &BulletConfig, sprite: Animation) -> Self {
        Self {
            size: config.size,
            speed: config.speed,
            lifespan: config.lifespan,
            sprite,
        }
    }
}

impl Poolable for BulletFactory {
    /// Bottom-left corner the bullet starts from
    type Params = Vec2;

    fn spawn(&self, world: &mut World) -> Entity {
        world.spawn(
            ComponentSet::new()
                .with(Bullet {
                    handle: None,
                    lifespan: self.lifespan,
                })
                .with(Body::new(Some(BodyCategory::PlayerBullet), self.size))
                .with(Reactions::new().on(BodyCategory::Enemy, Reaction::Shoot))
                .with(Sprite::new(self.sprite.clone()))
                .with(Updater::<Arena>::new(BulletFlight))
                .with(Drawer::new(DrawLayer::Bullets, CenteredSprite)),
        )
    }

    fn revive(&self, world: &mut World, entity: Entity, handle: PoolHandle, origin: Vec2) {
        if let Some(bullet) = world.get_mut::<Bullet>(entity) {
            bullet.handle = Some(handle);
            bullet.lifespan = self.lifespan;
        }
        if let Some(body) = world.get_mut::<Body>(entity) {
            body.position = origin;
            body.velocity = Vec2::new(0.0, self.speed);
        }
    }
}

/// Counts down the bullet's life and retires it at the end
pub struct BulletFlight;

impl Updatable<Arena> for BulletFlight {
    fn update(&mut self, entity: Entity, world: &mut World, arena: &mut Arena, delta_time: f32) {
        let Some(bullet) = world.get_mut::<Bullet>(entity) else {
            return;
        };
        bullet.lifespan -= delta_time;
        let expired = bullet.lifespan <= 0.0;
        let handle = bullet.handle;

        let Some(body) = world.get::<Body>(entity) else {
            return;
        };
        let escaped = body.position.y > arena.config.arena.height;
        let center = body.center();

        if !(expired || escaped) {
            return;
        }
        if let Some(handle) = handle {
            retire(world, arena, handle, center);
        }
    }
}

/// Fire a bullet from `origin`
pub fn fire(world: &mut World, arena: &mut Arena, origin: Vec2) -> PoolHandle {
    arena.stats.shots_fired += 1;
    arena.bullets.obtain(world, origin)
}

fn retire(world: &mut World, arena: &mut Arena, handle: PoolHandle, center: Vec2) {
    if arena.bullets.free(world, handle) {
        let fizzle = arena.sprites.bullet_expire.clone();
        effects::play(world, arena, fizzle, center);
    }
}
