//! The player's ship

use crate::arena::Arena;
use crate::bullets;
use crate::components::{Player, Sprite};
use crate::effects;
use crate::input::Keys;
use crate::reaction::Reaction;
use crate::sprite::CenteredSprite;
use hybrid_engine::prelude::*;

/// Spawn the ship centered at the bottom of the arena
pub fn spawn_player(world: &mut World, arena: &Arena) -> Entity {
    let config = &arena.config.player;
    let position = Vec2::new(arena.config.arena.width / 2.0 - config.size.x / 2.0, config.spawn_y);

    world.spawn(
        ComponentSet::new()
            .with(Player::default())
            .with(Body::new(Some(BodyCategory::Player), config.size).at(position))
            .with(Reactions::new().on(BodyCategory::Enemy, Reaction::Crash))
            .with(Sprite::new(arena.sprites.player.clone()))
            .with(Updater::<Arena>::new(PlayerControl))
            .with(Drawer::new(DrawLayer::Entities, CenteredSprite)),
    )
}

/// Blow up the ship
pub fn kill_player(world: &mut World, arena: &mut Arena, player: Entity) {
    if !world.is_alive(player) {
        return;
    }
    if let Some(center) = world.get::<Body>(player).map(Body::center) {
        let explosion = arena.sprites.explosion.clone();
        effects::play(world, arena, explosion, center);
    }
    world.despawn(player);
    arena.stats.player_deaths += 1;
    log::info!("Player destroyed");
}

/// Steering, screen wrap and firing
pub struct PlayerControl;

impl Updatable<Arena> for PlayerControl {
    fn update(&mut self, entity: Entity, world: &mut World, arena: &mut Arena, delta_time: f32) {
        let keys = arena.keys;
        let config = &arena.config.player;
        let bounds = arena.bounds();

        let Some(body) = world.get_mut::<Body>(entity) else {
            return;
        };
        body.velocity = Vec2::new(keys.horizontal(), keys.vertical()) * config.speed;

        // Wrap horizontally on the ship's center, clamp vertically
        if body.center().x > bounds.x {
            body.position.x -= bounds.x;
        }
        if body.center().x < 0.0 {
            body.position.x += bounds.x;
        }
        body.position.y = body.position.y.clamp(0.0, (bounds.y - body.size.y).max(0.0));
        let muzzle = Vec2::new(body.center().x - config.muzzle_offset, body.center().y);
        let fire_interval = config.fire_interval;

        if let Some(sprite) = world.get_mut::<Sprite>(entity) {
            sprite.advance(delta_time);
        }

        let Some(player) = world.get_mut::<Player>(entity) else {
            return;
        };
        if player.bullet_countdown > 0.0 {
            player.bullet_countdown -= delta_time;
        } else if keys.contains(Keys::FIRE) {
            player.bullet_countdown = fire_interval;
            bullets::fire(world, arena, muzzle);
        }
    }
}
