//! Aliens and their bombs
//!
//! Both are enemies: they fly in a straight line, take a number of hits and
//! leave quietly once they drift off the playfield. Aliens also drop a bomb
//! volley on a repeating timer that is cancelled when the alien goes away.

use crate::arena::{Arena, Task};
use crate::components::{Enemy, EnemyKind, Sprite};
use crate::effects;
use crate::sprite::CenteredSprite;
use hybrid_engine::foundation::math::rotate_degrees;
use hybrid_engine::prelude::*;

/// Spawn an alien with its bottom-left corner at `position`
pub fn spawn_alien(world: &mut World, arena: &mut Arena, position: Vec2) -> Entity {
    let config = &arena.config.enemies;
    let body = Body::new(Some(BodyCategory::Enemy), config.alien_size)
        .at(position)
        .moving(Vec2::new(0.0, -config.alien_speed));
    let alien = spawn_enemy(world, Enemy::new(EnemyKind::Alien, config.alien_hits), body, arena.sprites.alien.clone());

    let bomb_interval = config.bomb_interval;
    let timer = arena
        .timers
        .schedule_repeating(Task::DropBombs(alien), 0.0, bomb_interval);
    if let Some(enemy) = world.get_mut::<Enemy>(alien) {
        enemy.bomb_timer = Some(timer);
    }

    arena.stats.aliens_spawned += 1;
    log::debug!("Alien {} spawned at ({:.1}, {:.1})", alien.id(), position.x, position.y);
    alien
}

/// Spawn a bomb at `position` heading `angle` degrees off straight down
pub fn spawn_bomb(world: &mut World, arena: &Arena, position: Vec2, angle: f32) -> Entity {
    let config = &arena.config.enemies;
    let velocity = rotate_degrees(Vec2::new(0.0, -config.bomb_speed), angle);
    let body = Body::new(Some(BodyCategory::Enemy), config.bomb_size)
        .at(position)
        .moving(velocity);
    spawn_enemy(world, Enemy::new(EnemyKind::Bomb, config.bomb_hits), body, arena.sprites.bomb.clone())
}

/// Drop a bomb volley from under an alien
pub fn drop_bombs(world: &mut World, arena: &Arena, alien: Entity) -> usize {
    let Some(body) = world.get::<Body>(alien) else {
        return 0;
    };
    let half_bomb = arena.config.enemies.bomb_size.x / 2.0;
    let origin = Vec2::new(body.center().x - half_bomb, body.bottom());

    for angle in &arena.config.enemies.bomb_angles {
        spawn_bomb(world, arena, origin, *angle);
    }
    arena.config.enemies.bomb_angles.len()
}

/// Register a non-lethal or lethal hit on an enemy
pub fn shoot_enemy(world: &mut World, arena: &mut Arena, enemy: Entity) {
    let Some(state) = world.get_mut::<Enemy>(enemy) else {
        return;
    };
    state.hits -= 1;
    if state.hits <= 0 {
        kill_enemy(world, arena, enemy);
        return;
    }

    if let Some(body) = world.get_mut::<Body>(enemy) {
        body.position.y += arena.config.enemies.knockback;
    }
    world.insert(enemy, HitStun::new(arena.config.enemies.hit_stun));
}

/// Explode an enemy
pub fn kill_enemy(world: &mut World, arena: &mut Arena, enemy: Entity) {
    if !world.is_alive(enemy) {
        return;
    }
    if let Some(center) = world.get::<Body>(enemy).map(Body::center) {
        let explosion = arena.sprites.explosion.clone();
        effects::play(world, arena, explosion, center);
    }
    remove_enemy(world, arena, enemy);
    arena.stats.enemies_destroyed += 1;
}

/// Whether a body has left the playfield for good
pub fn is_outside(body: &Body, bounds: Vec2) -> bool {
    body.position.y < -body.size.y || body.position.x < -body.size.x || body.position.x >= bounds.x
}

/// Animation and off-screen cleanup
pub struct EnemyBrain;

impl Updatable<Arena> for EnemyBrain {
    fn update(&mut self, entity: Entity, world: &mut World, arena: &mut Arena, delta_time: f32) {
        if let Some(sprite) = world.get_mut::<Sprite>(entity) {
            sprite.advance(delta_time);
        }
        let outside = world
            .get::<Body>(entity)
            .is_some_and(|body| is_outside(body, arena.bounds()));
        if outside {
            log::trace!("Enemy {} left the arena", entity.id());
            remove_enemy(world, arena, entity);
        }
    }
}

fn spawn_enemy(world: &mut World, enemy: Enemy, body: Body, animation: Animation) -> Entity {
    world.spawn(
        ComponentSet::new()
            .with(enemy)
            .with(body)
            .with(Sprite::new(animation))
            .with(Updater::<Arena>::new(EnemyBrain))
            .with(Drawer::new(DrawLayer::Entities, CenteredSprite)),
    )
}

fn remove_enemy(world: &mut World, arena: &mut Arena, enemy: Entity) {
    if let Some(timer) = world.get::<Enemy>(enemy).and_then(|state| state.bomb_timer) {
        arena.timers.cancel(timer);
    }
    world.despawn(enemy);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(x: f32, y: f32) -> Body {
        Body::new(Some(BodyCategory::Enemy), Vec2::new(48.0, 48.0)).at(Vec2::new(x, y))
    }

    #[test]
    fn test_outside_bounds() {
        let bounds = Vec2::new(480.0, 480.0);
        assert!(!is_outside(&body_at(0.0, 480.0), bounds));
        assert!(!is_outside(&body_at(-47.0, -47.0), bounds));
        assert!(is_outside(&body_at(0.0, -48.5), bounds));
        assert!(is_outside(&body_at(-49.0, 100.0), bounds));
        assert!(is_outside(&body_at(480.0, 100.0), bounds));
    }
}
