//! Collision reactions

use crate::arena::Arena;
use crate::components::Bullet;
use crate::effects;
use crate::enemy;
use crate::player;
use hybrid_engine::prelude::*;

/// What an entity does when it touches an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Ship rammed an enemy: both explode
    Crash,
    /// Bullet struck an enemy: the bullet is spent and the enemy takes a hit
    Shoot,
}

impl CollisionResponse<Arena> for Reaction {
    fn respond(&self, entity: Entity, other: Entity, world: &mut World, arena: &mut Arena) {
        match self {
            Self::Crash => {
                enemy::kill_enemy(world, arena, other);
                player::kill_player(world, arena, entity);
            }
            Self::Shoot => {
                let Some(handle) = world.get::<Bullet>(entity).and_then(|bullet| bullet.handle) else {
                    return;
                };
                let Some(center) = world.get::<Body>(entity).map(Body::center) else {
                    return;
                };
                // Only the first consumer of a bullet gets to score with it
                if arena.bullets.free(world, handle) {
                    let spark = arena.sprites.bullet_hit.clone();
                    effects::play(world, arena, spark, center);
                    enemy::shoot_enemy(world, arena, other);
                }
            }
        }
    }
}
