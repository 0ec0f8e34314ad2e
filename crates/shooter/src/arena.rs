//! Shared game state handed to every system
//!
//! The arena is the context type of the shooter's engine. Behaviors and
//! collision reactions reach the pools, timers and input through it.

use crate::assets::SpriteSet;
use crate::bullets::BulletFactory;
use crate::config::GameConfig;
use crate::effects::EffectFactory;
use crate::input::Keys;
use hybrid_engine::prelude::*;
use rand::rngs::StdRng;

/// Deferred work run by the timer service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Spawn an alien at the top of the arena
    SpawnAlien,
    /// Make an alien drop a bomb volley
    DropBombs(Entity),
}

/// Running totals for the current round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Bullets fired
    pub shots_fired: u32,
    /// Aliens spawned
    pub aliens_spawned: u32,
    /// Aliens and bombs destroyed
    pub enemies_destroyed: u32,
    /// Times the player blew up
    pub player_deaths: u32,
}

/// Game context
pub struct Arena {
    /// Active configuration
    pub config: GameConfig,
    /// Resolved animations
    pub sprites: SpriteSet,
    /// Keys held this tick
    pub keys: Keys,
    /// Player bullet pool
    pub bullets: Pool<BulletFactory>,
    /// Visual effect pool
    pub effects: Pool<EffectFactory>,
    /// Game-time timers
    pub timers: TimerService<Task>,
    /// Draw calls of the current frame
    pub draw_queue: DrawQueue,
    /// Gameplay randomness
    pub rng: StdRng,
    /// Round totals
    pub stats: Stats,
}

impl Arena {
    /// Create the context and fill its pools
    pub fn new(config: GameConfig, sprites: SpriteSet, world: &mut World, rng: StdRng) -> Self {
        let bullets = Self::bullet_pool(&config, &sprites, world);
        let effects = Self::effect_pool(&config, &sprites, world);
        Self {
            config,
            sprites,
            keys: Keys::empty(),
            bullets,
            effects,
            timers: TimerService::new(),
            draw_queue: DrawQueue::new(),
            rng,
            stats: Stats::default(),
        }
    }

    /// Replace both pools with freshly filled ones
    ///
    /// Used after every entity has been despawned, when the old pools only
    /// hold dead handles.
    pub fn rebuild_pools(&mut self, world: &mut World) {
        self.bullets = Self::bullet_pool(&self.config, &self.sprites, world);
        self.effects = Self::effect_pool(&self.config, &self.sprites, world);
    }

    /// Width and height of the playfield
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.config.arena.width, self.config.arena.height)
    }

    fn bullet_pool(config: &GameConfig, sprites: &SpriteSet, world: &mut World) -> Pool<BulletFactory> {
        Pool::with_capacity(
            "bullets",
            BulletFactory::new(&config.bullets, sprites.bullet.clone()),
            world,
            config.bullets.pool_size,
        )
    }

    fn effect_pool(config: &GameConfig, sprites: &SpriteSet, world: &mut World) -> Pool<EffectFactory> {
        Pool::with_capacity(
            "effects",
            EffectFactory::new(sprites.explosion.clone()),
            world,
            config.effects.pool_size,
        )
    }
}

impl RenderTarget for Arena {
    fn submit(&mut self, call: DrawCall) {
        self.draw_queue.submit(call);
    }
}
