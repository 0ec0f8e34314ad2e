//! Game loop driver
//!
//! Owns the engine and the arena. One [`Game::tick`] polls input, fires due
//! timers, runs every system and presents the frame. Pressing reset tears the
//! round down completely and builds a fresh one.

use crate::arena::{Arena, Stats, Task};
use crate::assets::SpriteSet;
use crate::bullets;
use crate::components::{Enemy, Player};
use crate::config::GameConfig;
use crate::enemy;
use crate::input::{InputSource, Keys};
use crate::player;
use crate::reaction::Reaction;
use hybrid_engine::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Errors that stop the game from starting
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Bad configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Missing or malformed sprite data
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}

/// The shooter
pub struct Game {
    engine: Engine<Arena>,
    arena: Arena,
    collision: Rc<RefCell<CollisionWorld>>,
    previous_keys: Keys,
    elapsed: f32,
    resets: u32,
}

impl Game {
    /// Build the engine, fill the pools and start the first round
    pub fn new(config: GameConfig, library: &AnimationLibrary) -> Result<Self, GameError> {
        config.validate()?;
        let sprites = SpriteSet::resolve(library, &config)?;

        let mut engine: Engine<Arena> = Engine::new();
        let physics: PhysicsSystem<Reaction> = PhysicsSystem::new(engine.world_mut());
        let collision = physics.collision_world();
        engine.add_system(UpdateSystem::new());
        engine.add_system(HitStunSystem::new());
        engine.add_system(physics);
        engine.add_system(DrawSystem::new());

        let rng = match config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let arena = Arena::new(config, sprites, engine.world_mut(), rng);

        let mut game = Self {
            engine,
            arena,
            collision,
            previous_keys: Keys::empty(),
            elapsed: 0.0,
            resets: 0,
        };
        game.setup();
        log::info!(
            "Game ready: {} systems, {} entities",
            game.engine.system_names().len(),
            game.world().len()
        );
        Ok(game)
    }

    /// Advance the game by one frame
    pub fn tick(&mut self, delta_time: f32, input: &mut dyn InputSource, renderer: &mut dyn Renderer) {
        let keys = input.poll();
        let reset_requested = keys.contains(Keys::RESET) && !self.previous_keys.contains(Keys::RESET);
        self.previous_keys = keys;
        self.arena.keys = keys;

        self.run_timers(delta_time);
        self.engine.update(&mut self.arena, delta_time);
        self.arena.draw_queue.present(renderer);
        self.elapsed += delta_time;

        if reset_requested {
            self.reset();
        }
    }

    /// Remove everything, cancel every timer and start a new round
    pub fn reset(&mut self) {
        let removed = self.engine.world_mut().despawn_all();
        self.arena.timers.clear();
        self.arena.draw_queue.clear();
        self.arena.rebuild_pools(self.engine.world_mut());
        self.arena.stats = Stats::default();
        self.setup();
        self.resets += 1;
        log::info!("Round reset, {} entities removed", removed);
    }

    /// Spawn an alien outside the regular schedule
    pub fn spawn_alien(&mut self, position: Vec2) -> Entity {
        enemy::spawn_alien(self.engine.world_mut(), &mut self.arena, position)
    }

    /// Spawn a bomb outside the regular schedule
    pub fn spawn_bomb(&mut self, position: Vec2, angle: f32) -> Entity {
        enemy::spawn_bomb(self.engine.world_mut(), &self.arena, position, angle)
    }

    /// Fire a bullet from `origin` as if the player had
    pub fn fire(&mut self, origin: Vec2) -> PoolHandle {
        bullets::fire(self.engine.world_mut(), &mut self.arena, origin)
    }

    /// Get the world
    pub fn world(&self) -> &World {
        self.engine.world()
    }

    /// Get the arena
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Get the arena mutably
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Borrow the world and arena together
    pub fn parts_mut(&mut self) -> (&mut World, &mut Arena) {
        (self.engine.world_mut(), &mut self.arena)
    }

    /// Collision index maintained for the physics system
    pub fn collision_world(&self) -> Ref<'_, CollisionWorld> {
        self.collision.borrow()
    }

    /// The player's ship, if it is still flying
    pub fn player(&self) -> Option<Entity> {
        let family = Family::builder().all::<Player>().build();
        self.world().matching(&family).first().copied()
    }

    /// Live aliens and bombs
    pub fn enemies(&self) -> Vec<Entity> {
        self.world().matching(&Family::builder().all::<Enemy>().build())
    }

    /// Round totals
    pub fn stats(&self) -> Stats {
        self.arena.stats
    }

    /// Seconds simulated since start
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Frames simulated since start
    pub fn frame_count(&self) -> u64 {
        self.engine.frame_count()
    }

    /// Rounds restarted so far
    pub fn resets(&self) -> u32 {
        self.resets
    }

    fn setup(&mut self) {
        player::spawn_player(self.engine.world_mut(), &self.arena);
        let config = &self.arena.config.enemies;
        let (delay, interval) = (config.spawn_delay, config.spawn_interval);
        self.arena.timers.schedule_repeating(Task::SpawnAlien, delay, interval);
    }

    fn run_timers(&mut self, delta_time: f32) {
        for (id, task) in self.arena.timers.advance(delta_time) {
            let world = self.engine.world_mut();
            match task {
                Task::SpawnAlien => {
                    let bounds = self.arena.bounds();
                    let x = self.arena.rng.gen_range(0.0..=bounds.x);
                    enemy::spawn_alien(world, &mut self.arena, Vec2::new(x, bounds.y));
                }
                Task::DropBombs(alien) => {
                    if world.is_alive(alien) {
                        enemy::drop_bombs(world, &self.arena, alien);
                    } else {
                        self.arena.timers.cancel(id);
                    }
                }
            }
        }
    }
}
