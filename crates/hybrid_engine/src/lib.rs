//! # Hybrid Engine
//!
//! A small entity-component runtime for 2D arcade games where entities keep
//! their own behavior objects but are scheduled like a classic ECS.
//!
//! ## Features
//!
//! - **Families**: require-all / exclude-any component filters
//! - **Deferred structure**: spawns, despawns and component changes made
//!   during a system pass are applied at the barrier after it
//! - **Collision groups**: category-indexed rectangle bodies with per-entity
//!   collision reactions
//! - **Object pools**: generation-checked handles with idempotent free
//! - **Timers**: game-time delayed and repeating tasks
//!
//! ## Quick Start
//!
//! ```rust
//! use hybrid_engine::prelude::*;
//!
//! struct Spin;
//!
//! impl Updatable<u32> for Spin {
//!     fn update(&mut self, _entity: Entity, _world: &mut World, ticks: &mut u32, _dt: f32) {
//!         *ticks += 1;
//!     }
//! }
//!
//! let mut engine: Engine<u32> = Engine::new();
//! engine.add_system(UpdateSystem::new());
//! engine.world_mut().spawn(ComponentSet::new().with(Updater::<u32>::new(Spin)));
//!
//! let mut ticks = 0;
//! engine.update(&mut ticks, 1.0 / 60.0);
//! assert_eq!(ticks, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod ecs;
pub mod foundation;
pub mod physics;
pub mod pool;
pub mod render;

mod engine;

pub use engine::Engine;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{Animation, AnimationLibrary, AssetError, PlayMode},
        config::{Config, ConfigError},
        ecs::{
            components::{HitStun, Inactive},
            systems::{DrawSystem, Drawable, Drawer, HitStunSystem, Updatable, UpdateSystem, Updater},
            Component, ComponentSet, Entity, EntityListener, Family, System, World,
        },
        foundation::{
            math::Vec2,
            time::{TimerId, TimerService},
        },
        physics::{Body, BodyCategory, CollisionResponse, CollisionWorld, PhysicsSystem, Reactions},
        pool::{Pool, PoolHandle, Poolable},
        render::{DrawCall, DrawLayer, DrawQueue, ImageRef, RecordingRenderer, RenderTarget, Renderer, Tint},
        Engine,
    };
}
