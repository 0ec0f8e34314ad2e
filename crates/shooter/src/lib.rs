//! # Shooter
//!
//! A vertical arcade shooter on top of `hybrid_engine`: the player's ship
//! fires pooled bullets at descending aliens that drop bomb volleys.
//!
//! The game is headless. Input arrives through an [`InputSource`] and each
//! frame is presented to a [`Renderer`](hybrid_engine::render::Renderer).

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod arena;
pub mod assets;
pub mod bullets;
pub mod components;
pub mod config;
pub mod effects;
pub mod enemy;
pub mod game;
pub mod input;
pub mod player;
pub mod reaction;
pub mod sprite;

pub use arena::{Arena, Stats, Task};
pub use config::GameConfig;
pub use game::{Game, GameError};
pub use input::{InputSource, Keys, ScriptedInput};
