//! Physics module for movement and collision dispatch
//!
//! Bodies are axis-aligned rectangles anchored at their bottom-left corner.
//! The physics system integrates velocity and asks the collision world for
//! the first overlapping body in each category an entity reacts to. What a
//! collision *does* is up to the entity's [`Reactions`].

pub mod body;
pub mod collision_world;
pub mod physics_system;

pub use body::{Body, BodyCategory, CollisionResponse, Reactions};
pub use collision_world::CollisionWorld;
pub use physics_system::PhysicsSystem;
