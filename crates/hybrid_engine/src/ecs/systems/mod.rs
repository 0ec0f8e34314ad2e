//! ECS Systems module
//!
//! Built-in systems. The usual registration order is update, hit-stun,
//! physics, draw.

pub mod draw_system;
pub mod hit_stun_system;
pub mod update_system;

pub use draw_system::{DrawSystem, Drawable, Drawer};
pub use hit_stun_system::HitStunSystem;
pub use update_system::{Updatable, UpdateSystem, Updater};
