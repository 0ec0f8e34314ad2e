//! ECS Components module
//!
//! Engine-level components shared by the built-in systems

pub mod hit_stun;
pub mod lifecycle;

pub use hit_stun::HitStun;
pub use lifecycle::Inactive;
