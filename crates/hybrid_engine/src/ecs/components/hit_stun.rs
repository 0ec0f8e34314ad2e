//! Hit-stun component
//!
//! While attached, an entity is skipped by behavior updates and physics and
//! is drawn with a flash tint. The [`HitStunSystem`](crate::ecs::systems::HitStunSystem)
//! counts it down and detaches it when it runs out.

use crate::ecs::Component;

/// Temporary stun after being hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitStun {
    /// Seconds left
    pub remaining: f32,
}

impl HitStun {
    /// Create a stun lasting `duration` seconds
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration,
        }
    }

    /// Count down, returning `true` once the stun has expired
    pub fn tick(&mut self, delta_time: f32) -> bool {
        self.remaining -= delta_time;
        self.remaining <= 0.0
    }
}

impl Component for HitStun {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tick_expires_at_zero() {
        let mut stun = HitStun::new(0.25);
        assert!(!stun.tick(0.1));
        assert_relative_eq!(stun.remaining, 0.15, epsilon = 1e-6);
        assert!(!stun.tick(0.1));
        assert!(stun.tick(0.1));
    }
}
