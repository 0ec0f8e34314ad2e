//! Hit-stun expiry

use crate::ecs::components::HitStun;
use crate::ecs::{Entity, Family, System, World};

/// Counts down [`HitStun`] and detaches it once it runs out
pub struct HitStunSystem {
    family: Family,
}

impl HitStunSystem {
    /// Create the system
    pub fn new() -> Self {
        Self {
            family: Family::builder().all::<HitStun>().build(),
        }
    }
}

impl Default for HitStunSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl<X> System<X> for HitStunSystem {
    fn name(&self) -> &'static str {
        "HitStunSystem"
    }

    fn family(&self) -> &Family {
        &self.family
    }

    fn process_entity(&mut self, entity: Entity, world: &mut World, _ctx: &mut X, delta_time: f32) {
        let expired = world
            .get_mut::<HitStun>(entity)
            .is_some_and(|stun| stun.tick(delta_time));
        if expired {
            world.remove::<HitStun>(entity);
        }
    }
}
