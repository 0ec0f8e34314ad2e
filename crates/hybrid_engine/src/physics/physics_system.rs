//! Movement integration and collision dispatch

use super::body::{Body, CollisionResponse, Reactions};
use super::collision_world::{CollisionIndex, CollisionWorld};
use crate::ecs::components::{HitStun, Inactive};
use crate::ecs::{Entity, Family, System, World};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

/// Integrates bodies and runs their collision reactions
///
/// Stunned and parked entities neither move nor react. Reactions run in
/// category order and stop as soon as the entity itself is despawned.
pub struct PhysicsSystem<R> {
    family: Family,
    collision: Rc<RefCell<CollisionWorld>>,
    _reaction: PhantomData<R>,
}

impl<R> PhysicsSystem<R> {
    /// Create the system and hook its collision world into `world`
    pub fn new(world: &mut World) -> Self {
        let collision = Rc::new(RefCell::new(CollisionWorld::new()));
        world.add_entity_listener(
            Family::builder().all::<Body>().build(),
            Box::new(CollisionIndex::new(collision.clone())),
        );

        Self {
            family: Family::builder()
                .all::<Body>()
                .exclude::<Inactive>()
                .exclude::<HitStun>()
                .build(),
            collision,
            _reaction: PhantomData,
        }
    }

    /// Shared handle to the collision index
    pub fn collision_world(&self) -> Rc<RefCell<CollisionWorld>> {
        self.collision.clone()
    }
}

impl<X, R> System<X> for PhysicsSystem<R>
where
    R: CollisionResponse<X> + Clone + 'static,
{
    fn name(&self) -> &'static str {
        "PhysicsSystem"
    }

    fn family(&self) -> &Family {
        &self.family
    }

    fn process_entity(&mut self, entity: Entity, world: &mut World, ctx: &mut X, delta_time: f32) {
        let Some(body) = world.get_mut::<Body>(entity) else {
            return;
        };
        body.integrate(delta_time);

        let Some(reactions) = world.get::<Reactions<R>>(entity).cloned() else {
            return;
        };
        for (category, reaction) in reactions.iter() {
            if !world.is_alive(entity) {
                break;
            }
            let other = self.collision.borrow().first_overlap(world, entity, category);
            if let Some(other) = other {
                reaction.respond(entity, other, world, ctx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::ComponentSet;
    use crate::foundation::math::Vec2;
    use crate::physics::BodyCategory;
    use crate::Engine;
    use approx::assert_relative_eq;

    #[derive(Clone)]
    enum Hit {
        Record,
        DestroyBoth,
    }

    impl CollisionResponse<Vec<(Entity, Entity)>> for Hit {
        fn respond(&self, entity: Entity, other: Entity, world: &mut World, hits: &mut Vec<(Entity, Entity)>) {
            hits.push((entity, other));
            if let Hit::DestroyBoth = self {
                world.despawn(entity);
                world.despawn(other);
            }
        }
    }

    type Hits = Vec<(Entity, Entity)>;

    fn engine() -> Engine<Hits> {
        let mut engine: Engine<Hits> = Engine::new();
        let physics: PhysicsSystem<Hit> = PhysicsSystem::new(engine.world_mut());
        engine.add_system(physics);
        engine
    }

    fn square(category: BodyCategory, x: f32, y: f32) -> Body {
        Body::new(Some(category), Vec2::new(10.0, 10.0)).at(Vec2::new(x, y))
    }

    #[test]
    fn test_bullet_travels_half_a_second() {
        let mut engine = engine();
        let bullet = engine.world_mut().spawn(
            ComponentSet::new()
                .with(Body::new(Some(BodyCategory::PlayerBullet), Vec2::new(16.0, 24.0))
                    .at(Vec2::new(100.0, 50.0))
                    .moving(Vec2::new(0.0, 400.0))),
        );

        let mut hits = Hits::new();
        for _ in 0..30 {
            engine.update(&mut hits, 1.0 / 60.0);
        }

        let body = engine.world().get::<Body>(bullet).unwrap();
        assert_relative_eq!(body.position.y, 250.0, epsilon = 0.01);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_reaction_fires_for_overlapping_category() {
        let mut engine = engine();
        let player = engine.world_mut().spawn(
            ComponentSet::new()
                .with(square(BodyCategory::Player, 0.0, 0.0))
                .with(Reactions::new().on(BodyCategory::Enemy, Hit::Record)),
        );
        let enemy = engine
            .world_mut()
            .spawn(ComponentSet::new().with(square(BodyCategory::Enemy, 5.0, 5.0)));

        let mut hits = Hits::new();
        engine.update(&mut hits, 0.0);
        assert_eq!(hits, vec![(player, enemy)]);
    }

    #[test]
    fn test_destroyed_pair_is_not_processed_again() {
        let mut engine = engine();
        let reacts = || Reactions::new().on(BodyCategory::Enemy, Hit::DestroyBoth);
        let a = engine
            .world_mut()
            .spawn(ComponentSet::new().with(square(BodyCategory::Enemy, 0.0, 0.0)).with(reacts()));
        let b = engine
            .world_mut()
            .spawn(ComponentSet::new().with(square(BodyCategory::Enemy, 5.0, 5.0)).with(reacts()));

        let mut hits = Hits::new();
        engine.update(&mut hits, 0.0);

        assert_eq!(hits, vec![(a, b)]);
        assert!(engine.world().is_empty());
    }

    #[test]
    fn test_stunned_body_neither_moves_nor_reacts() {
        let mut engine = engine();
        let stunned = engine.world_mut().spawn(
            ComponentSet::new()
                .with(square(BodyCategory::Player, 0.0, 0.0).moving(Vec2::new(10.0, 0.0)))
                .with(Reactions::new().on(BodyCategory::Enemy, Hit::Record))
                .with(HitStun::new(1.0)),
        );
        engine
            .world_mut()
            .spawn(ComponentSet::new().with(square(BodyCategory::Enemy, 5.0, 5.0)));

        let mut hits = Hits::new();
        engine.update(&mut hits, 0.5);

        assert!(hits.is_empty());
        assert_relative_eq!(engine.world().get::<Body>(stunned).unwrap().position.x, 0.0);
    }
}
