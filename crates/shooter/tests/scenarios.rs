//! Whole-game scenarios driven tick by tick

use approx::assert_relative_eq;
use hybrid_engine::prelude::*;
use shooter::components::{Enemy, Sprite};
use shooter::{effects, Game, GameConfig, Keys, ScriptedInput};

const DT: f32 = 1.0 / 60.0;

fn seeded_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.simulation.seed = Some(42);
    config
}

/// A game with the alien spawner switched off
fn quiet_game() -> Game {
    let mut game = Game::new(seeded_config(), &AnimationLibrary::default()).unwrap();
    game.arena_mut().timers.clear();
    game
}

fn run(game: &mut Game, input: &mut ScriptedInput, renderer: &mut RecordingRenderer, ticks: usize) {
    for _ in 0..ticks {
        game.tick(DT, input, renderer);
    }
}

fn idle(game: &mut Game, ticks: usize) -> RecordingRenderer {
    let mut renderer = RecordingRenderer::new();
    run(game, &mut ScriptedInput::new(), &mut renderer, ticks);
    renderer
}

fn active_entities(world: &World) -> usize {
    world.entities().filter(|entity| !world.has::<Inactive>(*entity)).count()
}

#[test]
fn test_bullet_travels_200_units_in_half_a_second() {
    let mut game = quiet_game();
    let handle = game.fire(Vec2::new(100.0, 50.0));
    let bullet = game.arena().bullets.entity(handle).unwrap();

    idle(&mut game, 30);

    let body = game.world().get::<Body>(bullet).unwrap();
    assert_relative_eq!(body.position.y, 250.0, epsilon = 0.01);
    assert_relative_eq!(body.position.x, 100.0);
    assert!(game.arena().bullets.is_active(handle));
}

#[test]
fn test_bullet_hitting_alien_is_spent_and_deals_one_hit() {
    let mut game = quiet_game();
    let alien = game.spawn_alien(Vec2::new(84.0, 150.0));
    game.arena_mut().timers.clear();
    let handle = game.fire(Vec2::new(100.0, 50.0));

    idle(&mut game, 30);

    assert!(!game.arena().bullets.is_active(handle));
    assert_eq!(game.world().get::<Enemy>(alien).unwrap().hits, 9);
    assert!(game.world().is_alive(alien));
    assert_eq!(game.arena().bullets.active_count(), 0);
}

#[test]
fn test_hit_stun_freezes_movement_and_behavior_until_it_expires() {
    let mut game = quiet_game();
    let alien = game.spawn_alien(Vec2::new(84.0, 150.0));
    game.arena_mut().timers.clear();
    game.fire(Vec2::new(100.0, 120.0));

    idle(&mut game, 1);
    assert!(game.world().has::<HitStun>(alien));
    let frozen_y = game.world().get::<Body>(alien).unwrap().position.y;
    let frozen_clock = game.world().get::<Sprite>(alien).unwrap().state_time;

    idle(&mut game, 10);
    assert!(game.world().has::<HitStun>(alien));
    assert_relative_eq!(game.world().get::<Body>(alien).unwrap().position.y, frozen_y);
    assert_relative_eq!(game.world().get::<Sprite>(alien).unwrap().state_time, frozen_clock);

    idle(&mut game, 20);
    assert!(!game.world().has::<HitStun>(alien));
    assert!(game.world().get::<Body>(alien).unwrap().position.y < frozen_y);
    assert!(game.world().get::<Sprite>(alien).unwrap().state_time > frozen_clock);
}

#[test]
fn test_frame_is_drawn_in_layer_order() {
    let mut game = quiet_game();
    game.spawn_alien(Vec2::new(300.0, 400.0));
    game.arena_mut().timers.clear();
    game.fire(Vec2::new(100.0, 50.0));
    {
        let (world, arena) = game.parts_mut();
        let explosion = arena.sprites.explosion.clone();
        effects::play(world, arena, explosion, Vec2::new(200.0, 200.0));
    }

    let renderer = idle(&mut game, 1);

    let layer_of = |sheet: &str| match sheet {
        "player-bullet" => DrawLayer::Bullets,
        "player" | "enemy" | "enemy-bomb" => DrawLayer::Entities,
        _ => DrawLayer::Effects,
    };
    let layers: Vec<DrawLayer> = renderer
        .last_frame()
        .iter()
        .map(|call| layer_of(call.image.sheet.as_str()))
        .collect();

    assert_eq!(layers.len(), 4);
    assert!(layers.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_reset_restores_the_initial_round() {
    let mut game = Game::new(seeded_config(), &AnimationLibrary::default()).unwrap();
    let initial_len = game.world().len();
    assert_eq!(active_entities(game.world()), 1);

    let mut input = ScriptedInput::new().hold(Keys::FIRE | Keys::LEFT, 400);
    let mut renderer = RecordingRenderer::new();
    run(&mut game, &mut input, &mut renderer, 400);
    assert!(game.stats().aliens_spawned >= 3);
    assert!(game.stats().shots_fired > 0);

    let mut input = ScriptedInput::new().hold(Keys::RESET, 1);
    run(&mut game, &mut input, &mut renderer, 1);

    assert_eq!(game.resets(), 1);
    assert_eq!(game.world().len(), initial_len);
    assert_eq!(active_entities(game.world()), 1);
    assert!(game.player().is_some());
    assert!(game.enemies().is_empty());
    assert_eq!(game.arena().timers.len(), 1);
    assert_eq!(game.stats(), shooter::Stats::default());

    // Only the fresh spawner fires: one alien and none of the old bomb volleys
    idle(&mut game, 1);
    assert_eq!(game.enemies().len(), 1);
    assert_eq!(game.stats().aliens_spawned, 1);
}

#[test]
fn test_holding_reset_restarts_once() {
    let mut game = quiet_game();
    let mut input = ScriptedInput::new().hold(Keys::RESET, 5);
    let mut renderer = RecordingRenderer::new();
    run(&mut game, &mut input, &mut renderer, 5);
    assert_eq!(game.resets(), 1);
}

#[test]
fn test_double_free_of_a_bullet_is_ignored() {
    let mut game = quiet_game();
    let (world, arena) = game.parts_mut();
    let capacity = arena.bullets.capacity();
    let handle = shooter::bullets::fire(world, arena, Vec2::new(10.0, 10.0));

    assert!(arena.bullets.free(world, handle));
    assert!(!arena.bullets.free(world, handle));
    assert_eq!(arena.bullets.idle_count(), capacity);
    assert_eq!(arena.bullets.active_count(), 0);
}

#[test]
fn test_bullet_fizzles_after_its_lifespan() {
    let mut game = quiet_game();
    let handle = game.fire(Vec2::new(10.0, 10.0));

    idle(&mut game, 47);
    assert!(game.arena().bullets.is_active(handle));

    idle(&mut game, 2);
    assert!(!game.arena().bullets.is_active(handle));
    assert_eq!(game.arena().effects.active_count(), 1);
}

#[test]
fn test_ramming_an_enemy_destroys_both() {
    let mut game = quiet_game();
    let player = game.player().unwrap();
    let ship = game.world().get::<Body>(player).unwrap().position;
    let bomb = game.spawn_bomb(ship, 0.0);

    idle(&mut game, 1);

    assert!(game.player().is_none());
    assert!(!game.world().is_alive(bomb));
    assert_eq!(game.stats().player_deaths, 1);
    assert_eq!(game.stats().enemies_destroyed, 1);
    assert_eq!(game.arena().effects.active_count(), 2);
}

#[test]
fn test_killing_an_alien_cancels_its_bomb_timer() {
    let mut game = quiet_game();
    let alien = game.spawn_alien(Vec2::new(84.0, 150.0));
    let timer = game.world().get::<Enemy>(alien).unwrap().bomb_timer.unwrap();
    {
        let (world, _) = game.parts_mut();
        world.get_mut::<Enemy>(alien).unwrap().hits = 1;
    }
    game.fire(Vec2::new(100.0, 120.0));

    idle(&mut game, 1);

    assert!(!game.world().is_alive(alien));
    assert!(!game.arena().timers.is_scheduled(timer));
    assert_eq!(game.stats().enemies_destroyed, 1);
}

#[test]
fn test_alien_drops_a_three_bomb_volley() {
    let mut game = quiet_game();
    game.spawn_alien(Vec2::new(200.0, 300.0));

    idle(&mut game, 1);

    assert_eq!(game.enemies().len(), 4);
}

#[test]
fn test_enemy_leaving_the_arena_is_removed_quietly() {
    let mut game = quiet_game();
    let bomb = game.spawn_bomb(Vec2::new(100.0, -23.9), 0.0);

    idle(&mut game, 1);
    assert!(game.world().is_alive(bomb));

    idle(&mut game, 1);
    assert!(!game.world().is_alive(bomb));
    assert_eq!(game.arena().effects.active_count(), 0);
    assert_eq!(game.stats().enemies_destroyed, 0);
}

#[test]
fn test_collision_index_tracks_live_bodies() {
    let mut game = quiet_game();
    let alien = game.spawn_alien(Vec2::new(84.0, 300.0));
    assert!(game.collision_world().group(BodyCategory::Enemy).contains(&alien));
    assert_eq!(game.collision_world().group(BodyCategory::Player).len(), 1);

    game.reset();
    assert!(!game.collision_world().contains(alien));
    assert!(game.collision_world().group(BodyCategory::Enemy).is_empty());
}
